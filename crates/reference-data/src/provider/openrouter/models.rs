//! Deserialization models for the OpenRouter catalog payload.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct OpenRouterCatalog {
    pub data: Vec<OpenRouterModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenRouterModel {
    pub id: String,
    #[serde(default)]
    pub pricing: Option<OpenRouterPricing>,
}

/// Pricing block as served by the catalog endpoint. Values arrive as
/// strings or numbers interchangeably; coercion happens at index build.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenRouterPricing {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default)]
    pub completion: Option<Value>,
    #[serde(default)]
    pub request: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub input_cache_read: Option<Value>,
    #[serde(default)]
    pub input_cache_write: Option<Value>,
}
