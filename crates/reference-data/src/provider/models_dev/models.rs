//! Deserialization models for the models.dev catalog payload.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Top level of the payload: vendor slug -> vendor block.
pub(crate) type ModelsDevCatalog = BTreeMap<String, ModelsDevVendor>;

#[derive(Debug, Deserialize)]
pub(crate) struct ModelsDevVendor {
    #[serde(default)]
    pub models: BTreeMap<String, ModelsDevModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelsDevModel {
    #[serde(default)]
    pub cost: Option<ModelsDevCost>,
}

/// Cost block; metered values are quoted per million units.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ModelsDevCost {
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub request: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub cache_read: Option<Value>,
    #[serde(default)]
    pub cache_write: Option<Value>,
}
