//! OpenRouter reference provider.
//!
//! Prices come from the public model catalog payload, quoted per unit.
//! Catalog keys are `vendor/model` composites.

mod models;

use std::collections::BTreeMap;

use serde_json::Value;

use self::models::OpenRouterCatalog;
use crate::errors::ReferenceDataError;
use crate::models::{decimal_from_value, PriceField, PriceSheet, PriceUnit};
use crate::provider::ReferencePriceProvider;

/// Reference prices from the OpenRouter public model catalog.
pub struct OpenRouterProvider {
    index: BTreeMap<String, PriceSheet>,
}

impl OpenRouterProvider {
    pub const ID: &'static str = "openrouter";

    /// Build the provider from an already-fetched catalog payload.
    ///
    /// A payload that does not carry the `data` list is malformed; a single
    /// entry with a missing or unparseable price field only loses that
    /// field.
    pub fn from_payload(payload: Value) -> Result<Self, ReferenceDataError> {
        let catalog: OpenRouterCatalog =
            serde_json::from_value(payload).map_err(|error| ReferenceDataError::MalformedCatalog {
                provider: Self::ID.to_string(),
                message: error.to_string(),
            })?;

        let mut index = BTreeMap::new();
        for model in catalog.data {
            let pricing = model.pricing.unwrap_or_default();
            let mut sheet = PriceSheet::default();
            for (field, value) in [
                (PriceField::Prompt, &pricing.prompt),
                (PriceField::Completion, &pricing.completion),
                (PriceField::Request, &pricing.request),
                (PriceField::Image, &pricing.image),
                (PriceField::InputCacheRead, &pricing.input_cache_read),
                (PriceField::InputCacheWrite, &pricing.input_cache_write),
            ] {
                sheet.set(field, value.as_ref().and_then(decimal_from_value));
            }
            index.insert(model.id, sheet);
        }
        Ok(OpenRouterProvider { index })
    }
}

impl ReferencePriceProvider for OpenRouterProvider {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn unit(&self) -> PriceUnit {
        PriceUnit::PerUnit
    }

    fn known_keys(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    fn raw_prices(&self, key: &str) -> Option<PriceSheet> {
        self.index.get(key).cloned()
    }
}
