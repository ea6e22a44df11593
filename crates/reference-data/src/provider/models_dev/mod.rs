//! models.dev reference provider.
//!
//! The payload nests models under vendor blocks; catalog keys are
//! `vendor/model` composites and metered costs are quoted per million
//! units.

mod models;

use std::collections::BTreeMap;

use serde_json::Value;

use self::models::ModelsDevCatalog;
use crate::errors::ReferenceDataError;
use crate::models::{decimal_from_value, PriceField, PriceSheet, PriceUnit};
use crate::provider::ReferencePriceProvider;

/// Reference prices from the models.dev aggregated catalog.
pub struct ModelsDevProvider {
    index: BTreeMap<String, PriceSheet>,
}

impl ModelsDevProvider {
    pub const ID: &'static str = "models.dev";

    /// Build the provider from an already-fetched catalog payload.
    pub fn from_payload(payload: Value) -> Result<Self, ReferenceDataError> {
        let catalog: ModelsDevCatalog =
            serde_json::from_value(payload).map_err(|error| ReferenceDataError::MalformedCatalog {
                provider: Self::ID.to_string(),
                message: error.to_string(),
            })?;

        let mut index = BTreeMap::new();
        for (vendor, block) in catalog {
            for (model, data) in block.models {
                let cost = data.cost.unwrap_or_default();
                let mut sheet = PriceSheet::default();
                for (field, value) in [
                    (PriceField::Prompt, &cost.input),
                    (PriceField::Completion, &cost.output),
                    (PriceField::Request, &cost.request),
                    (PriceField::Image, &cost.image),
                    (PriceField::InputCacheRead, &cost.cache_read),
                    (PriceField::InputCacheWrite, &cost.cache_write),
                ] {
                    sheet.set(field, value.as_ref().and_then(decimal_from_value));
                }
                index.insert(format!("{vendor}/{model}"), sheet);
            }
        }
        Ok(ModelsDevProvider { index })
    }
}

impl ReferencePriceProvider for ModelsDevProvider {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn unit(&self) -> PriceUnit {
        PriceUnit::PerMillion
    }

    fn known_keys(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    fn raw_prices(&self, key: &str) -> Option<PriceSheet> {
        self.index.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "openai": {
                "models": {
                    "gpt-5": {
                        "cost": {"input": 1.25, "output": 10, "cache_read": 0.125}
                    }
                }
            },
            "anthropic": {
                "models": {
                    "claude-sonnet-4-5": {"cost": {"input": "3", "output": "15"}},
                    "claude-haiku-4-5": {}
                }
            }
        })
    }

    #[test]
    fn test_composite_keys_and_per_million_normalization() {
        let provider = ModelsDevProvider::from_payload(payload()).unwrap();

        let raw = provider.raw_prices("openai/gpt-5").unwrap();
        assert_eq!(raw.get(PriceField::Prompt), Some(dec!(1.25)));

        let normalized = provider.prices("openai/gpt-5").unwrap();
        assert_eq!(normalized.get(PriceField::Prompt), Some(dec!(0.00000125)));
        assert_eq!(normalized.get(PriceField::Completion), Some(dec!(0.00001)));
        assert_eq!(
            normalized.get(PriceField::InputCacheRead),
            Some(dec!(0.000000125))
        );
    }

    #[test]
    fn test_model_without_cost_block_is_empty() {
        let provider = ModelsDevProvider::from_payload(payload()).unwrap();
        assert!(provider.prices("anthropic/claude-haiku-4-5").unwrap().is_empty());
    }

    #[test]
    fn test_known_keys_cover_all_vendors() {
        let provider = ModelsDevProvider::from_payload(payload()).unwrap();
        let keys = provider.known_keys();
        assert!(keys.contains(&"openai/gpt-5"));
        assert!(keys.contains(&"anthropic/claude-sonnet-4-5"));
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let result = ModelsDevProvider::from_payload(json!([1, 2, 3]));
        assert!(matches!(
            result,
            Err(ReferenceDataError::MalformedCatalog { .. })
        ));
    }
}
