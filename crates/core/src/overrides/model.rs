use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pricewatch_reference_data::CatalogEntry;

use crate::errors::ConfigError;

/// Override patches keyed by catalog entry id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet(BTreeMap<String, Value>);

impl OverrideSet {
    pub fn new(patches: BTreeMap<String, Value>) -> Self {
        OverrideSet(patches)
    }

    pub fn get(&self, entry_id: &str) -> Option<&Value> {
        self.0.get(entry_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Patches must be JSON objects and must leave pricing and identity
    /// alone. Checked once at startup; violations are fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (entry_id, patch) in &self.0 {
            let Some(object) = patch.as_object() else {
                return Err(ConfigError::OverrideNotObject(entry_id.clone()));
            };
            if object.contains_key("pricing") {
                return Err(ConfigError::OverrideTouchesPricing(entry_id.clone()));
            }
            if object.contains_key("id") {
                return Err(ConfigError::OverrideTouchesId(entry_id.clone()));
            }
        }
        Ok(())
    }

    /// Deep-merge the configured patch into `entry`, if one exists.
    /// Returns whether a patch was applied.
    pub fn apply(&self, entry: &mut CatalogEntry) -> Result<bool, ConfigError> {
        let Some(patch) = self.0.get(&entry.id) else {
            return Ok(false);
        };

        let mut value = serde_json::to_value(&*entry)
            .map_err(|error| ConfigError::OverrideInvalid(entry.id.clone(), error.to_string()))?;
        deep_merge(&mut value, patch);
        *entry = serde_json::from_value(value)
            .map_err(|error| ConfigError::OverrideInvalid(entry.id.clone(), error.to_string()))?;
        Ok(true)
    }
}

/// Deep merge `patch` into `target`: objects merge recursively, everything
/// else (scalars and sequences alike) replaces wholesale.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match target_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, patch_value),
                    None => {
                        target_map.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overrides(entries: Value) -> OverrideSet {
        serde_json::from_value(entries).unwrap()
    }

    #[test]
    fn test_scalars_replace_and_objects_merge() {
        let mut target = json!({
            "name": "old",
            "labels": {"tier": "standard", "region": "us"}
        });
        deep_merge(&mut target, &json!({"name": "new", "labels": {"tier": "premium"}}));

        assert_eq!(
            target,
            json!({
                "name": "new",
                "labels": {"tier": "premium", "region": "us"}
            })
        );
    }

    #[test]
    fn test_sequences_replace_wholesale() {
        let mut target = json!({"modalities": ["text", "image"]});
        deep_merge(&mut target, &json!({"modalities": ["text"]}));
        assert_eq!(target, json!({"modalities": ["text"]}));
    }

    #[test]
    fn test_apply_merges_into_matched_entry_metadata() {
        let set = overrides(json!({
            "gpt-5": {"deprecated": true, "notes": {"source": "manual"}}
        }));

        let mut entry = CatalogEntry::new("gpt-5");
        entry
            .metadata
            .insert("notes".to_string(), json!({"reviewed": true}));

        assert!(set.apply(&mut entry).unwrap());
        assert_eq!(entry.metadata.get("deprecated"), Some(&json!(true)));
        assert_eq!(
            entry.metadata.get("notes"),
            Some(&json!({"reviewed": true, "source": "manual"}))
        );
    }

    #[test]
    fn test_apply_is_a_no_op_without_a_patch() {
        let set = overrides(json!({"other": {"deprecated": true}}));
        let mut entry = CatalogEntry::new("gpt-5");
        assert!(!set.apply(&mut entry).unwrap());
        assert!(entry.metadata.is_empty());
    }

    #[test]
    fn test_validate_rejects_non_object_patch() {
        let set = overrides(json!({"gpt-5": ["not", "an", "object"]}));
        assert!(matches!(
            set.validate(),
            Err(ConfigError::OverrideNotObject(_))
        ));
    }

    #[test]
    fn test_validate_rejects_pricing_and_id_patches() {
        let set = overrides(json!({"gpt-5": {"pricing": {"prompt": "0"}}}));
        assert!(matches!(
            set.validate(),
            Err(ConfigError::OverrideTouchesPricing(_))
        ));

        let set = overrides(json!({"gpt-5": {"id": "gpt-6"}}));
        assert!(matches!(set.validate(), Err(ConfigError::OverrideTouchesId(_))));
    }
}
