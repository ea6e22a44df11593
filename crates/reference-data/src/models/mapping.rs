//! Mapping configuration: how catalog entries line up with provider catalogs.
//!
//! The mapping file is loaded by an external collaborator; this module owns
//! the validated in-memory form. Each entry maps provider names to either an
//! explicit provider key, the literal `auto` (infer from the entry's display
//! identifiers), or the literal `none` (provider disabled for this entry).
//! A provider simply absent from an entry's map is not a candidate at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ReferenceDataError;

const AUTO_KEY: &str = "auto";
const DISABLED_KEY: &str = "none";

/// How one catalog entry maps onto one provider's catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MappingKey {
    /// A provider key used verbatim.
    Explicit(String),
    /// Infer the key from the entry's normalized display identifiers.
    Auto,
    /// Provider explicitly disabled for this entry.
    Disabled,
}

impl From<String> for MappingKey {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(AUTO_KEY) {
            MappingKey::Auto
        } else if trimmed.eq_ignore_ascii_case(DISABLED_KEY) {
            MappingKey::Disabled
        } else {
            MappingKey::Explicit(trimmed.to_string())
        }
    }
}

impl From<MappingKey> for String {
    fn from(key: MappingKey) -> Self {
        match key {
            MappingKey::Explicit(key) => key,
            MappingKey::Auto => AUTO_KEY.to_string(),
            MappingKey::Disabled => DISABLED_KEY.to_string(),
        }
    }
}

/// Per-entry mapping of provider name to [`MappingKey`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingEntry(pub BTreeMap<String, MappingKey>);

impl MappingEntry {
    pub fn key_for(&self, provider: &str) -> Option<&MappingKey> {
        self.0.get(provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Validated mapping configuration keyed by catalog entry id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, MappingEntry>",
    into = "BTreeMap<String, MappingEntry>"
)]
pub struct MappingSet {
    entries: BTreeMap<String, MappingEntry>,
}

impl MappingSet {
    /// Build a validated mapping set. Empty entry ids, provider names, or
    /// explicit keys are rejected - a malformed mapping aborts the run
    /// before any snapshot is written.
    pub fn new(entries: BTreeMap<String, MappingEntry>) -> Result<Self, ReferenceDataError> {
        for (entry_id, mapping) in &entries {
            if entry_id.trim().is_empty() {
                return Err(ReferenceDataError::InvalidMapping(
                    "mapping keys must be non-empty entry ids".to_string(),
                ));
            }
            for (provider, key) in &mapping.0 {
                if provider.trim().is_empty() {
                    return Err(ReferenceDataError::InvalidMapping(format!(
                        "entry '{entry_id}' maps an empty provider name"
                    )));
                }
                if let MappingKey::Explicit(explicit) = key {
                    if explicit.trim().is_empty() {
                        return Err(ReferenceDataError::InvalidMapping(format!(
                            "entry '{entry_id}' has an empty key for provider '{provider}'"
                        )));
                    }
                }
            }
        }
        Ok(MappingSet { entries })
    }

    pub fn get(&self, entry_id: &str) -> Option<&MappingEntry> {
        self.entries.get(entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<BTreeMap<String, MappingEntry>> for MappingSet {
    type Error = ReferenceDataError;

    fn try_from(entries: BTreeMap<String, MappingEntry>) -> Result<Self, Self::Error> {
        MappingSet::new(entries)
    }
}

impl From<MappingSet> for BTreeMap<String, MappingEntry> {
    fn from(set: MappingSet) -> Self {
        set.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_key_literals() {
        assert_eq!(MappingKey::from("auto".to_string()), MappingKey::Auto);
        assert_eq!(MappingKey::from(" AUTO ".to_string()), MappingKey::Auto);
        assert_eq!(MappingKey::from("none".to_string()), MappingKey::Disabled);
        assert_eq!(
            MappingKey::from("openai/gpt-5".to_string()),
            MappingKey::Explicit("openai/gpt-5".to_string())
        );
    }

    #[test]
    fn test_mapping_set_parses_entry_maps() {
        let set: MappingSet = serde_json::from_value(json!({
            "gpt-5": {"openrouter": "openai/gpt-5", "models.dev": "auto"},
            "claude-opus-4": {"openrouter": "none"}
        }))
        .unwrap();

        let entry = set.get("gpt-5").unwrap();
        assert_eq!(
            entry.key_for("openrouter"),
            Some(&MappingKey::Explicit("openai/gpt-5".to_string()))
        );
        assert_eq!(entry.key_for("models.dev"), Some(&MappingKey::Auto));
        assert_eq!(entry.key_for("missing"), None);
        assert_eq!(
            set.get("claude-opus-4").unwrap().key_for("openrouter"),
            Some(&MappingKey::Disabled)
        );
    }

    #[test]
    fn test_mapping_set_rejects_empty_explicit_key() {
        let result: Result<MappingSet, _> = serde_json::from_value(json!({
            "gpt-5": {"openrouter": "  "}
        }));
        assert!(result.is_err());
    }
}
