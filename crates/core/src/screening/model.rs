use log::debug;
use serde::{Deserialize, Serialize};

use pricewatch_reference_data::CatalogEntry;

use crate::errors::ConfigError;

/// Exclusion rules applied to the raw catalog before consolidation.
///
/// All matching is case-insensitive. Pattern fields match against the entry
/// id; `vendors` matches the owning vendor exactly; `ids` is an explicit
/// drop list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionRules {
    pub id_prefixes: Vec<String>,
    pub id_suffixes: Vec<String>,
    pub id_contains: Vec<String>,
    #[serde(rename = "owned_by")]
    pub vendors: Vec<String>,
    pub ids: Vec<String>,
}

impl ExclusionRules {
    pub fn is_empty(&self) -> bool {
        self.id_prefixes.is_empty()
            && self.id_suffixes.is_empty()
            && self.id_contains.is_empty()
            && self.vendors.is_empty()
            && self.ids.is_empty()
    }

    /// Empty patterns would exclude everything; reject them up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = self
            .id_prefixes
            .iter()
            .chain(&self.id_suffixes)
            .chain(&self.id_contains)
            .chain(&self.vendors)
            .chain(&self.ids);
        for pattern in all {
            if pattern.trim().is_empty() {
                return Err(ConfigError::EmptyExclusionPattern);
            }
        }
        Ok(())
    }

    /// True when `entry` should be dropped from the pipeline.
    pub fn should_exclude(&self, entry: &CatalogEntry) -> bool {
        let id = entry.id.to_lowercase();
        let vendor = entry
            .vendor
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if self.ids.iter().any(|excluded| excluded.to_lowercase() == id) {
            return true;
        }
        if self
            .id_prefixes
            .iter()
            .any(|prefix| id.starts_with(&prefix.to_lowercase()))
        {
            return true;
        }
        if self
            .id_suffixes
            .iter()
            .any(|suffix| id.ends_with(&suffix.to_lowercase()))
        {
            return true;
        }
        if self
            .id_contains
            .iter()
            .any(|fragment| id.contains(&fragment.to_lowercase()))
        {
            return true;
        }
        self.vendors
            .iter()
            .any(|owner| owner.to_lowercase() == vendor)
    }

    /// Partition the catalog into kept and excluded entries, preserving
    /// order.
    pub fn partition(&self, entries: Vec<CatalogEntry>) -> (Vec<CatalogEntry>, Vec<CatalogEntry>) {
        let mut kept = Vec::with_capacity(entries.len());
        let mut excluded = Vec::new();
        for entry in entries {
            if self.should_exclude(&entry) {
                debug!("Excluding entry '{}' from the pipeline", entry.id);
                excluded.push(entry);
            } else {
                kept.push(entry);
            }
        }
        (kept, excluded)
    }
}
