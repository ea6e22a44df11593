//! Catalog entry model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::price::PriceSheet;

/// An entry of the primary catalog being audited.
///
/// Unique by `id` within a snapshot. `listed` is the catalog's own asking
/// price; reference providers only ever validate or supersede it, never edit
/// it in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique catalog identifier.
    pub id: String,

    /// Human-facing display name, when it differs from the id.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    /// Vendor that owns the entry.
    #[serde(rename = "owned_by", skip_serializing_if = "Option::is_none", default)]
    pub vendor: Option<String>,

    /// Base identifier this entry derives from, when different from `id`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub root: Option<String>,

    /// Modality tags (e.g. "text", "image").
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub modalities: Vec<String>,

    /// The catalog's own asking price per field.
    #[serde(rename = "pricing", default)]
    pub listed: PriceSheet,

    /// Passthrough display metadata; override patches deep-merge into this.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>) -> Self {
        CatalogEntry {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Identifier candidates for provider key inference, most specific first.
    pub fn identifier_candidates(&self) -> Vec<&str> {
        let mut candidates: Vec<&str> = Vec::with_capacity(3);
        for value in [Some(self.id.as_str()), self.root.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
        {
            let trimmed = value.trim();
            if !trimmed.is_empty() && !candidates.contains(&trimmed) {
                candidates.push(trimmed);
            }
        }
        candidates
    }
}
