use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pricewatch_reference_data::{CatalogEntry, PriceField, PriceSheet};

use crate::consolidation::PricingDecision;
use crate::errors::SnapshotError;

/// One entry's consolidated state within a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedEntry {
    pub entry: CatalogEntry,
    /// Accepted value per field, canonical per-unit convention.
    pub accepted: PriceSheet,
    /// Derived per-million view of the metered accepted values.
    #[serde(skip_serializing_if = "PriceSheet::is_empty", default)]
    pub accepted_per_million: PriceSheet,
    /// One decision per priceable field, in canonical field order.
    pub decisions: Vec<PricingDecision>,
}

impl ConsolidatedEntry {
    /// Assemble from the per-field decisions produced by the consolidator.
    pub fn new(entry: CatalogEntry, decisions: Vec<PricingDecision>) -> Self {
        let mut accepted = PriceSheet::default();
        let mut accepted_per_million = PriceSheet::default();
        for decision in &decisions {
            accepted.set(decision.field, decision.accepted);
            accepted_per_million.set(decision.field, decision.accepted_per_million);
        }
        ConsolidatedEntry {
            entry,
            accepted,
            accepted_per_million,
            decisions,
        }
    }

    pub fn decision(&self, field: PriceField) -> Option<&PricingDecision> {
        self.decisions.iter().find(|decision| decision.field == field)
    }
}

/// A fully consolidated catalog state for one run.
///
/// Immutable once built: the snapshot is persisted as-is and fed back to the
/// next run's differ as the "previous" side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Run identifier.
    pub id: String,
    /// When the run was consolidated.
    pub taken_at: DateTime<Utc>,
    /// Entries in catalog order.
    pub entries: Vec<ConsolidatedEntry>,
}

impl Snapshot {
    /// Build a snapshot stamped now.
    pub fn new(entries: Vec<ConsolidatedEntry>) -> Result<Self, SnapshotError> {
        Self::at(Utc::now(), entries)
    }

    /// Build a snapshot with an explicit run stamp.
    ///
    /// Entry ids must be unique; a duplicate aborts construction before
    /// anything downstream can observe a corrupt state.
    pub fn at(
        taken_at: DateTime<Utc>,
        entries: Vec<ConsolidatedEntry>,
    ) -> Result<Self, SnapshotError> {
        let mut seen = BTreeSet::new();
        for consolidated in &entries {
            if !seen.insert(consolidated.entry.id.as_str()) {
                return Err(SnapshotError::DuplicateEntry(consolidated.entry.id.clone()));
            }
        }
        Ok(Snapshot {
            id: Uuid::new_v4().to_string(),
            taken_at,
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry ids, ordered.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .map(|consolidated| consolidated.entry.id.as_str())
            .collect()
    }

    /// Id-keyed view for diffing.
    pub fn index(&self) -> HashMap<&str, &ConsolidatedEntry> {
        self.entries
            .iter()
            .map(|consolidated| (consolidated.entry.id.as_str(), consolidated))
            .collect()
    }

    /// Audit view: every decision of every entry, grouped by entry then
    /// field. Coverage is total by construction.
    pub fn all_decisions(&self) -> impl Iterator<Item = &PricingDecision> {
        self.entries
            .iter()
            .flat_map(|consolidated| consolidated.decisions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidation::{ConsolidationConfig, Consolidator};
    use rust_decimal_macros::dec;

    fn consolidated(id: &str) -> ConsolidatedEntry {
        let mut entry = CatalogEntry::new(id);
        entry.listed.set(PriceField::Prompt, Some(dec!(0.002)));
        let consolidator = Consolidator::new(ConsolidationConfig::default()).unwrap();
        let decisions = consolidator.consolidate_entry(&entry, &[]);
        ConsolidatedEntry::new(entry, decisions)
    }

    #[test]
    fn test_accepted_sheets_are_built_from_decisions() {
        let consolidated = consolidated("gpt-5");
        assert_eq!(consolidated.accepted.get(PriceField::Prompt), Some(dec!(0.002)));
        assert_eq!(
            consolidated.accepted_per_million.get(PriceField::Prompt),
            Some(dec!(2000))
        );
        assert_eq!(consolidated.accepted.get(PriceField::Image), None);
    }

    #[test]
    fn test_duplicate_entry_id_aborts_construction() {
        let result = Snapshot::at(
            Utc::now(),
            vec![consolidated("gpt-5"), consolidated("gpt-5")],
        );
        assert!(matches!(result, Err(SnapshotError::DuplicateEntry(_))));
    }

    #[test]
    fn test_decision_coverage_is_total() {
        let snapshot = Snapshot::at(Utc::now(), vec![consolidated("a"), consolidated("b")]).unwrap();
        assert_eq!(snapshot.all_decisions().count(), 2 * PriceField::ALL.len());
    }
}
