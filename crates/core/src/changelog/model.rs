use chrono::{DateTime, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pricewatch_reference_data::PriceField;

/// Direction of an accepted-price movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

/// One field's accepted value or decision status changing between two runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    #[serde(rename = "id")]
    pub entry_id: String,
    pub field: PriceField,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current: Option<Decimal>,
    pub direction: ChangeDirection,
    /// Current minus previous, present when both sides carry a value.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delta: Option<Decimal>,
}

/// What one run changed relative to the previous one.
///
/// Every run appends exactly one entry, including runs that changed nothing
/// - the empty entry is the audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub removed: Vec<String>,
    pub total_entries: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub price_changes: Vec<PriceChange>,
    /// Set on the first run, when there is no previous snapshot.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub initial_snapshot: bool,
}

impl ChangelogEntry {
    /// True when the run changed nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.price_changes.is_empty()
    }
}

/// Append-only, chronologically ascending record of runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Changelog {
    entries: Vec<ChangelogEntry>,
}

impl Changelog {
    pub fn new() -> Self {
        Changelog::default()
    }

    /// Append one run's entry. The log stays ascending on disk; callers
    /// present it descending when they want newest-first.
    pub fn record(&mut self, entry: ChangelogEntry) {
        if let Some(last) = self.entries.last() {
            if entry.date < last.date {
                warn!(
                    "Changelog entry dated {} appended after {}",
                    entry.date, last.date
                );
            }
        }
        self.entries.push(entry);
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    /// Entries newest-first, for presentation.
    pub fn iter_descending(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&ChangelogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
