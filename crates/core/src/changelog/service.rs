//! The changelog differ.
//!
//! Compares two consolidated snapshots and produces the added/removed id
//! sets plus per-field price-change records. Pure given its inputs; the
//! caller owns persisting the log.

use log::info;

use pricewatch_reference_data::PriceField;

use super::model::{ChangeDirection, ChangelogEntry, PriceChange};
use crate::consolidation::PricingDecision;
use crate::snapshot::Snapshot;

/// Build the changelog entry describing `current` relative to `previous`.
///
/// A first run (no previous snapshot) marks `initial_snapshot` and counts
/// every id as added. A run with no differences still yields an entry with
/// empty sets - every run leaves an audit trail.
pub fn diff_snapshots(previous: Option<&Snapshot>, current: &Snapshot) -> ChangelogEntry {
    let current_ids = current.ids();
    let previous_ids = previous.map(Snapshot::ids).unwrap_or_default();

    let added: Vec<String> = current_ids
        .difference(&previous_ids)
        .map(|id| id.to_string())
        .collect();
    let removed: Vec<String> = previous_ids
        .difference(&current_ids)
        .map(|id| id.to_string())
        .collect();

    let mut price_changes = Vec::new();
    if let Some(previous) = previous {
        let previous_index = previous.index();
        let current_index = current.index();
        for id in current_ids.intersection(&previous_ids) {
            let (Some(before), Some(after)) = (previous_index.get(id), current_index.get(id))
            else {
                continue;
            };
            for field in PriceField::ALL {
                if let Some(change) =
                    field_change(id, field, before.decision(field), after.decision(field))
                {
                    price_changes.push(change);
                }
            }
        }
    }

    let entry = ChangelogEntry {
        date: current.taken_at,
        added,
        removed,
        total_entries: current.len(),
        price_changes,
        initial_snapshot: previous.is_none(),
    };
    info!(
        "Diffed snapshots: {} added, {} removed, {} price changes across {} entries",
        entry.added.len(),
        entry.removed.len(),
        entry.price_changes.len(),
        entry.total_entries
    );
    entry
}

/// Compare one field's decisions between two runs.
///
/// A change is emitted when the accepted value or the decision status
/// differs. Direction policy: value movement decides when both sides are
/// present; absent-to-present and status-only (zero-delta) changes break
/// toward `increase`, present-to-absent toward `decrease`.
fn field_change(
    entry_id: &str,
    field: PriceField,
    previous: Option<&PricingDecision>,
    current: Option<&PricingDecision>,
) -> Option<PriceChange> {
    let previous_value = previous.and_then(|decision| decision.accepted);
    let current_value = current.and_then(|decision| decision.accepted);
    let previous_status = previous.map(|decision| decision.status);
    let current_status = current.map(|decision| decision.status);

    if previous_value == current_value && previous_status == current_status {
        return None;
    }

    let direction = match (previous_value, current_value) {
        (Some(before), Some(after)) if after < before => ChangeDirection::Decrease,
        (Some(_), None) => ChangeDirection::Decrease,
        _ => ChangeDirection::Increase,
    };
    let delta = match (previous_value, current_value) {
        (Some(before), Some(after)) => Some(after - before),
        _ => None,
    };

    Some(PriceChange {
        entry_id: entry_id.to_string(),
        field,
        previous: previous_value,
        current: current_value,
        direction,
        delta,
    })
}
