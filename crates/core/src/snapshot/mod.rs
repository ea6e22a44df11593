//! Consolidated snapshots.
//!
//! A snapshot is one run's fully consolidated catalog state. It is built
//! once, persisted whole by the caller, and read back as the "previous"
//! input to the next run's differ.

mod model;

pub use model::{ConsolidatedEntry, Snapshot};
