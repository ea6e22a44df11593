//! Changelog differencing.
//!
//! Compares the current snapshot against the previous run's and appends one
//! entry per run to an ordered, append-only log.

mod model;
mod service;


pub use model::{ChangeDirection, Changelog, ChangelogEntry, PriceChange};
pub use service::diff_snapshots;
