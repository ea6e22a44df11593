//! Pricewatch Core
//!
//! The pricing consolidation and changelog engine. Reconciles a primary
//! catalog of priced entries against independent reference-price providers
//! and tracks how the catalog and its accepted prices evolve across runs.
//!
//! # Architecture
//!
//! ```text
//! raw catalog -> screening -> overrides -> resolution -> consolidation
//!                                                             |
//!                                                             v
//!                previous Snapshot ----+               new Snapshot
//!                                      |                     |
//!                                      +-----> differ <------+
//!                                                 |
//!                                                 v
//!                                          ChangelogEntry
//! ```
//!
//! Everything outside this flow - fetching catalogs, reading configuration
//! files, rendering reports, publishing snapshots - belongs to the caller.
//! The engine is a pure linear batch pass over fully materialized inputs:
//!
//! 1. **Screening** (`screening`) - exclusion rules drop entries up front
//! 2. **Overrides** (`overrides`) - configured patches deep-merge into
//!    entry metadata
//! 3. **Consolidation** (`consolidation`) - per-field decisions with full
//!    candidate audit trails
//! 4. **Snapshots** (`snapshot`) - one immutable consolidated state per run
//! 5. **Changelog** (`changelog`) - structured diff of two snapshots,
//!    append-only log
//! 6. **Pipeline** (`pipeline`) - the pass itself, validated at startup

pub mod changelog;
pub mod consolidation;
pub mod errors;
pub mod overrides;
pub mod pipeline;
pub mod screening;
pub mod snapshot;

// Re-export the error types
pub use errors::{ConfigError, Error, Result, SnapshotError};

// Re-export the engine surface
pub use changelog::{diff_snapshots, ChangeDirection, Changelog, ChangelogEntry, PriceChange};
pub use consolidation::{
    CandidateAssessment, CandidateStatus, ConsolidationConfig, Consolidator, DecisionSource,
    DecisionStatus, PricingDecision, ReasonCode,
};
pub use overrides::{deep_merge, OverrideSet};
pub use pipeline::{PipelineConfig, PipelineRun, PricingPipeline};
pub use screening::ExclusionRules;
pub use snapshot::{ConsolidatedEntry, Snapshot};

// The reference-data surface travels with the engine
pub use pricewatch_reference_data as reference_data;
