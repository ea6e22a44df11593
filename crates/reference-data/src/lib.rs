//! Pricewatch Reference Data Crate
//!
//! Provider-agnostic reference pricing for the pricewatch engine.
//!
//! # Overview
//!
//! This crate owns everything between a raw catalog entry and a set of
//! comparable provider price candidates:
//!
//! - The closed set of reference price providers (OpenRouter, models.dev)
//! - Identifier resolution, explicit or inferred from normalized names
//! - A priority-ordered registry with per-provider skip diagnostics
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   CatalogEntry   | --> |   MappingEntry   |  (explicit | auto | none)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Resolver      |  (normalized-name matching)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (OpenRouter, models.dev)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +-------------------+
//!                          | ProviderCandidate |  (unit-normalized prices)
//!                          +-------------------+
//! ```
//!
//! Fetching catalogs is the caller's job; providers are constructed from
//! already-fetched payloads and everything in this crate is pure given that
//! state.
//!
//! # Core Types
//!
//! - [`CatalogEntry`] - an entry of the primary catalog being audited
//! - [`PriceSheet`] / [`PriceField`] - per-field price values
//! - [`MappingSet`] - validated entry-to-provider key configuration
//! - [`ProviderCandidate`] - one provider's normalized contribution
//! - [`ResolutionDiagnostics`] - why providers contributed nothing

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;

// Re-export all public types from models
pub use models::{
    decimal_from_value, CatalogEntry, MappingEntry, MappingKey, MappingSet, PriceField,
    PriceSheet, PriceUnit, ProviderCandidate, ProviderId, ProviderKey, PER_MILLION,
};

// Re-export resolver types
pub use resolver::{normalize_name, resolve_key, split_vendor, ResolutionSource, ResolvedKey};

// Re-export provider types
pub use provider::{ModelsDevProvider, OpenRouterProvider, ReferencePriceProvider};

// Re-export registry types
pub use registry::{ProviderAttempt, ProviderRegistry, ResolutionDiagnostics, SkipReason};

// Re-export error type
pub use errors::ReferenceDataError;
