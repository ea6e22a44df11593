//! Shared domain models for the reference-data crate.

mod candidate;
mod entry;
mod mapping;
mod price;
mod types;

pub use candidate::ProviderCandidate;
pub use entry::CatalogEntry;
pub use mapping::{MappingEntry, MappingKey, MappingSet};
pub use price::{decimal_from_value, PriceField, PriceSheet, PriceUnit, PER_MILLION};
pub use types::{ProviderId, ProviderKey};
