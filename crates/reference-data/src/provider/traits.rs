//! Reference price provider trait definitions.

use crate::models::{PriceSheet, PriceUnit};

/// Trait for reference price sources.
///
/// Implement this trait to add support for a new reference catalog. The set
/// of variants is static and closed - providers are selected by name from
/// configuration, never loaded at runtime. Instances are built from a
/// catalog payload the caller has already fetched; nothing here performs IO.
///
/// # Example
///
/// ```ignore
/// use pricewatch_reference_data::provider::ReferencePriceProvider;
/// use pricewatch_reference_data::models::{PriceSheet, PriceUnit};
///
/// struct MyProvider {
///     index: std::collections::BTreeMap<String, PriceSheet>,
/// }
///
/// impl ReferencePriceProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "my-provider"
///     }
///
///     fn unit(&self) -> PriceUnit {
///         PriceUnit::PerUnit
///     }
///
///     // ... expose the catalog keys and raw prices
/// }
/// ```
pub trait ReferencePriceProvider: Send + Sync {
    /// Unique lowercase identifier for this provider.
    ///
    /// Matches the name used in the priority list and mapping configuration.
    fn id(&self) -> &'static str;

    /// The unit convention this provider quotes metered fields in.
    ///
    /// The registry normalizes every candidate to the canonical per-unit
    /// convention before comparison.
    fn unit(&self) -> PriceUnit;

    /// Every key present in the provider catalog.
    ///
    /// Used by `auto` key inference; order is not significant.
    fn known_keys(&self) -> Vec<&str>;

    /// Raw price fields for an exact catalog key, in the provider's native
    /// unit. `None` when the key is not in the catalog.
    fn raw_prices(&self, key: &str) -> Option<PriceSheet>;

    /// Price fields normalized to the canonical per-unit convention.
    fn prices(&self, key: &str) -> Option<PriceSheet> {
        self.raw_prices(key).map(|sheet| sheet.normalized(self.unit()))
    }
}
