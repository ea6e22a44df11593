//! Provider registry for orchestrating reference price providers.
//!
//! The registry owns the configured priority order and gathers per-entry
//! candidates, recording a skip reason for every provider that contributes
//! nothing. Gathering never fails: resolution problems degrade the entry to
//! catalog-only pricing downstream.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};

use super::diagnostics::{ResolutionDiagnostics, SkipReason};
use crate::errors::ReferenceDataError;
use crate::models::{CatalogEntry, MappingEntry, MappingKey, ProviderCandidate, ProviderId};
use crate::provider::ReferencePriceProvider;
use crate::resolver::resolve_key;

/// Priority-ordered registry of reference price providers.
pub struct ProviderRegistry {
    /// Providers in priority order: index 0 is the highest priority.
    providers: Vec<Arc<dyn ReferencePriceProvider>>,
}

impl ProviderRegistry {
    /// Build a registry ordered by the configured priority list.
    ///
    /// The list is a total order - no ties, fixed for the whole run. A name
    /// appearing twice or naming no registered instance is a configuration
    /// error; instances the list does not mention are left out with a
    /// warning.
    pub fn new(
        providers: Vec<Arc<dyn ReferencePriceProvider>>,
        priority: &[String],
    ) -> Result<Self, ReferenceDataError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut ordered = Vec::with_capacity(priority.len());

        for name in priority {
            if !seen.insert(name.as_str()) {
                return Err(ReferenceDataError::DuplicateProvider(name.clone()));
            }
            let provider = providers
                .iter()
                .find(|provider| provider.id() == name)
                .ok_or_else(|| ReferenceDataError::UnknownProvider(name.clone()))?;
            ordered.push(Arc::clone(provider));
        }

        for provider in &providers {
            if !seen.contains(provider.id()) {
                warn!(
                    "Provider '{}' is not in the priority list and will not be consulted",
                    provider.id()
                );
            }
        }

        Ok(ProviderRegistry { providers: ordered })
    }

    /// Providers in priority order.
    pub fn providers(&self) -> &[Arc<dyn ReferencePriceProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Gather unit-normalized candidates for `entry`, in priority order.
    ///
    /// Every provider leaves either a candidate or a skip record; nothing is
    /// dropped silently. Resolution failures are logged and recorded, never
    /// propagated - a degraded provider must not abort the run.
    pub fn candidates_for(
        &self,
        entry: &CatalogEntry,
        mapping: Option<&MappingEntry>,
    ) -> (Vec<ProviderCandidate>, ResolutionDiagnostics) {
        let mut candidates = Vec::new();
        let mut diagnostics = ResolutionDiagnostics::new();

        for provider in &self.providers {
            let provider_id: ProviderId = Cow::Borrowed(provider.id());
            let mapping_key = mapping.and_then(|entry_map| entry_map.key_for(provider.id()));

            match mapping_key {
                None => {
                    diagnostics.record_skip(provider_id, SkipReason::NotMapped);
                    continue;
                }
                Some(MappingKey::Disabled) => {
                    debug!("Provider '{}' disabled for entry '{}'", provider.id(), entry.id);
                    diagnostics.record_skip(provider_id, SkipReason::MappingDisabled);
                    continue;
                }
                Some(_) => {}
            }

            let resolved = match resolve_key(provider.as_ref(), entry, mapping_key) {
                Ok(Some(resolved)) => resolved,
                // Explicit/Auto mappings always resolve or error; treat an
                // unexpected None like an absent mapping.
                Ok(None) => {
                    diagnostics.record_skip(provider_id, SkipReason::NotMapped);
                    continue;
                }
                Err(error @ ReferenceDataError::AmbiguousIdentifier { matches, .. }) => {
                    warn!("{error}");
                    diagnostics.record_skip(provider_id, SkipReason::Ambiguous { matches });
                    continue;
                }
                Err(error) => {
                    warn!("{error}");
                    diagnostics.record_skip(provider_id, SkipReason::Unresolved);
                    continue;
                }
            };

            let Some(prices) = provider.prices(&resolved.key) else {
                debug!(
                    "Key '{}' not in '{}' catalog for entry '{}'",
                    resolved.key,
                    provider.id(),
                    entry.id
                );
                diagnostics.record_skip(
                    provider_id,
                    SkipReason::KeyNotInCatalog {
                        key: Arc::clone(&resolved.key),
                    },
                );
                continue;
            };

            if !prices.has_values() {
                diagnostics.record_skip(
                    provider_id,
                    SkipReason::NoPriceFields {
                        key: Arc::clone(&resolved.key),
                    },
                );
                continue;
            }

            diagnostics.record_success(provider_id.clone());
            candidates.push(ProviderCandidate {
                provider: provider_id,
                key: resolved.key,
                resolution: resolved.source,
                prices,
            });
        }

        (candidates, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceField, PriceSheet, PriceUnit};
    use crate::resolver::ResolutionSource;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    struct StubProvider {
        id: &'static str,
        unit: PriceUnit,
        index: BTreeMap<String, PriceSheet>,
    }

    impl StubProvider {
        fn new(id: &'static str, unit: PriceUnit, prices: &[(&str, Decimal)]) -> Arc<Self> {
            let mut index = BTreeMap::new();
            for (key, prompt) in prices {
                let mut sheet = PriceSheet::default();
                sheet.set(PriceField::Prompt, Some(*prompt));
                index.insert(key.to_string(), sheet);
            }
            Arc::new(StubProvider {
                id,
                unit,
                index,
            })
        }
    }

    impl ReferencePriceProvider for StubProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        fn unit(&self) -> PriceUnit {
            self.unit
        }

        fn known_keys(&self) -> Vec<&str> {
            self.index.keys().map(String::as_str).collect()
        }

        fn raw_prices(&self, key: &str) -> Option<PriceSheet> {
            self.index.get(key).cloned()
        }
    }

    fn mapping(pairs: &[(&str, &str)]) -> MappingEntry {
        MappingEntry(
            pairs
                .iter()
                .map(|(provider, key)| (provider.to_string(), MappingKey::from(key.to_string())))
                .collect(),
        )
    }

    #[test]
    fn test_priority_list_orders_providers() {
        let a = StubProvider::new("alpha", PriceUnit::PerUnit, &[]);
        let b = StubProvider::new("beta", PriceUnit::PerUnit, &[]);

        let registry = ProviderRegistry::new(
            vec![a, b],
            &["beta".to_string(), "alpha".to_string()],
        )
        .unwrap();

        let ids: Vec<&str> = registry.providers().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_duplicate_priority_name_is_an_error() {
        let a = StubProvider::new("alpha", PriceUnit::PerUnit, &[]);
        let result = ProviderRegistry::new(
            vec![a],
            &["alpha".to_string(), "alpha".to_string()],
        );
        assert!(matches!(
            result,
            Err(ReferenceDataError::DuplicateProvider(_))
        ));
    }

    #[test]
    fn test_unknown_priority_name_is_an_error() {
        let a = StubProvider::new("alpha", PriceUnit::PerUnit, &[]);
        let result = ProviderRegistry::new(vec![a], &["ghost".to_string()]);
        assert!(matches!(result, Err(ReferenceDataError::UnknownProvider(_))));
    }

    #[test]
    fn test_candidates_follow_priority_order_and_normalize_units() {
        let per_unit = StubProvider::new(
            "alpha",
            PriceUnit::PerUnit,
            &[("vendor/model-x", dec!(0.000003))],
        );
        let per_million =
            StubProvider::new("beta", PriceUnit::PerMillion, &[("vendor/model-x", dec!(3))]);

        let registry = ProviderRegistry::new(
            vec![per_million, per_unit],
            &["beta".to_string(), "alpha".to_string()],
        )
        .unwrap();

        let entry = CatalogEntry::new("model-x");
        let map = mapping(&[("alpha", "vendor/model-x"), ("beta", "vendor/model-x")]);
        let (candidates, diagnostics) = registry.candidates_for(&entry, Some(&map));

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].provider, "beta");
        assert_eq!(
            candidates[0].prices.get(PriceField::Prompt),
            Some(dec!(0.000003))
        );
        assert_eq!(candidates[1].provider, "alpha");
        assert_eq!(candidates[0].resolution, ResolutionSource::Explicit);
        assert!(diagnostics.has_candidates());
    }

    #[test]
    fn test_every_provider_leaves_an_attempt_record() {
        let mapped = StubProvider::new("alpha", PriceUnit::PerUnit, &[]);
        let unmapped = StubProvider::new("beta", PriceUnit::PerUnit, &[]);

        let registry = ProviderRegistry::new(
            vec![mapped, unmapped],
            &["alpha".to_string(), "beta".to_string()],
        )
        .unwrap();

        let entry = CatalogEntry::new("model-x");
        let map = mapping(&[("alpha", "vendor/missing")]);
        let (candidates, diagnostics) = registry.candidates_for(&entry, Some(&map));

        assert!(candidates.is_empty());
        assert_eq!(diagnostics.attempts.len(), 2);
        assert!(matches!(
            diagnostics.attempts[0].skipped,
            Some(SkipReason::KeyNotInCatalog { .. })
        ));
        assert!(matches!(
            diagnostics.attempts[1].skipped,
            Some(SkipReason::NotMapped)
        ));
    }

    #[test]
    fn test_auto_failures_degrade_to_skips() {
        let provider = StubProvider::new(
            "alpha",
            PriceUnit::PerUnit,
            &[("vendor/model-x", dec!(0.001)), ("other/model-x", dec!(0.002))],
        );

        let registry = ProviderRegistry::new(vec![provider], &["alpha".to_string()]).unwrap();

        let entry = CatalogEntry::new("model-x");
        let map = mapping(&[("alpha", "auto")]);
        let (candidates, diagnostics) = registry.candidates_for(&entry, Some(&map));

        assert!(candidates.is_empty());
        assert!(matches!(
            diagnostics.attempts[0].skipped,
            Some(SkipReason::Ambiguous { matches: 2 })
        ));
    }
}
