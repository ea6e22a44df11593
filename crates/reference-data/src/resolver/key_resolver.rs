//! Provider key resolution.
//!
//! Maps a catalog entry to a provider-specific key, either verbatim from the
//! mapping configuration or by inference against the provider's own catalog.
//! Inference is a strict match-count rule - zero matches fail, one resolves,
//! several fail - never a fuzzy ranking.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::normalize::{normalize_name, split_vendor};
use crate::errors::ReferenceDataError;
use crate::models::{CatalogEntry, MappingKey, ProviderKey};
use crate::provider::ReferencePriceProvider;

/// Indicates how a provider key was resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// From the mapping configuration - used verbatim.
    Explicit,
    /// Inferred by normalized-name matching against the provider catalog.
    Inferred,
}

/// A provider key resolved for one catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedKey {
    pub key: ProviderKey,
    pub source: ResolutionSource,
}

/// Resolve the provider key for `entry` under the configured mapping.
///
/// `Ok(None)` means the entry is simply not a candidate for this provider
/// (no mapping, or mapping disabled) - not an error. Inference failures are
/// degraded results the caller records and moves past.
pub fn resolve_key(
    provider: &dyn ReferencePriceProvider,
    entry: &CatalogEntry,
    mapping: Option<&MappingKey>,
) -> Result<Option<ResolvedKey>, ReferenceDataError> {
    match mapping {
        None | Some(MappingKey::Disabled) => Ok(None),
        Some(MappingKey::Explicit(key)) => Ok(Some(ResolvedKey {
            key: Arc::from(key.as_str()),
            source: ResolutionSource::Explicit,
        })),
        Some(MappingKey::Auto) => infer_key(provider, entry).map(|key| {
            Some(ResolvedKey {
                key,
                source: ResolutionSource::Inferred,
            })
        }),
    }
}

/// Infer the provider key whose normalized name matches the entry's
/// normalized display identifiers.
///
/// When the entry's vendor is known, only catalog keys in that vendor's
/// segment (or without one) are considered; cross-vendor name collisions
/// must not resolve silently.
fn infer_key(
    provider: &dyn ReferencePriceProvider,
    entry: &CatalogEntry,
) -> Result<ProviderKey, ReferenceDataError> {
    let targets: Vec<String> = entry
        .identifier_candidates()
        .into_iter()
        .map(normalize_name)
        .collect();
    let vendor = entry.vendor.as_deref().map(normalize_name);

    let mut matches: Vec<&str> = Vec::new();
    for key in provider.known_keys() {
        let (key_vendor, bare) = split_vendor(key);
        if let (Some(wanted), Some(found)) = (vendor.as_deref(), key_vendor) {
            if normalize_name(found) != wanted {
                continue;
            }
        }
        if targets.iter().any(|target| *target == normalize_name(bare)) && !matches.contains(&key)
        {
            matches.push(key);
        }
    }

    match matches.as_slice() {
        [] => Err(ReferenceDataError::UnresolvedIdentifier {
            provider: provider.id().to_string(),
            entry: entry.id.clone(),
        }),
        [only] => Ok(Arc::from(*only)),
        _ => Err(ReferenceDataError::AmbiguousIdentifier {
            provider: provider.id().to_string(),
            entry: entry.id.clone(),
            matches: matches.len(),
        }),
    }
}
