//! Provider candidate model.

use serde::{Deserialize, Serialize};

use super::price::PriceSheet;
use super::types::{ProviderId, ProviderKey};
use crate::resolver::ResolutionSource;

/// One provider's contribution for a catalog entry.
///
/// Produced by the registry in provider priority order; `prices` is already
/// normalized to the canonical per-unit convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderCandidate {
    pub provider: ProviderId,
    pub key: ProviderKey,
    pub resolution: ResolutionSource,
    pub prices: PriceSheet,
}
