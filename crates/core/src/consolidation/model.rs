//! Pricing decision domain models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pricewatch_reference_data::{PriceField, ProviderId};

use crate::errors::ConfigError;

/// Fixed, enumerated explanation attached to every pricing decision and
/// candidate assessment. Reason codes are data, not errors - the audit
/// output accounts for every field of every entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// A provider candidate validated the field and was accepted.
    ProviderValidated,
    /// No provider candidate survived; the catalog's own value stands.
    NoProviderValidated,
    /// Candidate value was zero or negative.
    ZeroPrice,
    /// Candidate was strictly below the catalog's listed value - the
    /// catalog is priced above its reference.
    CatalogPricier,
    /// A valid lower-priority candidate disagrees with the accepted value
    /// beyond the configured tolerance. Advisory, not exclusionary.
    ConflictingProviders,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::ProviderValidated => "provider_validated",
            ReasonCode::NoProviderValidated => "no_provider_validated",
            ReasonCode::ZeroPrice => "zero_price",
            ReasonCode::CatalogPricier => "catalog_pricier",
            ReasonCode::ConflictingProviders => "conflicting_providers",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Did any provider validate this field?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// A provider candidate was accepted for the field.
    Accepted,
    /// Every candidate was rejected or absent; the catalog value stands.
    Rejected,
}

/// Where an accepted value came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionSource {
    /// The catalog's own listed value.
    Catalog,
    /// A reference provider, by id.
    Provider(ProviderId),
}

const CATALOG_SOURCE: &str = "catalog";

impl From<String> for DecisionSource {
    fn from(raw: String) -> Self {
        if raw == CATALOG_SOURCE {
            DecisionSource::Catalog
        } else {
            DecisionSource::Provider(raw.into())
        }
    }
}

impl From<DecisionSource> for String {
    fn from(source: DecisionSource) -> Self {
        match source {
            DecisionSource::Catalog => CATALOG_SOURCE.to_string(),
            DecisionSource::Provider(id) => id.into_owned(),
        }
    }
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionSource::Catalog => f.write_str(CATALOG_SOURCE),
            DecisionSource::Provider(id) => f.write_str(id),
        }
    }
}

/// Assessment outcome for one provider candidate on one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Eligible for acceptance (the highest-priority one wins).
    Accepted,
    /// Rejected by a validity rule.
    Rejected,
    /// The candidate carries no value for this field.
    Missing,
}

/// Audit record for one provider candidate on one field.
///
/// `value` is normalized to the canonical per-unit convention. `reasons`
/// accumulates in evaluation order and may be non-empty on an accepted
/// candidate (advisory codes).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateAssessment {
    pub provider: ProviderId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<Decimal>,
    pub status: CandidateStatus,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reasons: Vec<ReasonCode>,
}

impl CandidateAssessment {
    pub fn missing(provider: ProviderId) -> Self {
        CandidateAssessment {
            provider,
            value: None,
            status: CandidateStatus::Missing,
            reasons: Vec::new(),
        }
    }

    pub fn valid(provider: ProviderId, value: Decimal) -> Self {
        CandidateAssessment {
            provider,
            value: Some(value),
            status: CandidateStatus::Accepted,
            reasons: Vec::new(),
        }
    }

    /// Record a rejection reason. Missing candidates stay missing.
    pub fn reject(&mut self, reason: ReasonCode) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
        if self.status != CandidateStatus::Missing {
            self.status = CandidateStatus::Rejected;
        }
    }

    /// Attach an advisory reason without changing the status.
    pub fn advise(&mut self, reason: ReasonCode) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }
}

/// The consolidated outcome for one (entry, field) pair.
///
/// Exactly one decision exists per priceable field of every entry - never
/// omitted, even when nothing priced the field. Derived, never mutated
/// after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingDecision {
    pub entry_id: String,
    pub field: PriceField,
    /// Accepted value in the canonical per-unit convention. Absent only
    /// when neither the catalog nor any provider priced the field.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accepted: Option<Decimal>,
    /// Derived per-million view of the accepted value for metered fields.
    /// Pure conversion - never itself a decision.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accepted_per_million: Option<Decimal>,
    pub source: DecisionSource,
    pub status: DecisionStatus,
    pub reason: ReasonCode,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub candidates: Vec<CandidateAssessment>,
}

/// Consolidation tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Absolute disagreement between two valid candidates above which the
    /// lower-priority one is flagged `conflicting_providers`. Zero means
    /// any disagreement conflicts.
    pub conflict_tolerance: Decimal,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        ConsolidationConfig {
            conflict_tolerance: Decimal::ZERO,
        }
    }
}

impl ConsolidationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conflict_tolerance < Decimal::ZERO {
            return Err(ConfigError::NegativeTolerance);
        }
        Ok(())
    }
}
