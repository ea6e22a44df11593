//! The pricing consolidator.
//!
//! For every priceable field of every entry, selects an accepted value from
//! the catalog/provider candidates under priority and validity rules, and
//! records an auditable decision. The catalog's own value is the baseline:
//! never itself rejected, always eligible to be superseded by a validated
//! provider candidate.

use rust_decimal::Decimal;

use pricewatch_reference_data::{CatalogEntry, PriceField, ProviderCandidate};

use super::model::{
    CandidateAssessment, CandidateStatus, ConsolidationConfig, DecisionSource, DecisionStatus,
    PricingDecision, ReasonCode,
};
use crate::errors::ConfigError;

/// Per-field decision maker.
///
/// Pure given its inputs: candidates arrive already unit-normalized and in
/// provider priority order, so the outcome is deterministic regardless of
/// how fetches completed.
pub struct Consolidator {
    config: ConsolidationConfig,
}

impl Consolidator {
    pub fn new(config: ConsolidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Consolidator { config })
    }

    /// Decide every priceable field for one entry. Coverage is total: one
    /// decision per field, even when nothing priced it.
    pub fn consolidate_entry(
        &self,
        entry: &CatalogEntry,
        candidates: &[ProviderCandidate],
    ) -> Vec<PricingDecision> {
        PriceField::ALL
            .iter()
            .map(|field| self.decide_field(entry, *field, candidates))
            .collect()
    }

    fn decide_field(
        &self,
        entry: &CatalogEntry,
        field: PriceField,
        candidates: &[ProviderCandidate],
    ) -> PricingDecision {
        // A listed value of zero means the catalog did not price the field.
        let listed = entry
            .listed
            .get(field)
            .filter(|value| *value > Decimal::ZERO);

        let mut assessments: Vec<CandidateAssessment> = Vec::with_capacity(candidates.len());
        let mut winner: Option<(usize, Decimal)> = None;

        for candidate in candidates {
            let Some(value) = candidate.prices.get(field) else {
                assessments.push(CandidateAssessment::missing(candidate.provider.clone()));
                continue;
            };

            let mut assessment = CandidateAssessment::valid(candidate.provider.clone(), value);
            if value <= Decimal::ZERO {
                assessment.reject(ReasonCode::ZeroPrice);
            }
            if let Some(listed) = listed {
                if value < listed {
                    assessment.reject(ReasonCode::CatalogPricier);
                }
            }
            if assessment.status == CandidateStatus::Accepted && winner.is_none() {
                winner = Some((assessments.len(), value));
            }
            assessments.push(assessment);
        }

        match winner {
            Some((winner_index, accepted)) => {
                self.flag_conflicts(&mut assessments, winner_index, accepted);
                let provider = assessments[winner_index].provider.clone();
                PricingDecision {
                    entry_id: entry.id.clone(),
                    field,
                    accepted: Some(accepted),
                    accepted_per_million: per_million(field, Some(accepted)),
                    source: DecisionSource::Provider(provider),
                    status: DecisionStatus::Accepted,
                    reason: ReasonCode::ProviderValidated,
                    candidates: assessments,
                }
            }
            None => {
                // The catalog keeps its own price; the reason records the
                // strongest rejection the providers produced.
                let reason = if assessments
                    .iter()
                    .any(|a| a.reasons.contains(&ReasonCode::CatalogPricier))
                {
                    ReasonCode::CatalogPricier
                } else {
                    ReasonCode::NoProviderValidated
                };
                PricingDecision {
                    entry_id: entry.id.clone(),
                    field,
                    accepted: listed,
                    accepted_per_million: per_million(field, listed),
                    source: DecisionSource::Catalog,
                    status: DecisionStatus::Rejected,
                    reason,
                    candidates: assessments,
                }
            }
        }
    }

    /// Advisory pass: a still-valid lower-priority candidate that disagrees
    /// with the accepted value beyond the tolerance is flagged, but stays
    /// eligible - the highest-priority valid candidate already won.
    fn flag_conflicts(
        &self,
        assessments: &mut [CandidateAssessment],
        winner_index: usize,
        accepted: Decimal,
    ) {
        for (index, assessment) in assessments.iter_mut().enumerate() {
            if index <= winner_index || assessment.status != CandidateStatus::Accepted {
                continue;
            }
            let Some(value) = assessment.value else {
                continue;
            };
            if (value - accepted).abs() > self.config.conflict_tolerance {
                assessment.advise(ReasonCode::ConflictingProviders);
            }
        }
    }
}

fn per_million(field: PriceField, value: Option<Decimal>) -> Option<Decimal> {
    if !field.is_metered() {
        return None;
    }
    value.map(|value| value * pricewatch_reference_data::PER_MILLION)
}
