//! Skip reason tracking for candidate gathering diagnostics.

use crate::models::{ProviderId, ProviderKey};

/// Why a provider contributed no candidate for an entry.
#[derive(Clone, Debug)]
pub enum SkipReason {
    /// The mapping has no entry for this provider.
    NotMapped,

    /// The mapping explicitly disables this provider.
    MappingDisabled,

    /// `auto` inference found no catalog match.
    Unresolved,

    /// `auto` inference matched more than one catalog key.
    Ambiguous { matches: usize },

    /// The resolved key is not present in the provider catalog.
    KeyNotInCatalog { key: ProviderKey },

    /// The catalog entry exists but carries no usable price fields.
    NoPriceFields { key: ProviderKey },
}

/// Record of a single provider's participation for one entry.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider_id: ProviderId,
    pub skipped: Option<SkipReason>,
    pub success: bool,
}

/// Per-entry diagnostics for provider candidate gathering.
///
/// Every provider in the priority order leaves exactly one attempt record,
/// so the audit trail accounts for absent candidates as well as present
/// ones.
#[derive(Clone, Debug, Default)]
pub struct ResolutionDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_skip(&mut self, provider_id: ProviderId, reason: SkipReason) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: Some(reason),
            success: false,
        });
    }

    pub fn record_success(&mut self, provider_id: ProviderId) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            success: true,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|attempt| {
                if attempt.success {
                    format!("{}: CANDIDATE", attempt.provider_id)
                } else if let Some(skip) = &attempt.skipped {
                    format!("{}: SKIPPED ({:?})", attempt.provider_id, skip)
                } else {
                    format!("{}: UNKNOWN", attempt.provider_id)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Check if any provider contributed a candidate.
    pub fn has_candidates(&self) -> bool {
        self.attempts.iter().any(|attempt| attempt.success)
    }

    /// Get all skip reasons.
    pub fn skip_reasons(&self) -> Vec<(&ProviderId, &SkipReason)> {
        self.attempts
            .iter()
            .filter_map(|attempt| attempt.skipped.as_ref().map(|skip| (&attempt.provider_id, skip)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_diagnostics_summary() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record_skip(Cow::Borrowed("openrouter"), SkipReason::NotMapped);
        diag.record_skip(
            Cow::Borrowed("models.dev"),
            SkipReason::KeyNotInCatalog {
                key: Arc::from("openai/gpt-5"),
            },
        );
        diag.record_success(Cow::Borrowed("helicone"));

        let summary = diag.summary();
        assert!(summary.contains("openrouter: SKIPPED"));
        assert!(summary.contains("models.dev: SKIPPED"));
        assert!(summary.contains("helicone: CANDIDATE"));
    }

    #[test]
    fn test_has_candidates() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record_skip(Cow::Borrowed("openrouter"), SkipReason::MappingDisabled);
        assert!(!diag.has_candidates());

        diag.record_success(Cow::Borrowed("models.dev"));
        assert!(diag.has_candidates());
    }

    #[test]
    fn test_skip_reasons() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record_skip(Cow::Borrowed("a"), SkipReason::Unresolved);
        diag.record_skip(Cow::Borrowed("b"), SkipReason::Ambiguous { matches: 2 });
        diag.record_success(Cow::Borrowed("c"));

        assert_eq!(diag.skip_reasons().len(), 2);
    }
}
