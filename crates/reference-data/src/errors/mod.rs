//! Error types for the reference-data crate.

use thiserror::Error;

/// Errors that can occur on the reference-data surface.
///
/// Resolution failures are degraded results: the registry records them as
/// skip reasons and the affected entry proceeds with catalog-only pricing.
/// Everything else is a construction-time failure the caller must handle
/// before a run starts.
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    /// `auto` inference found no match in the provider catalog.
    #[error("No {provider} catalog match for entry '{entry}'")]
    UnresolvedIdentifier {
        /// The provider whose catalog was searched
        provider: String,
        /// The catalog entry being resolved
        entry: String,
    },

    /// `auto` inference matched more than one provider catalog key.
    /// The mapping must name an explicit key to disambiguate.
    #[error("Ambiguous {provider} catalog match for entry '{entry}': {matches} candidates")]
    AmbiguousIdentifier {
        /// The provider whose catalog was searched
        provider: String,
        /// The catalog entry being resolved
        entry: String,
        /// How many catalog keys matched
        matches: usize,
    },

    /// A provider payload did not match the expected catalog schema.
    #[error("Malformed {provider} catalog: {message}")]
    MalformedCatalog {
        /// The provider whose payload failed to parse
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The mapping configuration is structurally invalid.
    #[error("Invalid mapping configuration: {0}")]
    InvalidMapping(String),

    /// Two provider instances share an id.
    #[error("Duplicate provider: {0}")]
    DuplicateProvider(String),

    /// The priority list names a provider with no registered instance.
    #[error("Priority list names unknown provider: {0}")]
    UnknownProvider(String),
}

impl ReferenceDataError {
    /// True when the pipeline degrades and continues rather than aborting.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            ReferenceDataError::UnresolvedIdentifier { .. }
                | ReferenceDataError::AmbiguousIdentifier { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_failures_are_degraded() {
        let error = ReferenceDataError::UnresolvedIdentifier {
            provider: "openrouter".to_string(),
            entry: "gpt-5".to_string(),
        };
        assert!(error.is_degraded());

        let error = ReferenceDataError::AmbiguousIdentifier {
            provider: "models.dev".to_string(),
            entry: "gpt-5".to_string(),
            matches: 3,
        };
        assert!(error.is_degraded());
    }

    #[test]
    fn test_configuration_failures_are_fatal() {
        assert!(!ReferenceDataError::DuplicateProvider("openrouter".to_string()).is_degraded());
        assert!(!ReferenceDataError::UnknownProvider("ghost".to_string()).is_degraded());
        assert!(
            !ReferenceDataError::InvalidMapping("keys must be strings".to_string()).is_degraded()
        );
    }

    #[test]
    fn test_error_display() {
        let error = ReferenceDataError::AmbiguousIdentifier {
            provider: "openrouter".to_string(),
            entry: "gpt-5".to_string(),
            matches: 2,
        };
        assert_eq!(
            format!("{}", error),
            "Ambiguous openrouter catalog match for entry 'gpt-5': 2 candidates"
        );

        let error = ReferenceDataError::MalformedCatalog {
            provider: "models.dev".to_string(),
            message: "missing 'models' table".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Malformed models.dev catalog: missing 'models' table"
        );
    }
}
