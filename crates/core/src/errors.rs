use thiserror::Error;

use pricewatch_reference_data::ReferenceDataError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the pricing engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration validation failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot construction failed: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Reference data error: {0}")]
    Reference(#[from] ReferenceDataError),
}

/// Fatal configuration problems, detected before anything runs.
///
/// A malformed configuration aborts the run before any snapshot is written
/// or published - partial output is worse than no output.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Provider priority list contains an empty name")]
    EmptyProviderName,

    #[error("Provider '{0}' is listed more than once in the priority order")]
    DuplicatePriority(String),

    #[error("Exclusion rules contain an empty pattern")]
    EmptyExclusionPattern,

    #[error("Override for '{0}' must be a JSON object")]
    OverrideNotObject(String),

    #[error("Override for '{0}' must not modify listed prices")]
    OverrideTouchesPricing(String),

    #[error("Override for '{0}' must not change the entry id")]
    OverrideTouchesId(String),

    #[error("Override for '{0}' did not apply cleanly: {1}")]
    OverrideInvalid(String, String),

    #[error("Conflict tolerance must not be negative")]
    NegativeTolerance,
}

/// Snapshot invariant violations.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Duplicate entry id in snapshot: {0}")]
    DuplicateEntry(String),
}
