//! Catalog screening.
//!
//! Exclusion rules drop entries from the pipeline before any pricing work:
//! id prefix/suffix/keyword patterns, vendor matches, and an explicit id
//! list. Applied once, before overrides. Excluded entries are reported
//! alongside the snapshot rather than vanishing.

mod model;

pub use model::ExclusionRules;
