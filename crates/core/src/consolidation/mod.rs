//! Pricing consolidation.
//!
//! The consolidator arbitrates between the catalog's listed prices and the
//! reference provider candidates, producing one auditable
//! [`PricingDecision`] per priceable field of every entry.

mod model;
mod service;


pub use model::{
    CandidateAssessment, CandidateStatus, ConsolidationConfig, DecisionSource, DecisionStatus,
    PricingDecision, ReasonCode,
};
pub use service::Consolidator;
