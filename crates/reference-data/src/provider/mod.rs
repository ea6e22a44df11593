//! Reference price providers.
//!
//! A static, closed set of reference catalogs the consolidator validates
//! against. Each variant owns an index built from a payload the caller
//! fetched; the engine itself never performs IO.

pub mod models_dev;
pub mod openrouter;
mod traits;

pub use models_dev::ModelsDevProvider;
pub use openrouter::OpenRouterProvider;
pub use traits::ReferencePriceProvider;
