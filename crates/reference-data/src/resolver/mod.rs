//! Identifier resolution for reference providers.
//!
//! Resolution is pure given the current provider catalog state: an explicit
//! mapping key is used verbatim, `auto` infers by normalized-name matching
//! with a strict zero/one/many rule, and an absent or disabled mapping means
//! the entry is not a candidate for that provider.

mod key_resolver;
mod normalize;

pub use key_resolver::{resolve_key, ResolutionSource, ResolvedKey};
pub use normalize::{normalize_name, split_vendor};
