//! Configured override patches.
//!
//! Overrides tag and annotate catalog entries without altering their price
//! fields: a patch object is deep-merged into the matched entry's serialized
//! form. Objects merge recursively key by key; scalars and sequences replace
//! wholesale.

mod model;

pub use model::{deep_merge, OverrideSet};
