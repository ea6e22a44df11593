use std::borrow::Cow;
use std::sync::Arc;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Provider-specific catalog key discovered at runtime
pub type ProviderKey = Arc<str>;
