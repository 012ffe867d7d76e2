//! Provider metadata types usable across crates.

use core::fmt;

/// Typed key identifying a provider (and the exchange name callers select it by).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderKey(pub &'static str);

impl ProviderKey {
    /// Construct a new typed provider key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// True when `exchange` names this provider, ignoring ASCII case.
    #[must_use]
    pub fn matches(self, exchange: &str) -> bool {
        self.0.eq_ignore_ascii_case(exchange.trim())
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<ProviderKey> for &'static str {
    fn from(k: ProviderKey) -> Self {
        k.0
    }
}
