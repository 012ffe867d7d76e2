use serde::{Deserialize, Serialize};

/// Inputs collected by the presentation layer for one ratio computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatioRequest {
    /// Range tag resolved against the configured `RangeTable`, e.g. `"1 month"`.
    pub range_tag: String,
    /// Canonical interval code, e.g. `"1h"`.
    pub interval: String,
    /// Exchange (provider) name, e.g. `"binance"`.
    pub exchange: String,
    /// Numerator symbol in the exchange's own notation.
    pub symbol_a: String,
    /// Denominator symbol in the exchange's own notation.
    pub symbol_b: String,
}

impl RatioRequest {
    /// Convenience constructor.
    pub fn new(
        range_tag: impl Into<String>,
        interval: impl Into<String>,
        exchange: impl Into<String>,
        symbol_a: impl Into<String>,
        symbol_b: impl Into<String>,
    ) -> Self {
        Self {
            range_tag: range_tag.into(),
            interval: interval.into(),
            exchange: exchange.into(),
            symbol_a: symbol_a.into(),
            symbol_b: symbol_b.into(),
        }
    }
}
