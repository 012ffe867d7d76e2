//! rapporto-gate
//!
//! `KlineProvider` over the Gate.io v4 endpoint `GET /api/v4/spot/candlesticks`.
//! Rows are `[t(seconds), quote_volume, close, high, low, open, base_volume, closed]`,
//! all as strings; only `t` and `close` are read.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::{CandlesQuery, GateCandles, RealAdapter};
use async_trait::async_trait;
use rapporto_core::connector::ProviderKey;
use rapporto_core::{
    Interval, KlineProvider, RapportoError, Series, TimeWindow, normalize, parse_row,
};
use serde_json::Value;

pub use builder::GateProviderBuilder;

const TS: usize = 0;
const CLOSE: usize = 2;

const GATE_INTERVALS: &[Interval] = &[
    Interval::I1m,
    Interval::I5m,
    Interval::I15m,
    Interval::I30m,
    Interval::I1h,
    Interval::I4h,
    Interval::I8h,
    Interval::D1,
    Interval::W1,
    Interval::M1,
];

/// Gate wire code and shortest bucket length in seconds for a supported interval.
///
/// Gate's `30d` bucket is one calendar month, so its step is the shortest
/// month; a chunk of `CHUNK_POINTS` steps then never spans more buckets.
fn wire(interval: Interval) -> Option<(&'static str, i64)> {
    match interval {
        Interval::W1 => Some(("7d", 7 * 86_400)),
        Interval::M1 => Some(("30d", 28 * 86_400)),
        iv if GATE_INTERVALS.contains(&iv) => iv.seconds().map(|s| (iv.code(), s)),
        _ => None,
    }
}

/// Public provider type. Production users will construct with `GateProvider::new()`.
pub struct GateProvider {
    candles: Arc<dyn GateCandles>,
}

impl GateProvider {
    /// Static provider key; also the exchange name callers select it by.
    pub const KEY: ProviderKey = ProviderKey::new("gateio");

    /// Buckets requested per chunk; Gate rejects from/to spans over 1000 points.
    pub const CHUNK_POINTS: i64 = 999;

    /// Upper bound on chunks fetched for one request.
    pub const MAX_CHUNKS: usize = 2_000;

    /// Build with a fresh `reqwest::Client` against the public API.
    #[must_use]
    pub fn new_default() -> Self {
        Self::from_adapter(Arc::new(RealAdapter::new_default()))
    }

    /// Build from a caller-configured `reqwest::Client`.
    #[must_use]
    pub fn new_with_client(http: reqwest::Client) -> Self {
        Self::from_adapter(Arc::new(RealAdapter::new(http)))
    }

    /// Build from any adapter, e.g. one made with `<dyn GateCandles>::from_fn`.
    #[must_use]
    pub fn from_adapter(candles: Arc<dyn GateCandles>) -> Self {
        Self { candles }
    }

    /// Split `[start, end)` into spans Gate accepts and collect every raw row.
    async fn collect_rows(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Vec<Value>, RapportoError> {
        let (code, step) = wire(interval)
            .ok_or_else(|| RapportoError::unsupported_interval(self.name(), interval.code()))?;
        let span = step * Self::CHUNK_POINTS;
        // exclusive bound in whole seconds, rounded up
        let end = window.last_second() + 1;
        let mut from = window.start().timestamp();
        let mut rows = Vec::new();

        for _ in 0..Self::MAX_CHUNKS {
            if from >= end {
                return Ok(rows);
            }
            let chunk_end = (from + span).min(end);
            let chunk = self
                .candles
                .candles(&CandlesQuery {
                    currency_pair: symbol.to_string(),
                    interval: code,
                    from,
                    // `to` is inclusive on the wire
                    to: chunk_end - 1,
                })
                .await?;
            rows.extend(chunk);
            from = chunk_end;
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            symbol,
            chunks = Self::MAX_CHUNKS,
            "gateio chunk cap reached; series truncated"
        );
        Ok(rows)
    }
}

#[async_trait]
impl KlineProvider for GateProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Gate.io"
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        GATE_INTERVALS
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapporto_gate::klines",
            skip_all,
            fields(symbol = %symbol, interval = %interval),
        )
    )]
    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Series, RapportoError> {
        let rows = self.collect_rows(symbol, interval, window).await?;
        let parsed = rows.iter().map(|row| parse_row(row, TS, CLOSE));
        let out = normalize(self.name(), symbol, interval, parsed, window)?;
        Ok(out.series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_interval_has_a_wire_code() {
        for iv in GATE_INTERVALS {
            assert!(wire(*iv).is_some(), "{iv}");
        }
        assert_eq!(wire(Interval::W1).map(|w| w.0), Some("7d"));
        assert_eq!(wire(Interval::M1).map(|w| w.0), Some("30d"));
        assert_eq!(wire(Interval::I3m), None);
        assert_eq!(wire(Interval::D3), None);
    }
}
