//! rapporto-binance
//!
//! `KlineProvider` over the Binance spot REST endpoint `GET /api/v3/klines`.
//! Rows are `[openTime(ms), open, high, low, close, volume, closeTime, ...]`;
//! only the open time and the close are read.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::{BinanceKlines, KlinesQuery, RealAdapter};
use async_trait::async_trait;
use rapporto_core::connector::ProviderKey;
use rapporto_core::{
    Interval, KlineProvider, RapportoError, Series, TimeWindow, normalize, parse_epoch, parse_row,
};
use serde_json::Value;

pub use builder::BinanceProviderBuilder;

const OPEN_TIME: usize = 0;
const CLOSE: usize = 4;

/// Public provider type. Production users will construct with `BinanceProvider::new()`.
pub struct BinanceProvider {
    klines: Arc<dyn BinanceKlines>,
}

impl BinanceProvider {
    /// Static provider key; also the exchange name callers select it by.
    pub const KEY: ProviderKey = ProviderKey::new("binance");

    /// Rows requested per page (the endpoint maximum).
    pub const PAGE_LIMIT: usize = 1_000;

    /// Upper bound on pages fetched for one request.
    pub const MAX_PAGES: usize = 2_000;

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

    /// Build from any adapter, e.g. one made with `<dyn BinanceKlines>::from_fn`.
    #[must_use]
    pub fn from_adapter(klines: Arc<dyn BinanceKlines>) -> Self {
        Self { klines }
    }

    /// Walk `[start, end)` page by page and return every raw row.
    async fn collect_rows(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Vec<Value>, RapportoError> {
        // endTime is inclusive on the wire
        let end_ms = window.last_ms();
        let mut cursor = window.start_ms();
        let mut rows = Vec::new();

        for _ in 0..Self::MAX_PAGES {
            let page = self
                .klines
                .klines(&KlinesQuery {
                    symbol: symbol.to_string(),
                    interval: interval.code(),
                    start_ms: cursor,
                    end_ms,
                    limit: Self::PAGE_LIMIT,
                })
                .await?;
            let full = page.len() >= Self::PAGE_LIMIT;
            let last_open = page
                .last()
                .and_then(|row| row.get(OPEN_TIME))
                .and_then(parse_epoch)
                .map(|ts| ts.timestamp_millis());
            rows.extend(page);

            if !full {
                return Ok(rows);
            }
            match last_open {
                Some(ts) if ts >= cursor => cursor = ts + 1,
                _ => return Ok(rows),
            }
            if cursor > end_ms {
                return Ok(rows);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            symbol,
            pages = Self::MAX_PAGES,
            "binance page cap reached; series truncated"
        );
        Ok(rows)
    }
}

#[async_trait]
impl KlineProvider for BinanceProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Binance"
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        Interval::ALL
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapporto_binance::klines",
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
        let parsed = rows.iter().map(|row| parse_row(row, OPEN_TIME, CLOSE));
        let out = normalize(self.name(), symbol, interval, parsed, window)?;
        Ok(out.series)
    }
}
