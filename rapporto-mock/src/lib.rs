//! Offline kline providers for tests and demos.
//!
//! [`MockProvider`] serves deterministic synthetic closes for a handful of
//! known symbols. A few reserved symbols trigger specific failure modes:
//!
//! | symbol      | behavior |
//! |-------------|----------|
//! | `FAIL`      | `Provider` error |
//! | `AUTH`      | `Auth` error |
//! | `NET`       | `Network` error (transient) |
//! | `RATELIMIT` | `RateLimited` error with a 1s hint |
//! | `TIMEOUT`   | sleeps 60s before answering |
//! | `EMPTY`     | `EmptyResult` |
//! | `ZERO`      | every close is zero |
//! | `SHIFTED`   | timestamps offset by one second, so nothing aligns |
//!
//! [`DynamicMockProvider`] is scripted per symbol through a controller.

use std::time::Duration;

use async_trait::async_trait;
use rapporto_core::{Interval, KlineProvider, RapportoError, Series, TimeWindow, normalize};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};
pub use fixtures::MAX_POINTS;

/// Mock provider for CI-safe demos. Provides deterministic data from synthetic fixtures.
pub struct MockProvider {
    name: &'static str,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// A mock registered under the exchange name `"mock"`.
    #[must_use]
    pub const fn new() -> Self {
        Self { name: "mock" }
    }

    /// A mock registered under another exchange name, e.g. `"binance"`.
    #[must_use]
    pub const fn with_name(name: &'static str) -> Self {
        Self { name }
    }

    async fn maybe_fail_or_timeout(&self, symbol: &str) -> Result<(), RapportoError> {
        match symbol {
            "FAIL" => Err(RapportoError::provider(self.name, "forced failure: klines")),
            "AUTH" => Err(RapportoError::auth(self.name, "forced credential rejection")),
            "NET" => Err(RapportoError::network(self.name, "forced connection reset")),
            "RATELIMIT" => Err(RapportoError::rate_limited(self.name, Some(1_000))),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl KlineProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        Interval::ALL
    }

    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Series, RapportoError> {
        self.maybe_fail_or_timeout(symbol).await?;
        if symbol == "EMPTY" {
            return Err(RapportoError::empty_result(self.name, symbol, interval.code()));
        }
        let base = fixtures::base_price(symbol).ok_or_else(|| {
            RapportoError::provider(self.name, format!("unknown symbol {symbol}"))
        })?;
        let offset = if symbol == "SHIFTED" { 1 } else { 0 };
        let rows = fixtures::rows(symbol, base, interval, window, offset);
        Ok(normalize(self.name, symbol, interval, rows, window)?.series)
    }
}
