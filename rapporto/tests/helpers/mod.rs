// Re-export helpers so tests can `use crate::helpers::*;`
pub mod mock_provider;

pub use mock_provider::{Call, MockKlines};

use chrono::{DateTime, TimeZone, Utc};
use rapporto_core::{KlinePoint, RatioRequest, Series};
use rust_decimal::Decimal;

#[allow(dead_code)]
pub const BTC: &str = "BTCUSDT";
#[allow(dead_code)]
pub const ETH: &str = "ETHUSDT";

/// Construct a UTC `DateTime` at midnight for readability in tests.
pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Fixed clock used by `run_at` tests.
#[allow(dead_code)]
pub fn now() -> DateTime<Utc> {
    day(2024, 1, 31)
}

/// Build a series from `(unix seconds, close)` pairs.
pub fn series(symbol: &str, provider: &str, points: &[(i64, &str)]) -> Series {
    let points = points
        .iter()
        .map(|(t, c)| KlinePoint {
            ts: Utc.timestamp_opt(*t, 0).unwrap(),
            close: c.parse::<Decimal>().unwrap(),
        })
        .collect();
    Series::new(symbol, provider, points).unwrap()
}

/// Daily request over one month on `exchange`.
#[allow(dead_code)]
pub fn request(exchange: &str, a: &str, b: &str) -> RatioRequest {
    RatioRequest::new("1 month", "1d", exchange, a, b)
}
