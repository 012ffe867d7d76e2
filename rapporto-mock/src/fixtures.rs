use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rapporto_core::{Interval, KlinePoint, TimeWindow};
use rust_decimal::Decimal;

/// Most recent points returned per request.
pub const MAX_POINTS: i64 = 1_000;

/// Reference price for a known symbol, in either Binance or Gate spelling.
pub fn base_price(symbol: &str) -> Option<Decimal> {
    let compact: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase();
    let price = match compact.as_str() {
        "BTCUSDT" => 60_000,
        "ETHUSDT" => 3_000,
        "BNBUSDT" => 550,
        "SOLUSDT" => 150,
        "ETHBTC" => return Some(Decimal::new(5, 2)),
        "ZERO" => 0,
        "SHIFTED" | "TIMEOUT" => 100,
        _ => return None,
    };
    Some(Decimal::from(price))
}

/// Open times of every interval bucket inside `window`, capped at the last
/// [`MAX_POINTS`] buckets.
pub fn bucket_starts(interval: Interval, window: TimeWindow) -> Vec<DateTime<Utc>> {
    match interval.seconds() {
        Some(step) => {
            let first = window.start().timestamp().div_euclid(step)
                + i64::from(window.start().timestamp().rem_euclid(step) != 0);
            // last bucket strictly before `end`
            let last = (window.end().timestamp() - 1).div_euclid(step);
            let first = first.max(last - MAX_POINTS + 1);
            (first..=last)
                .filter_map(|k| DateTime::from_timestamp(k * step, 0))
                .collect()
        }
        None => month_starts(window),
    }
}

fn month_starts(window: TimeWindow) -> Vec<DateTime<Utc>> {
    let start = window.start();
    let Some(mut cursor) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
    else {
        return Vec::new();
    };
    if cursor < start {
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }
    let mut out = Vec::new();
    while window.contains(cursor) {
        out.push(cursor);
        cursor = match cursor.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    out
}

/// Deterministic close for `symbol` at `ts`: the base price moved by up to ±5%.
pub fn close_at(symbol: &str, base: Decimal, ts: DateTime<Utc>) -> Decimal {
    let phase: i64 = symbol.bytes().map(i64::from).sum();
    let swing = (ts.timestamp() / 60 + phase).rem_euclid(11) - 5;
    base * Decimal::new(100 + swing, 2)
}

/// Build raw rows for `symbol`, shifting every timestamp by `offset_secs`.
pub fn rows(
    symbol: &str,
    base: Decimal,
    interval: Interval,
    window: TimeWindow,
    offset_secs: i64,
) -> Vec<Option<KlinePoint>> {
    bucket_starts(interval, window)
        .into_iter()
        .map(|ts| {
            let ts = DateTime::from_timestamp(ts.timestamp() + offset_secs, 0)?;
            Some(KlinePoint {
                ts,
                close: close_at(symbol, base, ts),
            })
        })
        .collect()
}
