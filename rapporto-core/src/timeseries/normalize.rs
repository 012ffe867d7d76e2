use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::series::{KlinePoint, Series};
use rapporto_types::{Interval, RapportoError, TimeWindow};

const SECONDS_LIMIT: u64 = 100_000_000_000;
const MILLIS_LIMIT: u64 = 100_000_000_000_000;

/// Counters describing what [`normalize`] did to one raw batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Raw records handed in.
    pub received: usize,
    /// Records dropped for a missing or unparseable timestamp or close.
    pub malformed: usize,
    /// Records dropped because an earlier record had the same timestamp.
    pub duplicates: usize,
    /// Records dropped for falling outside the requested window.
    pub out_of_window: usize,
    /// Adjacent pairs the provider delivered in descending order.
    pub reordered: usize,
}

/// A normalized series together with its stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The clean series.
    pub series: Series,
    /// What was dropped or reordered on the way.
    pub stats: NormalizeStats,
}

/// Convert an epoch value to a UTC instant, detecting the unit by magnitude.
///
/// Values below `1e11` are seconds, below `1e14` milliseconds, anything larger
/// is microseconds. Returns `None` when the result is outside chrono's range.
#[must_use]
pub fn epoch_to_instant(value: i64) -> Option<DateTime<Utc>> {
    let magnitude = value.unsigned_abs();
    if magnitude < SECONDS_LIMIT {
        DateTime::from_timestamp(value, 0)
    } else if magnitude < MILLIS_LIMIT {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp_micros(value)
    }
}

/// Read an epoch timestamp from a JSON number or numeric string.
///
/// Fractional values are accepted only when they have no fractional part.
#[must_use]
pub fn parse_epoch(value: &Value) -> Option<DateTime<Utc>> {
    let raw = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    epoch_to_instant(raw)
}

/// Read a closing price from a JSON number or decimal string.
///
/// Negative prices and values that do not fit a `Decimal` (including
/// `NaN` and infinities) are rejected.
#[must_use]
pub fn parse_close(value: &Value) -> Option<Decimal> {
    let close = match value {
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()?
        }
        Value::Number(n) => match n.as_i64() {
            Some(i) => Decimal::from(i),
            None => Decimal::try_from(n.as_f64()?).ok()?,
        },
        _ => return None,
    };
    (!close.is_sign_negative() || close.is_zero()).then_some(close)
}

/// Extract the timestamp at `ts_idx` and the close at `close_idx` of an array row.
///
/// Returns `None` for anything that is not an array or is missing either field.
#[must_use]
pub fn parse_row(row: &Value, ts_idx: usize, close_idx: usize) -> Option<KlinePoint> {
    let cols = row.as_array()?;
    let ts = parse_epoch(cols.get(ts_idx)?)?;
    let close = parse_close(cols.get(close_idx)?)?;
    Some(KlinePoint { ts, close })
}

/// Turn raw provider records into a [`Series`].
///
/// `rows` yields `None` for each record that could not be parsed. Records
/// outside `window` are dropped, the rest are sorted stably by timestamp and
/// the first record of any duplicate run is kept.
///
/// # Errors
/// - `EmptyResult` when `rows` is empty or every parsed record lies outside the window.
/// - `Data` when every record was malformed.
pub fn normalize<I>(
    provider: &str,
    symbol: &str,
    interval: Interval,
    rows: I,
    window: TimeWindow,
) -> Result<Normalized, RapportoError>
where
    I: IntoIterator<Item = Option<KlinePoint>>,
{
    let mut stats = NormalizeStats::default();
    let mut points: Vec<KlinePoint> = Vec::new();
    let mut prev: Option<DateTime<Utc>> = None;

    for row in rows {
        stats.received += 1;
        let Some(point) = row else {
            stats.malformed += 1;
            continue;
        };
        if let Some(p) = prev
            && point.ts < p
        {
            stats.reordered += 1;
        }
        prev = Some(point.ts);
        if !window.contains(point.ts) {
            stats.out_of_window += 1;
            continue;
        }
        points.push(point);
    }

    if stats.received == 0 {
        return Err(RapportoError::empty_result(provider, symbol, interval.code()));
    }
    if stats.malformed == stats.received {
        return Err(RapportoError::Data(format!(
            "{provider}: all {} records for {symbol} were malformed",
            stats.received
        )));
    }
    if points.is_empty() {
        return Err(RapportoError::empty_result(provider, symbol, interval.code()));
    }

    if stats.reordered > 0 {
        points.sort_by_key(|p| p.ts);
    }
    let before = points.len();
    points.dedup_by_key(|p| p.ts);
    stats.duplicates = before - points.len();

    #[cfg(feature = "tracing")]
    if stats.malformed > 0 || stats.duplicates > 0 || stats.reordered > 0 {
        tracing::warn!(
            provider,
            symbol,
            malformed = stats.malformed,
            duplicates = stats.duplicates,
            reordered = stats.reordered,
            "normalized provider rows with anomalies"
        );
    }

    Ok(Normalized {
        series: Series::from_sorted(symbol.to_string(), provider.to_string(), points, stats),
        stats,
    })
}
