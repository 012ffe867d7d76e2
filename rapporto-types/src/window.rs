use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RapportoError;

/// Half-open UTC time window `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, rejecting empty or inverted bounds.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, RapportoError> {
        if start >= end {
            return Err(RapportoError::InvalidArg(format!(
                "time window start {start} must precede end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True when `ts` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }

    /// Start as Unix milliseconds.
    #[must_use]
    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// End as Unix milliseconds.
    #[must_use]
    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// Last whole millisecond that starts before `end`.
    ///
    /// For upper bounds that are inclusive on the wire. A sub-millisecond `end`
    /// keeps its truncated millisecond, which still opens inside the window.
    #[must_use]
    pub fn last_ms(&self) -> i64 {
        let ms = self.end.timestamp_millis();
        if self.end.timestamp_subsec_nanos() % 1_000_000 == 0 {
            ms - 1
        } else {
            ms
        }
    }

    /// Last whole second that starts before `end`, same rounding as [`last_ms`](Self::last_ms).
    #[must_use]
    pub fn last_second(&self) -> i64 {
        let secs = self.end.timestamp();
        if self.end.timestamp_subsec_nanos() == 0 {
            secs - 1
        } else {
            secs
        }
    }
}

#[derive(Deserialize)]
struct RawWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawWindow::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
