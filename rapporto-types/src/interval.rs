//! Canonical kline sampling intervals.

use core::fmt;
use core::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Kline sampling interval in canonical form.
///
/// The canonical codes follow the common exchange convention (`"1m"`, `"1h"`,
/// `"1d"`, `"1w"`, `"1M"`). Providers translate to their own wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Interval {
    /// One minute.
    I1m,
    /// Three minutes.
    I3m,
    /// Five minutes.
    I5m,
    /// Fifteen minutes.
    I15m,
    /// Thirty minutes.
    I30m,
    /// One hour.
    I1h,
    /// Two hours.
    I2h,
    /// Four hours.
    I4h,
    /// Six hours.
    I6h,
    /// Eight hours.
    I8h,
    /// Twelve hours.
    I12h,
    /// One day.
    D1,
    /// Three days.
    D3,
    /// One week.
    W1,
    /// One calendar month.
    M1,
}

impl Interval {
    /// Every canonical interval, finest first.
    pub const ALL: &'static [Self] = &[
        Self::I1m,
        Self::I3m,
        Self::I5m,
        Self::I15m,
        Self::I30m,
        Self::I1h,
        Self::I2h,
        Self::I4h,
        Self::I6h,
        Self::I8h,
        Self::I12h,
        Self::D1,
        Self::D3,
        Self::W1,
        Self::M1,
    ];

    /// Canonical code, e.g. `"15m"` or `"1M"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::I1m => "1m",
            Self::I3m => "3m",
            Self::I5m => "5m",
            Self::I15m => "15m",
            Self::I30m => "30m",
            Self::I1h => "1h",
            Self::I2h => "2h",
            Self::I4h => "4h",
            Self::I6h => "6h",
            Self::I8h => "8h",
            Self::I12h => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
            Self::M1 => "1M",
        }
    }

    /// Fixed step in seconds. Calendar months have no fixed step and return `None`.
    #[must_use]
    pub const fn seconds(self) -> Option<i64> {
        let s = match self {
            Self::I1m => 60,
            Self::I3m => 180,
            Self::I5m => 300,
            Self::I15m => 900,
            Self::I30m => 1_800,
            Self::I1h => 3_600,
            Self::I2h => 7_200,
            Self::I4h => 14_400,
            Self::I6h => 21_600,
            Self::I8h => 28_800,
            Self::I12h => 43_200,
            Self::D1 => 86_400,
            Self::D3 => 259_200,
            Self::W1 => 604_800,
            Self::M1 => return None,
        };
        Some(s)
    }

    /// Fixed step as a `TimeDelta`, when the interval has one.
    #[must_use]
    pub fn step(self) -> Option<TimeDelta> {
        self.seconds().and_then(TimeDelta::try_seconds)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a string is not a canonical interval code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a canonical interval code: {0}")]
pub struct ParseIntervalError(pub String);

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|iv| iv.code() == code)
            .ok_or_else(|| ParseIntervalError(s.to_string()))
    }
}

impl From<Interval> for String {
    fn from(iv: Interval) -> Self {
        iv.code().to_string()
    }
}

impl TryFrom<String> for Interval {
    type Error = ParseIntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
