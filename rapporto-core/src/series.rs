use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rapporto_types::{Interval, RapportoError, TimeWindow};

use crate::timeseries::normalize::NormalizeStats;

/// One closing price at the open time of its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KlinePoint {
    /// Open time of the interval, UTC.
    pub ts: DateTime<Utc>,
    /// Closing price; finite and non-negative.
    pub close: Decimal,
}

/// Closing-price series for one symbol from one provider.
///
/// Points are strictly increasing by timestamp. The fields are private so the
/// ordering established at construction cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    symbol: String,
    provider: String,
    points: Vec<KlinePoint>,
    stats: NormalizeStats,
}

impl Series {
    /// Build a series from points that are already strictly increasing.
    ///
    /// # Errors
    /// Returns `Data` when two adjacent points are out of order or share a
    /// timestamp. Raw provider rows should go through
    /// [`normalize`](crate::timeseries::normalize::normalize) instead.
    pub fn new(
        symbol: impl Into<String>,
        provider: impl Into<String>,
        points: Vec<KlinePoint>,
    ) -> Result<Self, RapportoError> {
        if let Some(w) = points.windows(2).find(|w| w[0].ts >= w[1].ts) {
            return Err(RapportoError::Data(format!(
                "series points not strictly increasing at {}",
                w[1].ts
            )));
        }
        if let Some(p) = points.iter().find(|p| p.close.is_sign_negative()) {
            return Err(RapportoError::Data(format!(
                "negative close {} at {}",
                p.close, p.ts
            )));
        }
        let stats = NormalizeStats {
            received: points.len(),
            ..NormalizeStats::default()
        };
        Ok(Self {
            symbol: symbol.into(),
            provider: provider.into(),
            points,
            stats,
        })
    }

    pub(crate) const fn from_sorted(
        symbol: String,
        provider: String,
        points: Vec<KlinePoint>,
        stats: NormalizeStats,
    ) -> Self {
        Self {
            symbol,
            provider,
            points,
            stats,
        }
    }

    /// Symbol as requested from the provider.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Name of the provider that produced the series.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Points in increasing timestamp order.
    #[must_use]
    pub fn points(&self) -> &[KlinePoint] {
        &self.points
    }

    /// What normalization dropped or reordered while building the series.
    #[must_use]
    pub const fn stats(&self) -> NormalizeStats {
        self.stats
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the series and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<KlinePoint> {
        self.points
    }
}

/// Closing prices of two symbols at a shared timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPoint {
    /// Shared timestamp.
    pub ts: DateTime<Utc>,
    /// Close of the numerator symbol.
    pub close_a: Decimal,
    /// Close of the denominator symbol.
    pub close_b: Decimal,
}

/// Inner join of two series on exact timestamp equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// Numerator symbol.
    pub symbol_a: String,
    /// Denominator symbol.
    pub symbol_b: String,
    /// Joined points, strictly increasing by timestamp.
    pub points: Vec<AlignedPoint>,
}

impl AlignedPair {
    /// Number of joined points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the join is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `close_a / close_b` at one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioPoint {
    /// Shared timestamp.
    pub ts: DateTime<Utc>,
    /// Ratio of the two closes.
    pub ratio: Decimal,
}

/// Ratio series in increasing timestamp order.
pub type RatioSeries = Vec<RatioPoint>;

/// Result of [`compute_ratio`](crate::timeseries::ratio::compute_ratio).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioOutcome {
    /// Defined ratio points.
    pub series: RatioSeries,
    /// Points dropped because the denominator was zero or the quotient overflowed.
    pub excluded: usize,
}

/// Everything a presentation layer needs to draw and caption one ratio chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioReport {
    /// Exchange the data came from.
    pub exchange: String,
    /// Resolved interval.
    pub interval: Interval,
    /// Resolved time window.
    pub window: TimeWindow,
    /// Numerator symbol.
    pub symbol_a: String,
    /// Denominator symbol.
    pub symbol_b: String,
    /// The ratio series.
    pub series: RatioSeries,
    /// Aligned points excluded from `series`.
    pub excluded: usize,
    /// Number of aligned points before exclusion.
    pub aligned: usize,
    /// Points fetched for `symbol_a`.
    pub points_a: usize,
    /// Points fetched for `symbol_b`.
    pub points_b: usize,
    /// Raw records seen and dropped while normalizing `symbol_a`.
    pub stats_a: NormalizeStats,
    /// Raw records seen and dropped while normalizing `symbol_b`.
    pub stats_b: NormalizeStats,
}

impl RatioReport {
    /// True when some aligned points could not be plotted.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.excluded > 0
    }
}
