//! Symbolic time ranges ("1 month", "2 years") and their resolution into windows.

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{RapportoError, TimeWindow};

/// Amount of calendar time to subtract from "now".
///
/// Months and years use calendar arithmetic: the day of month is clamped to
/// the last valid day (`2024-03-31 - 1 month = 2024-02-29`). Days and weeks
/// subtract calendar days; hours subtract a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "count", rename_all = "snake_case")]
pub enum CalendarOffset {
    /// Whole hours.
    Hours(u32),
    /// Calendar days.
    Days(u32),
    /// Calendar weeks (seven days).
    Weeks(u32),
    /// Calendar months.
    Months(u32),
    /// Calendar years (twelve months).
    Years(u32),
}

impl CalendarOffset {
    const fn count(self) -> u32 {
        match self {
            Self::Hours(n) | Self::Days(n) | Self::Weeks(n) | Self::Months(n) | Self::Years(n) => n,
        }
    }

    /// Subtract this offset from `now`. Returns `None` when the result is out of range.
    #[must_use]
    pub fn subtract_from(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Hours(n) => now.checked_sub_signed(TimeDelta::try_hours(i64::from(n))?),
            Self::Days(n) => now.checked_sub_days(Days::new(u64::from(n))),
            Self::Weeks(n) => now.checked_sub_days(Days::new(u64::from(n) * 7)),
            Self::Months(n) => now.checked_sub_months(Months::new(n)),
            Self::Years(n) => now.checked_sub_months(Months::new(n.checked_mul(12)?)),
        }
    }
}

/// A single tag-to-offset mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEntry {
    /// Display tag, e.g. `"1 month"`.
    pub tag: String,
    /// Offset subtracted from "now" to obtain the window start.
    pub offset: CalendarOffset,
}

/// Ordered set of recognised range tags.
///
/// Tags match ignoring ASCII case and whitespace, so `"1 month"`, `"1month"`
/// and `"1 Month"` are the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    entries: Vec<RangeEntry>,
}

impl Default for RangeTable {
    fn default() -> Self {
        Self::empty()
            .with_entry("1 day", CalendarOffset::Days(1))
            .with_entry("1 week", CalendarOffset::Weeks(1))
            .with_entry("1 month", CalendarOffset::Months(1))
            .with_entry("3 months", CalendarOffset::Months(3))
            .with_entry("6 months", CalendarOffset::Months(6))
            .with_entry("1 year", CalendarOffset::Years(1))
            .with_entry("2 years", CalendarOffset::Years(2))
    }
}

fn canonical_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl RangeTable {
    /// A table with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace a tag.
    #[must_use]
    pub fn with_entry(mut self, tag: impl Into<String>, offset: CalendarOffset) -> Self {
        let tag = tag.into();
        let key = canonical_tag(&tag);
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| canonical_tag(&e.tag) == key)
        {
            existing.tag = tag;
            existing.offset = offset;
        } else {
            self.entries.push(RangeEntry { tag, offset });
        }
        self
    }

    /// Display tags in configuration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.tag.as_str())
    }

    /// Look up the offset configured for `tag`.
    #[must_use]
    pub fn offset(&self, tag: &str) -> Option<CalendarOffset> {
        let key = canonical_tag(tag);
        self.entries
            .iter()
            .find(|e| canonical_tag(&e.tag) == key)
            .map(|e| e.offset)
    }

    /// Resolve `tag` into the window `[now - offset, now)`.
    ///
    /// # Errors
    /// - `UnknownRangeTag` if `tag` is not in the table.
    /// - `InvalidArg` if the offset is zero or the arithmetic leaves chrono's range.
    pub fn resolve(&self, tag: &str, now: DateTime<Utc>) -> Result<TimeWindow, RapportoError> {
        let offset = self
            .offset(tag)
            .ok_or_else(|| RapportoError::unknown_range_tag(tag))?;
        if offset.count() == 0 {
            return Err(RapportoError::InvalidArg(format!(
                "range tag {tag} has a zero offset"
            )));
        }
        let start = offset.subtract_from(now).ok_or_else(|| {
            RapportoError::InvalidArg(format!("range tag {tag} is out of range for {now}"))
        })?;
        TimeWindow::new(start, now)
    }
}
