//! Configuration types shared across the orchestrator and provider middleware.

use std::time::Duration;

use crate::RangeTable;
use serde::{Deserialize, Serialize};

/// Bounded exponential backoff used by the retry middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first call (>= 1).
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub min_backoff_ms: u64,
    /// Upper bound on any single delay, in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor applied after each failed attempt (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_backoff_ms: 250,
            max_backoff_ms: 5_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (1-based), without jitter.
    #[must_use]
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 1..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                break;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Global configuration for the `Rapporto` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapportoConfig {
    /// Recognised range tags.
    pub ranges: RangeTable,
    /// Upper bound on each symbol fetch, retries included.
    pub fetch_timeout: Duration,
}

impl Default for RapportoConfig {
    fn default() -> Self {
        Self {
            ranges: RangeTable::default(),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}
