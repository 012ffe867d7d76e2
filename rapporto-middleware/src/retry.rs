use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rapporto_core::{
    Interval, KlineProvider, Middleware, RapportoError, RetryConfig, Series, TimeWindow,
};

/// Add up to `jitter_percent` of `base_ms` at random on top of `base_ms`.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..jitter_range)
}

/// Provider wrapper that retries transient failures with bounded exponential backoff.
///
/// Only `Network` and `RateLimited` errors are retried. A `RateLimited` error
/// carrying a `retry_after_ms` hint waits for that long instead of the computed
/// backoff, capped at `max_backoff_ms`. The last error is returned unchanged
/// once `max_attempts` is exhausted.
pub struct RetryingProvider {
    inner: Arc<dyn KlineProvider>,
    cfg: RetryConfig,
}

impl RetryingProvider {
    /// Wrap `inner` with the given retry policy.
    #[must_use]
    pub const fn new(inner: Arc<dyn KlineProvider>, cfg: RetryConfig) -> Self {
        Self { inner, cfg }
    }

    /// The policy this wrapper applies.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.cfg
    }

    fn delay_for(&self, err: &RapportoError, retry: u32) -> Duration {
        let ms = match err {
            RapportoError::RateLimited {
                retry_after_ms: Some(hint),
                ..
            } => (*hint).min(self.cfg.max_backoff_ms),
            _ => jitter_wait(
                self.cfg.base_delay_ms(retry),
                u32::from(self.cfg.jitter_percent.min(100)),
            ),
        };
        Duration::from_millis(ms)
    }
}

#[async_trait]
impl KlineProvider for RetryingProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        self.inner.supported_intervals()
    }

    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Series, RapportoError> {
        let max_attempts = self.cfg.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.inner.klines(symbol, interval, window).await {
                Ok(series) => return Ok(series),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.delay_for(&err, attempt);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        provider = self.inner.name(),
                        symbol,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient provider error; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Middleware descriptor that installs a [`RetryingProvider`].
pub struct RetryMiddleware {
    /// Retry policy applied by the wrapper.
    pub config: RetryConfig,
}

impl RetryMiddleware {
    /// Create a retry layer with the given policy.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }
}

impl Middleware for RetryMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn KlineProvider>) -> Arc<dyn KlineProvider> {
        Arc::new(RetryingProvider::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "RetryingProvider"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_attempts": self.config.max_attempts,
            "min_backoff_ms": self.config.min_backoff_ms,
            "max_backoff_ms": self.config.max_backoff_ms,
            "factor": self.config.factor,
            "jitter_percent": self.config.jitter_percent,
        })
    }
}
