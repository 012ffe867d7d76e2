use std::sync::Arc;
use std::time::Duration;

use rapporto_core::{Interval, KlineProvider, RangeTable, RapportoConfig, RapportoError};

/// Orchestrator that runs ratio requests against registered providers.
pub struct Rapporto {
    pub(crate) providers: Vec<Arc<dyn KlineProvider>>,
    pub(crate) cfg: RapportoConfig,
}

/// Builder for constructing a `Rapporto` orchestrator with custom configuration.
pub struct RapportoBuilder {
    providers: Vec<Arc<dyn KlineProvider>>,
    cfg: RapportoConfig,
}

impl Default for RapportoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RapportoBuilder {
    /// Create a new builder with the default range table and a 30s fetch timeout.
    ///
    /// Starts with no providers; register at least one via [`with_provider`](Self::with_provider).
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: RapportoConfig::default(),
        }
    }

    /// Register a provider. Requests select it by its `name()`.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn KlineProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Replace the range table.
    #[must_use]
    pub fn ranges(mut self, ranges: RangeTable) -> Self {
        self.cfg.ranges = ranges;
        self
    }

    /// Bound each symbol fetch, provider retries included.
    ///
    /// Set it above the provider's worst-case retry schedule, or retries will be
    /// cut short by the orchestrator.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = timeout;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: RapportoConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Rapporto` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider has been registered, if two providers
    /// share a name (compared ASCII case-insensitively), or if the fetch timeout is zero.
    pub fn build(self) -> Result<Rapporto, RapportoError> {
        if self.providers.is_empty() {
            return Err(RapportoError::InvalidArg(
                "no providers registered; add at least one via with_provider(...)".to_string(),
            ));
        }
        for (i, p) in self.providers.iter().enumerate() {
            if let Some(dup) = self.providers[..i]
                .iter()
                .find(|q| q.name().eq_ignore_ascii_case(p.name()))
            {
                return Err(RapportoError::InvalidArg(format!(
                    "providers {} and {} share an exchange name",
                    dup.name(),
                    p.name()
                )));
            }
        }
        if self.cfg.fetch_timeout.is_zero() {
            return Err(RapportoError::InvalidArg(
                "fetch_timeout must be positive".to_string(),
            ));
        }

        Ok(Rapporto {
            providers: self.providers,
            cfg: self.cfg,
        })
    }
}

impl Rapporto {
    /// Start building a new `Rapporto` instance.
    #[must_use]
    pub fn builder() -> RapportoBuilder {
        RapportoBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RapportoConfig {
        &self.cfg
    }

    /// Exchange names in registration order.
    #[must_use]
    pub fn exchanges(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Range tags accepted by [`run`](Self::run), in configuration order.
    pub fn range_tags(&self) -> impl Iterator<Item = &str> {
        self.cfg.ranges.tags()
    }

    /// Intervals served by `exchange`.
    ///
    /// # Errors
    /// Returns `UnknownExchange` if no provider is registered under that name.
    pub fn supported_intervals(&self, exchange: &str) -> Result<&'static [Interval], RapportoError> {
        Ok(self.provider(exchange)?.supported_intervals())
    }

    /// Provider registered under `exchange`, ASCII case-insensitive.
    pub(crate) fn provider(&self, exchange: &str) -> Result<&Arc<dyn KlineProvider>, RapportoError> {
        let wanted = exchange.trim();
        self.providers
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RapportoError::UnknownExchange {
                exchange: exchange.to_string(),
            })
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapporto::core::provider_call_with_timeout",
            skip_all,
            fields(
                provider = provider_name,
                symbol = %symbol,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider_name: &'static str,
        symbol: &str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, RapportoError>
    where
        Fut: core::future::Future<Output = Result<T, RapportoError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(RapportoError::timeout(
                provider_name,
                format!("{symbol}: no klines within {}ms", timeout.as_millis()),
            ))
        })
    }
}
