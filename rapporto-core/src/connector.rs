use async_trait::async_trait;

use crate::series::Series;
pub use rapporto_types::ProviderKey;
use rapporto_types::{Interval, RapportoError, TimeWindow};

/// A source of historical closing prices for one exchange.
///
/// Implementors supply `klines`, which performs the (paginated) network work
/// for an interval that is already known to be supported. Callers normally go
/// through [`KlineProvider::fetch`], which validates the symbol and the raw
/// interval code first so that a bad request never reaches the network.
#[async_trait]
pub trait KlineProvider: Send + Sync {
    /// Exchange name used for selection (e.g. `"binance"`, `"gateio"`).
    fn name(&self) -> &'static str;

    /// Canonical provider key constructed from the static name.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// REQUIRED: exact intervals this provider can natively serve.
    fn supported_intervals(&self) -> &'static [Interval];

    /// Parse a raw interval code and check it against [`Self::supported_intervals`].
    ///
    /// # Errors
    /// Returns `UnsupportedInterval` both for codes that are not intervals at
    /// all and for intervals this provider does not list.
    fn resolve_interval(&self, raw: &str) -> Result<Interval, RapportoError> {
        raw.trim()
            .parse::<Interval>()
            .ok()
            .filter(|iv| self.supported_intervals().contains(iv))
            .ok_or_else(|| RapportoError::unsupported_interval(self.name(), raw))
    }

    /// Fetch the closing-price series for `symbol` over `window`.
    ///
    /// The returned series is strictly increasing by timestamp, free of
    /// duplicates, and contained in `window`.
    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Series, RapportoError>;

    /// Validate the request, then delegate to [`Self::klines`].
    ///
    /// # Errors
    /// `InvalidArg` for an empty symbol, `UnsupportedInterval` for an interval
    /// the provider does not serve, otherwise whatever `klines` reports.
    async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        window: TimeWindow,
    ) -> Result<Series, RapportoError> {
        if symbol.trim().is_empty() {
            return Err(RapportoError::InvalidArg("symbol must not be empty".into()));
        }
        let interval = self.resolve_interval(interval)?;
        self.klines(symbol, interval, window).await
    }
}
