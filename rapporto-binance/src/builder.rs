use std::sync::Arc;

use rapporto_core::{KlineProvider, RetryConfig};
use rapporto_middleware::ProviderBuilder;

use crate::BinanceProvider;

/// Builder type alias specialized for Binance providers.
pub type BinanceProviderBuilder = ProviderBuilder;

impl BinanceProvider {
    /// Returns a builder around the default provider with the default retry layer.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> BinanceProviderBuilder {
        Self::builder(Self::new_default())
    }

    /// Returns a builder around a caller-configured client with the default retry layer.
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> BinanceProviderBuilder {
        Self::builder(Self::new_with_client(http))
    }

    /// Expert-only: construct an unwrapped provider for manual composition.
    #[must_use]
    pub fn new_raw() -> Self {
        Self::new_default()
    }

    fn builder(raw: Self) -> BinanceProviderBuilder {
        let raw: Arc<dyn KlineProvider> = Arc::new(raw);
        ProviderBuilder::new(raw).with_retry(RetryConfig::default())
    }
}
