use std::sync::Arc;

use rapporto_core::{KlineProvider, RetryConfig};
use rapporto_middleware::ProviderBuilder;

use crate::GateProvider;

/// Builder type alias specialized for Gate.io providers.
pub type GateProviderBuilder = ProviderBuilder;

impl GateProvider {
    /// Returns a builder around the default provider with the default retry layer.
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> GateProviderBuilder {
        let raw: Arc<dyn KlineProvider> = Arc::new(Self::new_default());
        ProviderBuilder::new(raw).with_retry(RetryConfig::default())
    }

    /// Returns a builder around a caller-configured client with the default retry layer.
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> GateProviderBuilder {
        let raw: Arc<dyn KlineProvider> = Arc::new(Self::new_with_client(http));
        ProviderBuilder::new(raw).with_retry(RetryConfig::default())
    }

    /// Expert-only: construct an unwrapped provider for manual composition.
    #[must_use]
    pub fn new_raw() -> Self {
        Self::new_default()
    }
}
