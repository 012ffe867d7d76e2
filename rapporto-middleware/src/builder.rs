//! Builder for composing providers with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw provider:
//!
//! ```text
//! Orchestrator
//!     ↓
//! Outermost Middleware (first to see the call, last to see the result)
//!     ↓
//! Retry (re-issues transient failures)
//!     ↓
//! Raw Provider (e.g., Binance - makes the actual API calls)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order, and
//! `build()` applies them in reverse so that `layers[0]` ends up outermost.
//! This matches [`MiddlewareStack`](rapporto_types::MiddlewareStack), where
//! `layers[0]` is also the outermost layer.

use std::sync::Arc;

use rapporto_core::{KlineProvider, Middleware};
use rapporto_types::{MiddlewareLayer, MiddlewareStack, RetryConfig};
use serde_json::{Value, json};

use crate::retry::RetryMiddleware;

const RETRY: &str = "RetryingProvider";

/// Generic middleware builder for composing a provider with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ProviderBuilder {
    raw: Arc<dyn KlineProvider>,
    layers: Vec<Box<dyn Middleware>>,
}

impl ProviderBuilder {
    /// Create a new builder from a raw, unwrapped provider.
    #[must_use]
    pub fn new(raw: Arc<dyn KlineProvider>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the retry layer.
    ///
    /// Retry sits at the outermost position so every inner layer is re-run on
    /// each attempt.
    #[must_use]
    pub fn with_retry(mut self, cfg: RetryConfig) -> Self {
        self.layers.retain(|m| m.name() != RETRY);
        self.layers.insert(0, Box::new(RetryMiddleware::new(cfg)));
        self
    }

    /// Remove retry if present.
    #[must_use]
    pub fn without_retry(mut self) -> Self {
        self.layers.retain(|m| m.name() != RETRY);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// The raw provider is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawProvider",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Construct a builder from a raw provider and an exported stack.
    ///
    /// Unknown layer names are ignored, and so is the `RawProvider` marker
    /// written by [`to_stack`](Self::to_stack).
    #[must_use]
    pub fn from_stack(raw: Arc<dyn KlineProvider>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            if l.name == RETRY {
                layers.push(Box::new(RetryMiddleware::new(retry_from_json(&l.config))));
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped provider according to the captured stack.
    ///
    /// With `layers = [Retry, Custom]` the result is `Retry(Custom(Raw))`.
    #[must_use]
    pub fn build(self) -> Arc<dyn KlineProvider> {
        let mut acc: Arc<dyn KlineProvider> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}

fn retry_from_json(cfg: &Value) -> RetryConfig {
    let defaults = RetryConfig::default();
    let u64_or = |key: &str, fallback: u64| cfg.get(key).and_then(Value::as_u64).unwrap_or(fallback);
    RetryConfig {
        max_attempts: u32::try_from(u64_or("max_attempts", u64::from(defaults.max_attempts)))
            .unwrap_or(defaults.max_attempts),
        min_backoff_ms: u64_or("min_backoff_ms", defaults.min_backoff_ms),
        max_backoff_ms: u64_or("max_backoff_ms", defaults.max_backoff_ms),
        factor: u32::try_from(u64_or("factor", u64::from(defaults.factor)))
            .unwrap_or(defaults.factor),
        jitter_percent: u8::try_from(u64_or("jitter_percent", u64::from(defaults.jitter_percent)))
            .unwrap_or(defaults.jitter_percent),
    }
}
