//! Middleware trait for wrapping `KlineProvider` implementations.

use std::sync::Arc;

use crate::connector::KlineProvider;

/// Trait implemented by provider middleware layers.
///
/// A middleware consumes an inner `KlineProvider` and returns a wrapped provider
/// that augments its behavior (e.g., retrying transient failures).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner provider and return the wrapped provider.
    fn apply(self: Box<Self>, inner: Arc<dyn KlineProvider>) -> Arc<dyn KlineProvider>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
