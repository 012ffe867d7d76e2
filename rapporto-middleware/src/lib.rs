//! rapporto-middleware
//!
//! Provider wrappers and the builder that composes them.

mod builder;
mod retry;

pub use crate::builder::ProviderBuilder;
pub use crate::retry::{RetryMiddleware, RetryingProvider, jitter_wait};
