//! Rapporto computes the close-price ratio of two instruments traded on the same exchange.
//!
//! Overview
//! - Resolves a symbolic range tag ("1 month", "1 year", ...) into a concrete UTC window.
//! - Selects the registered `KlineProvider` whose name matches the requested exchange.
//! - Fetches both kline series concurrently, joins them on shared timestamps and divides
//!   the closes point by point.
//!
//! Key behaviors and trade-offs
//! - Interval validation happens before any network call; an interval the provider does
//!   not serve fails with `UnsupportedInterval` and no request is issued.
//! - Both fetches run inside one task with `tokio::try_join!`; the first failure drops
//!   the sibling future, cancelling its in-flight request.
//! - Each fetch is bounded by `fetch_timeout`. A timeout surfaces as
//!   `Network { timeout: true }`.
//! - The orchestrator never retries. Retry belongs to the provider stack
//!   (`BinanceProvider::new()` and `GateProvider::new()` wrap the raw provider with
//!   [`RetryingProvider`]).
//! - Aligned points with a zero denominator are excluded and counted in
//!   [`RatioReport::excluded`] rather than failing the request.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use rapporto::{Rapporto, RatioRequest};
//! use rapporto_binance::BinanceProvider;
//!
//! let binance = BinanceProvider::new().build();
//! let rapporto = Rapporto::builder()
//!     .with_provider(binance)
//!     .fetch_timeout(std::time::Duration::from_secs(20))
//!     .build()?;
//!
//! let req = RatioRequest::new("3 months", "1d", "binance", "ETHUSDT", "BTCUSDT");
//! let report = rapporto.run(&req).await?;
//! for p in &report.series {
//!     println!("{} {}", p.ts, p.ratio);
//! }
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod pipeline;

pub use core::{Rapporto, RapportoBuilder};

pub use rapporto_middleware::{ProviderBuilder, RetryMiddleware, RetryingProvider};

// Re-export core types for convenience
pub use rapporto_core::{
    AlignedPair, AlignedPoint, CalendarOffset, Decimal, ErrorKind, Interval, KlinePoint,
    KlineProvider, Middleware, MiddlewareLayer, MiddlewareStack, NormalizeStats, ProviderKey,
    RangeEntry, RangeTable, RapportoConfig, RapportoError, RatioOutcome, RatioPoint, RatioReport,
    RatioRequest, RatioSeries, RetryConfig, Series, TimeWindow, align, compute_ratio,
};
