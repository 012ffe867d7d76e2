//! rapporto-core
//!
//! Core traits, the canonical series model, and the pure algorithms of the
//! price-ratio pipeline.
//!
//! - `connector`: the `KlineProvider` trait every exchange integration implements.
//! - `middleware`: the trait implemented by provider wrappers (retry).
//! - `series`: closing-price series, aligned pairs, ratio series and reports.
//! - `timeseries`: normalization of raw exchange rows, alignment, and the ratio.
//!
//! Async runtime
//! -------------
//! The provider trait is declared with `async_trait` and carries no runtime
//! types, but every provider shipped in this workspace expects Tokio 1.x.
#![warn(missing_docs)]

/// The `KlineProvider` capability trait.
pub mod connector;
/// Middleware trait implemented by provider wrappers.
pub mod middleware;
/// Canonical series model shared by providers and the orchestrator.
pub mod series;
/// Normalization, alignment and ratio computation.
pub mod timeseries;

pub use connector::KlineProvider;
pub use middleware::Middleware;
pub use series::{
    AlignedPair, AlignedPoint, KlinePoint, RatioOutcome, RatioPoint, RatioReport, RatioSeries,
    Series,
};
pub use timeseries::align::align;
pub use timeseries::normalize::{
    NormalizeStats, Normalized, epoch_to_instant, normalize, parse_close, parse_epoch, parse_row,
};
pub use timeseries::ratio::compute_ratio;

pub use rapporto_types::{
    CalendarOffset, ErrorKind, Interval, MiddlewareLayer, MiddlewareStack, ParseIntervalError,
    ProviderKey, RangeEntry, RangeTable, RapportoConfig, RapportoError, RatioRequest, RetryConfig,
    TimeWindow,
};

pub use rust_decimal::Decimal;
