//! Rapporto-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod interval;
mod middleware;
mod range;
mod request;
mod window;

pub use config::{RapportoConfig, RetryConfig};
pub use connector::ProviderKey;
pub use error::{ErrorKind, RapportoError};
pub use interval::{Interval, ParseIntervalError};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use range::{CalendarOffset, RangeEntry, RangeTable};
pub use request::RatioRequest;
pub use window::TimeWindow;
