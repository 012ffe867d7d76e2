use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the rapporto workspace.
///
/// Variants carry the offending identifiers (symbol, interval, tag, provider)
/// so a presentation layer can render an actionable message without parsing
/// strings. Use [`RapportoError::kind`] to tell "no data" outcomes apart from
/// hard failures.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RapportoError {
    /// The range tag is not present in the configured range table.
    #[error("unknown range tag: {tag}")]
    UnknownRangeTag {
        /// Tag as supplied by the caller.
        tag: String,
    },

    /// The interval is unknown or not served by the selected provider.
    #[error("interval {interval} is not supported by {provider}")]
    UnsupportedInterval {
        /// Provider that rejected the interval.
        provider: String,
        /// Interval as supplied by the caller.
        interval: String,
    },

    /// No provider is registered under the requested exchange name.
    #[error("unknown exchange: {exchange}")]
    UnknownExchange {
        /// Exchange name as supplied by the caller.
        exchange: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The provider rejected the credentials attached to the request.
    #[error("{provider} rejected credentials: {msg}")]
    Auth {
        /// Provider name.
        provider: String,
        /// Provider-reported message.
        msg: String,
    },

    /// Transport failure talking to the provider, including timeouts.
    #[error("{provider} network error (timeout={timeout}): {msg}")]
    Network {
        /// Provider name.
        provider: String,
        /// Human-readable description of the failure.
        msg: String,
        /// True when the failure was a timeout.
        timeout: bool,
    },

    /// The provider throttled the request.
    #[error("{provider} rate limited the request (retry_after_ms={retry_after_ms:?})")]
    RateLimited {
        /// Provider name.
        provider: String,
        /// Provider hint for when to retry, in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// The provider refused the request for a non-transient reason (bad symbol, etc.).
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Provider-reported message.
        msg: String,
    },

    /// The provider response could not be interpreted.
    #[error("data issue: {0}")]
    Data(String),

    /// The provider returned zero records for a valid request.
    #[error("{provider} returned no klines for {symbol} at {interval}")]
    EmptyResult {
        /// Provider name.
        provider: String,
        /// Requested symbol.
        symbol: String,
        /// Requested interval code.
        interval: String,
    },

    /// The two series share no timestamps.
    #[error("{symbol_a} and {symbol_b} share no timestamps")]
    EmptyAlignment {
        /// Numerator symbol.
        symbol_a: String,
        /// Denominator symbol.
        symbol_b: String,
    },

    /// Every aligned point had a zero denominator.
    #[error("ratio {symbol_a}/{symbol_b} is undefined at every point ({excluded} excluded)")]
    DegenerateRatio {
        /// Numerator symbol.
        symbol_a: String,
        /// Denominator symbol.
        symbol_b: String,
        /// Number of points excluded for a zero denominator.
        excluded: usize,
    },
}

/// Coarse classification of a [`RapportoError`] for user-facing phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request itself is invalid (unknown tag, interval, exchange, or argument).
    Request,
    /// The request was valid but produced nothing to plot.
    NoData,
    /// The pipeline failed (credentials, network, provider, or payload).
    Hard,
}

impl RapportoError {
    /// Helper: build an `UnknownRangeTag` error.
    pub fn unknown_range_tag(tag: impl Into<String>) -> Self {
        Self::UnknownRangeTag { tag: tag.into() }
    }

    /// Helper: build an `UnsupportedInterval` error.
    pub fn unsupported_interval(provider: impl Into<String>, interval: impl Into<String>) -> Self {
        Self::UnsupportedInterval {
            provider: provider.into(),
            interval: interval.into(),
        }
    }

    /// Helper: build an `Auth` error.
    pub fn auth(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a non-timeout `Network` error.
    pub fn network(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            msg: msg.into(),
            timeout: false,
        }
    }

    /// Helper: build a `Network` error flagged as a timeout.
    pub fn timeout(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            msg: msg.into(),
            timeout: true,
        }
    }

    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(provider: impl Into<String>, retry_after_ms: Option<u64>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
            retry_after_ms,
        }
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `EmptyResult` error.
    pub fn empty_result(
        provider: impl Into<String>,
        symbol: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self::EmptyResult {
            provider: provider.into(),
            symbol: symbol.into(),
            interval: interval.into(),
        }
    }

    /// Map a non-success HTTP status from an exchange API to an error.
    ///
    /// 401/403 are credential failures, 418/429 throttling, 5xx transport-level
    /// trouble; every other status is the exchange refusing the request.
    pub fn from_http_status(
        provider: impl Into<String>,
        status: u16,
        retry_after_ms: Option<u64>,
        msg: impl Into<String>,
    ) -> Self {
        let provider = provider.into();
        let msg = msg.into();
        match status {
            401 | 403 => Self::Auth { provider, msg },
            418 | 429 => Self::RateLimited {
                provider,
                retry_after_ms,
            },
            500..=599 => Self::Network {
                provider,
                msg: format!("status {status}: {msg}"),
                timeout: false,
            },
            _ => Self::Provider {
                provider,
                msg: format!("status {status}: {msg}"),
            },
        }
    }

    /// Returns true for conditions worth retrying inside a provider.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }

    /// Returns true when the request was valid but there is nothing to plot.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(
            self,
            Self::EmptyResult { .. } | Self::EmptyAlignment { .. } | Self::DegenerateRatio { .. }
        )
    }

    /// Returns true when the failure was a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { timeout: true, .. })
    }

    /// Classify this error for user-facing phrasing.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownRangeTag { .. }
            | Self::UnsupportedInterval { .. }
            | Self::UnknownExchange { .. }
            | Self::InvalidArg(_) => ErrorKind::Request,
            Self::EmptyResult { .. } | Self::EmptyAlignment { .. } | Self::DegenerateRatio { .. } => {
                ErrorKind::NoData
            }
            Self::Auth { .. }
            | Self::Network { .. }
            | Self::RateLimited { .. }
            | Self::Provider { .. }
            | Self::Data(_) => ErrorKind::Hard,
        }
    }
}
