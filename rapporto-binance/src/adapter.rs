use std::sync::Arc;

use async_trait::async_trait;
use rapporto_core::RapportoError;
use serde_json::Value;
use url::Url;

const PROVIDER: &str = "binance";

/// One page request against `GET /api/v3/klines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlinesQuery {
    /// Exchange symbol, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Binance interval code.
    pub interval: &'static str,
    /// Inclusive lower bound on open time, Unix milliseconds.
    pub start_ms: i64,
    /// Inclusive upper bound on open time, Unix milliseconds.
    pub end_ms: i64,
    /// Maximum rows per page.
    pub limit: usize,
}

/// Klines abstraction (so we can inject mocks in tests).
///
/// Returns the raw JSON rows of one page; parsing and pagination live in the provider.
#[async_trait]
pub trait BinanceKlines: Send + Sync {
    /// Fetch one page of kline rows.
    async fn klines(&self, query: &KlinesQuery) -> Result<Vec<Value>, RapportoError>;
}

/// Production adapter over the Binance spot REST API.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: String,
}

impl RealAdapter {
    /// Public Binance spot API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.binance.com";

    /// Use a fresh `reqwest::Client` against the public API.
    #[must_use]
    pub fn new_default() -> Self {
        Self::new(reqwest::Client::new())
    }

    /// Wrap a caller-configured client (proxies, API-key headers, timeouts).
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at another API root, e.g. a testnet or a local mock server.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base` is not an absolute URL.
    pub fn with_base_url(http: reqwest::Client, base: &str) -> Result<Self, RapportoError> {
        let parsed = Url::parse(base)
            .map_err(|e| RapportoError::InvalidArg(format!("invalid base url {base}: {e}")))?;
        Ok(Self {
            http,
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, q: &KlinesQuery) -> Result<Url, RapportoError> {
        Url::parse_with_params(
            &format!("{}/api/v3/klines", self.base),
            &[
                ("symbol", q.symbol.clone()),
                ("interval", q.interval.to_string()),
                ("startTime", q.start_ms.to_string()),
                ("endTime", q.end_ms.to_string()),
                ("limit", q.limit.to_string()),
            ],
        )
        .map_err(|e| RapportoError::InvalidArg(format!("invalid klines url: {e}")))
    }
}

fn map_transport_err(e: &reqwest::Error) -> RapportoError {
    if e.is_timeout() {
        RapportoError::timeout(PROVIDER, e.to_string())
    } else {
        RapportoError::network(PROVIDER, e.to_string())
    }
}

/// Retry-After is given in whole seconds.
fn retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|s| s.saturating_mul(1_000))
}

/// Binance error bodies look like `{"code": -1121, "msg": "Invalid symbol."}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl BinanceKlines for RealAdapter {
    async fn klines(&self, query: &KlinesQuery) -> Result<Vec<Value>, RapportoError> {
        let url = self.endpoint(query)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e))?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = retry_after_ms(resp.headers());
            let body = resp.text().await.unwrap_or_default();
            return Err(RapportoError::from_http_status(
                PROVIDER,
                status.as_u16(),
                retry_after,
                error_message(&body),
            ));
        }

        let body = resp.text().await.map_err(|e| map_transport_err(&e))?;
        serde_json::from_str::<Vec<Value>>(&body)
            .map_err(|e| RapportoError::Data(format!("{PROVIDER}: klines body is not a JSON array: {e}")))
    }
}

/* -------- Lightweight adapter constructors for tests and custom sources ------- */

impl dyn BinanceKlines {
    /// Build a `BinanceKlines` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn BinanceKlines>
    where
        F: Send + Sync + 'static + Fn(KlinesQuery) -> Result<Vec<Value>, RapportoError>,
    {
        struct FnKlines<F>(F);
        #[async_trait]
        impl<F> BinanceKlines for FnKlines<F>
        where
            F: Send + Sync + 'static + Fn(KlinesQuery) -> Result<Vec<Value>, RapportoError>,
        {
            async fn klines(&self, query: &KlinesQuery) -> Result<Vec<Value>, RapportoError> {
                (self.0)(query.clone())
            }
        }
        Arc::new(FnKlines(f))
    }
}
