use std::sync::Arc;

use async_trait::async_trait;
use rapporto_core::RapportoError;
use serde_json::Value;
use url::Url;

const PROVIDER: &str = "gateio";

/// One chunk request against `GET /api/v4/spot/candlesticks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandlesQuery {
    /// Currency pair, e.g. `BTC_USDT`.
    pub currency_pair: String,
    /// Gate interval code (`7d` for weeks, `30d` for calendar months).
    pub interval: &'static str,
    /// Inclusive lower bound, Unix seconds.
    pub from: i64,
    /// Inclusive upper bound, Unix seconds.
    pub to: i64,
}

/// Candlesticks abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait GateCandles: Send + Sync {
    /// Fetch the raw candle rows for one chunk.
    async fn candles(&self, query: &CandlesQuery) -> Result<Vec<Value>, RapportoError>;
}

/// Production adapter over the Gate.io v4 spot REST API.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: String,
}

impl RealAdapter {
    /// Public Gate.io API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.gateio.ws";

    /// Use a fresh `reqwest::Client` against the public API.
    #[must_use]
    pub fn new_default() -> Self {
        Self::new(reqwest::Client::new())
    }

    /// Wrap a caller-configured client.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at another API root.
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

    fn endpoint(&self, q: &CandlesQuery) -> Result<Url, RapportoError> {
        Url::parse_with_params(
            &format!("{}/api/v4/spot/candlesticks", self.base),
            &[
                ("currency_pair", q.currency_pair.clone()),
                ("interval", q.interval.to_string()),
                ("from", q.from.to_string()),
                ("to", q.to.to_string()),
            ],
        )
        .map_err(|e| RapportoError::InvalidArg(format!("invalid candlesticks url: {e}")))
    }
}

fn map_transport_err(e: &reqwest::Error) -> RapportoError {
    if e.is_timeout() {
        RapportoError::timeout(PROVIDER, e.to_string())
    } else {
        RapportoError::network(PROVIDER, e.to_string())
    }
}

/// `Retry-After` in whole seconds, as milliseconds.
fn retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    let secs = headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()?;
    Some(secs.saturating_mul(1_000))
}

/// Gate error bodies look like `{"label": "INVALID_CURRENCY_PAIR", "message": "..."}`.
fn error_message(body: &str) -> String {
    let Ok(v) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    let label = v.get("label").and_then(Value::as_str);
    let message = v.get("message").and_then(Value::as_str);
    match (label, message) {
        (Some(l), Some(m)) => format!("{l}: {m}"),
        (Some(s), None) | (None, Some(s)) => s.to_string(),
        (None, None) => body.trim().to_string(),
    }
}

#[async_trait]
impl GateCandles for RealAdapter {
    async fn candles(&self, query: &CandlesQuery) -> Result<Vec<Value>, RapportoError> {
        let url = self.endpoint(query)?;
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
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
        serde_json::from_str::<Vec<Value>>(&body).map_err(|e| {
            RapportoError::Data(format!("{PROVIDER}: candlesticks body is not a JSON array: {e}"))
        })
    }
}

impl dyn GateCandles {
    /// Build a `GateCandles` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn GateCandles>
    where
        F: Send + Sync + 'static + Fn(CandlesQuery) -> Result<Vec<Value>, RapportoError>,
    {
        struct FnCandles<F>(F);
        #[async_trait]
        impl<F> GateCandles for FnCandles<F>
        where
            F: Send + Sync + 'static + Fn(CandlesQuery) -> Result<Vec<Value>, RapportoError>,
        {
            async fn candles(&self, query: &CandlesQuery) -> Result<Vec<Value>, RapportoError> {
                (self.0)(query.clone())
            }
        }
        Arc::new(FnCandles(f))
    }
}
