use chrono::{DateTime, Utc};
use rapporto_core::{RapportoError, RatioReport, RatioRequest, align, compute_ratio};

use crate::Rapporto;

fn require_symbol<'a>(symbol: &'a str, field: &str) -> Result<&'a str, RapportoError> {
    if symbol.trim().is_empty() {
        return Err(RapportoError::InvalidArg(format!("{field} must not be empty")));
    }
    Ok(symbol)
}

impl Rapporto {
    /// Run one ratio request against the current wall clock.
    ///
    /// # Errors
    /// See [`run_at`](Self::run_at).
    pub async fn run(&self, req: &RatioRequest) -> Result<RatioReport, RapportoError> {
        self.run_at(req, Utc::now()).await
    }

    /// Run one ratio request with the window anchored at `now`.
    ///
    /// Steps: resolve the range tag, select the provider, validate symbols and
    /// interval, fetch both series concurrently, align, divide.
    ///
    /// # Errors
    /// - `UnknownRangeTag`, `UnknownExchange`, `UnsupportedInterval` or `InvalidArg`
    ///   before any fetch is issued.
    /// - Whatever the provider returns for either symbol, unchanged; a fetch that
    ///   outlives `fetch_timeout` fails with `Network { timeout: true }`.
    /// - `EmptyAlignment` when the series share no timestamp and `DegenerateRatio`
    ///   when every shared point has a zero denominator.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapporto::run",
            skip_all,
            fields(
                exchange = %req.exchange,
                range = %req.range_tag,
                interval = %req.interval,
                symbol_a = %req.symbol_a,
                symbol_b = %req.symbol_b,
            ),
        )
    )]
    pub async fn run_at(
        &self,
        req: &RatioRequest,
        now: DateTime<Utc>,
    ) -> Result<RatioReport, RapportoError> {
        let window = self.cfg.ranges.resolve(&req.range_tag, now)?;
        let provider = self.provider(&req.exchange)?;
        let symbol_a = require_symbol(&req.symbol_a, "symbol_a")?;
        let symbol_b = require_symbol(&req.symbol_b, "symbol_b")?;
        let interval = provider.resolve_interval(&req.interval)?;

        let name = provider.name();
        let timeout = self.cfg.fetch_timeout;
        let (series_a, series_b) = tokio::try_join!(
            Self::provider_call_with_timeout(
                name,
                symbol_a,
                timeout,
                provider.klines(symbol_a, interval, window),
            ),
            Self::provider_call_with_timeout(
                name,
                symbol_b,
                timeout,
                provider.klines(symbol_b, interval, window),
            ),
        )?;

        let pair = align(&series_a, &series_b)?;
        let outcome = compute_ratio(&pair)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            points_a = series_a.len(),
            points_b = series_b.len(),
            aligned = pair.len(),
            excluded = outcome.excluded,
            "ratio computed"
        );

        Ok(RatioReport {
            exchange: name.to_string(),
            interval,
            window,
            symbol_a: symbol_a.to_string(),
            symbol_b: symbol_b.to_string(),
            series: outcome.series,
            excluded: outcome.excluded,
            aligned: pair.len(),
            points_a: series_a.len(),
            points_b: series_b.len(),
            stats_a: series_a.stats(),
            stats_b: series_b.stats(),
        })
    }
}
