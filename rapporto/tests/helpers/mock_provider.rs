#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rapporto_core::{Interval, KlineProvider, RapportoError, Series, TimeWindow};
use tokio::time::{Duration, sleep};

const DEFAULT_INTERVALS: &[Interval] = &[
    Interval::I1m,
    Interval::I5m,
    Interval::I1h,
    Interval::D1,
];

/// One observed `klines` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub symbol: String,
    pub interval: Interval,
    pub window: TimeWindow,
}

/// Closure-driven provider used by integration tests.
pub struct MockKlines {
    pub name: &'static str,
    pub intervals: &'static [Interval],
    pub delay_ms: u64,
    pub klines_fn: Arc<dyn Fn(&str) -> Result<Series, RapportoError> + Send + Sync>,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl MockKlines {
    pub fn builder() -> MockKlinesBuilder {
        MockKlinesBuilder {
            inner: Self {
                name: "mock",
                intervals: DEFAULT_INTERVALS,
                delay_ms: 0,
                klines_fn: Arc::new(|symbol| {
                    Err(RapportoError::provider("mock", format!("no fixture for {symbol}")))
                }),
                calls: Arc::new(Mutex::new(Vec::new())),
            },
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

pub struct MockKlinesBuilder {
    inner: MockKlines,
}

impl MockKlinesBuilder {
    pub fn name(mut self, name: &'static str) -> Self {
        self.inner.name = name;
        self
    }

    pub fn intervals(mut self, intervals: &'static [Interval]) -> Self {
        self.inner.intervals = intervals;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.inner.delay_ms = u64::try_from(d.as_millis()).unwrap();
        self
    }

    pub fn with_klines_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Series, RapportoError> + Send + Sync + 'static,
    {
        self.inner.klines_fn = Arc::new(f);
        self
    }

    pub fn build(self) -> Arc<MockKlines> {
        Arc::new(self.inner)
    }
}

#[async_trait]
impl KlineProvider for MockKlines {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        self.intervals
    }

    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        window: TimeWindow,
    ) -> Result<Series, RapportoError> {
        self.calls.lock().unwrap().push(Call {
            symbol: symbol.to_string(),
            interval,
            window,
        });
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        (self.klines_fn)(symbol)
    }
}
