use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use rapporto_core::{Interval, KlineProvider, RapportoError, Series, TimeWindow};

/// Instruction for how a `klines` call should behave for a given symbol.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided series immediately.
    Return(Series),
    /// Fail immediately with the provided error.
    Fail(RapportoError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, VecDeque<MockBehavior>>,
    calls: HashMap<String, usize>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    in_flight: Arc<AtomicUsize>,
}

impl DynamicMockController {
    /// Answer every call for `symbol` with `behavior`.
    pub async fn set_behavior(&self, symbol: &str, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard
            .rules
            .insert(symbol.to_string(), VecDeque::from([behavior]));
    }

    /// Answer successive calls for `symbol` with `script` in order.
    ///
    /// The last behavior repeats once the script is exhausted.
    pub async fn set_script(&self, symbol: &str, script: Vec<MockBehavior>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(symbol.to_string(), script.into());
    }

    /// Number of `klines` calls observed for `symbol`.
    pub async fn calls(&self, symbol: &str) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(symbol).copied().unwrap_or(0)
    }

    /// Calls that have started but not yet finished or been dropped.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Mock provider whose behavior is scripted per symbol at runtime.
pub struct DynamicMockProvider {
    name: &'static str,
    intervals: &'static [Interval],
    state: Arc<Mutex<InternalState>>,
    in_flight: Arc<AtomicUsize>,
}

impl DynamicMockProvider {
    /// Create a provider registered as `name` and the controller that drives it.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        Self::with_intervals(name, Interval::ALL)
    }

    /// Like [`new_with_controller`](Self::new_with_controller) with a restricted interval set.
    #[must_use]
    pub fn with_intervals(
        name: &'static str,
        intervals: &'static [Interval],
    ) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(Self {
            name,
            intervals,
            state: Arc::clone(&state),
            in_flight: Arc::clone(&in_flight),
        });
        (provider, DynamicMockController { state, in_flight })
    }

    async fn next_behavior(&self, symbol: &str) -> Option<MockBehavior> {
        let mut guard = self.state.lock().await;
        *guard.calls.entry(symbol.to_string()).or_insert(0) += 1;
        let queue = guard.rules.get_mut(symbol)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl KlineProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supported_intervals(&self) -> &'static [Interval] {
        self.intervals
    }

    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        _window: TimeWindow,
    ) -> Result<Series, RapportoError> {
        let _guard = InFlight::enter(&self.in_flight);
        match self.next_behavior(symbol).await {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(RapportoError::empty_result(self.name, symbol, interval.code())),
        }
    }
}
