use std::sync::Arc;

use rapporto::{KlineProvider, Rapporto, RapportoError};
use rapporto_binance::BinanceProvider;
use rapporto_gate::GateProvider;
use rapporto_mock::MockProvider;

/// Set to any value to run the demos offline against the mock provider.
pub const USE_MOCK_ENV: &str = "RAPPORTO_DEMOS_USE_MOCK";

/// Return one provider per supported exchange.
///
/// With `RAPPORTO_DEMOS_USE_MOCK` set, both exchange names are served by the
/// deterministic mock so the demos run without network access.
#[must_use]
pub fn get_providers() -> Vec<Arc<dyn KlineProvider>> {
    if std::env::var(USE_MOCK_ENV).is_ok() {
        println!("--- (Using mock providers for CI) ---");
        vec![
            Arc::new(MockProvider::with_name("binance")),
            Arc::new(MockProvider::with_name("gateio")),
        ]
    } else {
        vec![BinanceProvider::new().build(), GateProvider::new().build()]
    }
}

/// A `Rapporto` with every demo provider registered.
///
/// # Errors
/// Propagates `RapportoBuilder::build` failures.
pub fn build_rapporto() -> Result<Rapporto, RapportoError> {
    get_providers()
        .into_iter()
        .fold(Rapporto::builder(), |b, p| b.with_provider(p))
        .build()
}

/// Exchange-native spelling of a `BASE`/`QUOTE` pair.
#[must_use]
pub fn pair(exchange: &str, base: &str, quote: &str) -> String {
    if exchange.eq_ignore_ascii_case("gateio") {
        format!("{base}_{quote}")
    } else {
        format!("{base}{quote}")
    }
}
