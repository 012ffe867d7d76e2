use std::sync::Arc;

use rapporto::{Rapporto, RapportoError, RetryConfig};
use rapporto_mock::MockProvider;

use crate::helpers::{BTC, ETH, now, request};

fn rapporto() -> Rapporto {
    Rapporto::builder()
        .with_provider(Arc::new(MockProvider::with_name("binance")))
        .build()
        .unwrap()
}

#[tokio::test]
async fn one_month_of_daily_ratios() {
    let report = rapporto()
        .run_at(&request("binance", ETH, BTC), now())
        .await
        .unwrap();
    // 2023-12-31 .. 2024-01-30 inclusive
    assert_eq!(report.points_a, 31);
    assert_eq!(report.aligned, 31);
    assert_eq!(report.series.len(), 31);
    assert!(report.series.windows(2).all(|w| w[0].ts < w[1].ts));
    assert!(report.series.iter().all(|p| report.window.contains(p.ts)));
}

#[tokio::test]
async fn reserved_symbols_surface_through_the_pipeline() {
    let r = rapporto();
    assert!(matches!(
        r.run_at(&request("binance", ETH, "SHIFTED"), now()).await,
        Err(RapportoError::EmptyAlignment { .. })
    ));
    assert!(matches!(
        r.run_at(&request("binance", ETH, "ZERO"), now()).await,
        Err(RapportoError::DegenerateRatio { excluded: 31, .. })
    ));
    assert!(matches!(
        r.run_at(&request("binance", "EMPTY", BTC), now()).await,
        Err(RapportoError::EmptyResult { .. })
    ));
    assert!(matches!(
        r.run_at(&request("binance", ETH, "AUTH"), now()).await,
        Err(RapportoError::Auth { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn retry_layer_sits_below_the_orchestrator() {
    let raw: Arc<dyn rapporto::KlineProvider> = Arc::new(MockProvider::with_name("binance"));
    let provider = rapporto::ProviderBuilder::new(raw)
        .with_retry(RetryConfig {
            max_attempts: 2,
            ..RetryConfig::default()
        })
        .build();
    let r = Rapporto::builder().with_provider(provider).build().unwrap();

    // NET keeps failing; the retry layer gives up and the error passes through
    let err = r
        .run_at(&request("binance", ETH, "NET"), now())
        .await
        .unwrap_err();
    assert!(matches!(err, RapportoError::Network { timeout: false, .. }), "{err:?}");
}
