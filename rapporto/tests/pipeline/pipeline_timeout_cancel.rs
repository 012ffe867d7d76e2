use std::sync::Arc;
use std::time::Duration;

use rapporto::{Rapporto, RapportoError};
use rapporto_mock::{DynamicMockProvider, MockBehavior, MockProvider};

use crate::helpers::{BTC, ETH, MockKlines, now, request, series};

const T1: i64 = 1_704_067_200;

#[tokio::test(start_paused = true)]
async fn stalled_fetch_times_out_as_network_error() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("binance");
    ctl.set_behavior(ETH, MockBehavior::Return(series(ETH, "binance", &[(T1, "1")])))
        .await;
    ctl.set_behavior(BTC, MockBehavior::Hang).await;

    let r = Rapporto::builder()
        .with_provider(provider)
        .fetch_timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let err = r
        .run_at(&request("binance", ETH, BTC), now())
        .await
        .unwrap_err();
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(err.is_timeout(), "{err:?}");
    match err {
        RapportoError::Network { provider, msg, .. } => {
            assert_eq!(provider, "binance");
            assert!(msg.contains(BTC), "{msg}");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(ctl.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn first_failure_cancels_the_sibling_fetch() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("binance");
    ctl.set_behavior(ETH, MockBehavior::Hang).await;
    ctl.set_behavior(
        BTC,
        MockBehavior::Fail(RapportoError::auth("binance", "bad key")),
    )
    .await;

    let r = Rapporto::builder()
        .with_provider(provider)
        .fetch_timeout(Duration::from_secs(3_600))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let err = r
        .run_at(&request("binance", ETH, BTC), now())
        .await
        .unwrap_err();
    assert_eq!(err, RapportoError::auth("binance", "bad key"));
    // no waiting on the hung side
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(ctl.calls(ETH).await, 1);
    assert_eq!(ctl.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn fetches_run_concurrently() {
    let mock = MockKlines::builder()
        .delay(Duration::from_secs(4))
        .with_klines_fn(|s| Ok(series(s, "mock", &[(T1, "2")])))
        .build();
    let r = Rapporto::builder()
        .with_provider(mock)
        .fetch_timeout(Duration::from_secs(6))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let report = r.run_at(&request("mock", ETH, BTC), now()).await.unwrap();
    assert_eq!(report.series.len(), 1);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn reserved_timeout_symbol_hits_the_fetch_timeout() {
    let r = Rapporto::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .fetch_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let err = r
        .run_at(&request("mock", "TIMEOUT", BTC), now())
        .await
        .unwrap_err();
    assert!(err.is_timeout() && err.is_transient(), "{err:?}");
}
