use rapporto::{ErrorKind, Interval, Rapporto, RapportoError, RatioRequest};

use crate::helpers::{BTC, ETH, MockKlines, now, request, series};

const T1: i64 = 1_704_067_200;

fn rapporto_with(mock: std::sync::Arc<MockKlines>) -> Rapporto {
    Rapporto::builder().with_provider(mock).build().unwrap()
}

#[tokio::test]
async fn request_errors_issue_no_fetch() {
    let mock = MockKlines::builder()
        .name("binance")
        .intervals(&[Interval::I1m, Interval::I5m, Interval::I1h, Interval::D1])
        .with_klines_fn(|s| Ok(series(s, "binance", &[(T1, "1")])))
        .build();
    let r = rapporto_with(mock.clone());

    let cases = [
        (
            RatioRequest::new("1 fortnight", "1d", "binance", ETH, BTC),
            RapportoError::UnknownRangeTag {
                tag: "1 fortnight".into(),
            },
        ),
        (
            RatioRequest::new("1 month", "1d", "kraken", ETH, BTC),
            RapportoError::UnknownExchange {
                exchange: "kraken".into(),
            },
        ),
        (
            RatioRequest::new("1 month", "7m", "binance", ETH, BTC),
            RapportoError::UnsupportedInterval {
                provider: "binance".into(),
                interval: "7m".into(),
            },
        ),
        (
            // a canonical interval this provider does not serve
            RatioRequest::new("1 month", "1w", "binance", ETH, BTC),
            RapportoError::UnsupportedInterval {
                provider: "binance".into(),
                interval: "1w".into(),
            },
        ),
    ];
    for (req, want) in cases {
        let err = r.run_at(&req, now()).await.unwrap_err();
        assert_eq!(err, want);
        assert_eq!(err.kind(), ErrorKind::Request);
    }

    let err = r
        .run_at(&RatioRequest::new("1 month", "1d", "binance", ETH, "  "), now())
        .await
        .unwrap_err();
    assert!(matches!(err, RapportoError::InvalidArg(_)));

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn range_tag_is_checked_before_exchange() {
    let r = rapporto_with(MockKlines::builder().build());
    let err = r
        .run_at(&RatioRequest::new("nope", "1d", "kraken", ETH, BTC), now())
        .await
        .unwrap_err();
    assert!(matches!(err, RapportoError::UnknownRangeTag { .. }));
}

#[tokio::test]
async fn provider_errors_pass_through_unchanged() {
    let errors = [
        RapportoError::auth("mock", "API-key format invalid."),
        RapportoError::provider("mock", "Invalid symbol."),
        RapportoError::rate_limited("mock", Some(2_000)),
        RapportoError::network("mock", "connection reset"),
        RapportoError::empty_result("mock", BTC, "1d"),
        RapportoError::Data("mock: candlesticks body is not a JSON array".into()),
    ];
    for want in errors {
        let fail = want.clone();
        let mock = MockKlines::builder()
            .with_klines_fn(move |s| {
                if s == BTC {
                    Err(fail.clone())
                } else {
                    Ok(series(s, "mock", &[(T1, "1")]))
                }
            })
            .build();
        let err = rapporto_with(mock)
            .run_at(&request("mock", ETH, BTC), now())
            .await
            .unwrap_err();
        assert_eq!(err, want);
    }
}

#[tokio::test]
async fn disjoint_series_fail_alignment() {
    let mock = MockKlines::builder()
        .with_klines_fn(|s| {
            Ok(if s == ETH {
                series(s, "mock", &[(T1, "1"), (T1 + 120, "2")])
            } else {
                series(s, "mock", &[(T1 + 60, "1"), (T1 + 180, "2")])
            })
        })
        .build();
    let err = rapporto_with(mock)
        .run_at(&request("mock", ETH, BTC), now())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RapportoError::EmptyAlignment {
            symbol_a: ETH.into(),
            symbol_b: BTC.into(),
        }
    );
    assert!(err.is_no_data());
}

#[tokio::test]
async fn all_zero_denominators_are_degenerate() {
    let mock = MockKlines::builder()
        .with_klines_fn(|s| {
            Ok(if s == ETH {
                series(s, "mock", &[(T1, "1"), (T1 + 86_400, "2")])
            } else {
                series(s, "mock", &[(T1, "0"), (T1 + 86_400, "0")])
            })
        })
        .build();
    let err = rapporto_with(mock)
        .run_at(&request("mock", ETH, BTC), now())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RapportoError::DegenerateRatio {
            symbol_a: ETH.into(),
            symbol_b: BTC.into(),
            excluded: 2,
        }
    );
}
