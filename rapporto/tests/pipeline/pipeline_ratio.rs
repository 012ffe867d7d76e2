use rapporto::{Interval, Rapporto, RatioRequest, TimeWindow};
use rapporto_core::{normalize, parse_row};
use rust_decimal::Decimal;
use serde_json::json;

use crate::helpers::{BTC, ETH, MockKlines, day, now, request, series};

const T1: i64 = 1_704_067_200; // 2024-01-01
const T2: i64 = T1 + 86_400;
const T3: i64 = T2 + 86_400;

#[tokio::test]
async fn zero_denominator_is_excluded_and_counted() {
    let mock = MockKlines::builder()
        .name("binance")
        .with_klines_fn(|symbol| {
            Ok(match symbol {
                "ETHUSDT" => series(symbol, "binance", &[(T1, "100"), (T2, "200")]),
                _ => series(symbol, "binance", &[(T1, "50"), (T2, "0")]),
            })
        })
        .build();
    let r = Rapporto::builder().with_provider(mock).build().unwrap();

    let report = r.run_at(&request("binance", ETH, BTC), now()).await.unwrap();
    assert_eq!(report.series.len(), 1);
    assert_eq!(report.series[0].ts.timestamp(), T1);
    assert_eq!(report.series[0].ratio, Decimal::from(2));
    assert_eq!(report.excluded, 1);
    assert_eq!(report.aligned, 2);
    assert!(report.is_partial());
}

#[tokio::test]
async fn report_describes_the_request() {
    let mock = MockKlines::builder()
        .name("gateio")
        .with_klines_fn(|symbol| {
            Ok(match symbol {
                "ETH_USDT" => series(symbol, "gateio", &[(T1, "3000"), (T2, "3300"), (T3, "3600")]),
                _ => series(symbol, "gateio", &[(T2, "60000"), (T3, "72000")]),
            })
        })
        .build();
    let r = Rapporto::builder()
        .with_provider(mock.clone())
        .build()
        .unwrap();

    let req = RatioRequest::new("1 Month", "1d", " GATEIO ", "ETH_USDT", "BTC_USDT");
    let report = r.run_at(&req, now()).await.unwrap();

    assert_eq!(report.exchange, "gateio");
    assert_eq!(report.interval, Interval::D1);
    assert_eq!(report.window.start(), day(2023, 12, 31));
    assert_eq!(report.window.end(), day(2024, 1, 31));
    assert_eq!((report.symbol_a.as_str(), report.symbol_b.as_str()), ("ETH_USDT", "BTC_USDT"));
    assert_eq!((report.points_a, report.points_b, report.aligned), (3, 2, 2));
    assert_eq!(report.excluded, 0);
    assert_eq!(
        report.series.iter().map(|p| p.ratio).collect::<Vec<_>>(),
        vec![Decimal::new(55, 3), Decimal::new(5, 2)]
    );

    // both fetches saw the resolved window and interval, symbols verbatim
    let mut calls = mock.calls();
    calls.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].symbol, "BTC_USDT");
    assert_eq!(calls[1].symbol, "ETH_USDT");
    assert!(calls.iter().all(|c| c.window == report.window && c.interval == Interval::D1));
}

#[tokio::test]
async fn report_serializes_for_the_ui() {
    let mock = MockKlines::builder()
        .with_klines_fn(|symbol| Ok(series(symbol, "mock", &[(T1, "1.5"), (T2, "3")])))
        .build();
    let r = Rapporto::builder().with_provider(mock).build().unwrap();
    let report = r.run_at(&request("mock", ETH, BTC), now()).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["exchange"], "mock");
    assert_eq!(json["excluded"], 0);
    assert_eq!(json["series"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn dropped_records_are_reported_per_symbol() {
    let mock = MockKlines::builder()
        .with_klines_fn(|symbol| {
            if symbol == BTC {
                return Ok(series(symbol, "mock", &[(T1, "10"), (T2, "20")]));
            }
            let rows = [
                json!([T1, "100"]),
                json!(["junk", "x"]),
                json!([T1, "150"]),
                json!([T2, "200"]),
            ];
            let window = TimeWindow::new(day(2023, 12, 31), day(2024, 1, 31))?;
            let parsed = rows.iter().map(|row| parse_row(row, 0, 1));
            Ok(normalize("mock", symbol, Interval::D1, parsed, window)?.series)
        })
        .build();
    let r = Rapporto::builder().with_provider(mock).build().unwrap();
    let report = r.run_at(&request("mock", ETH, BTC), now()).await.unwrap();

    assert_eq!(report.stats_a.received, 4);
    assert_eq!(report.stats_a.malformed, 1);
    assert_eq!(report.stats_a.duplicates, 1);
    assert_eq!(report.stats_b.received, 2);
    assert_eq!(report.stats_b.malformed + report.stats_b.duplicates, 0);
    assert_eq!(report.series[0].ratio, Decimal::from(10));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["stats_a"]["malformed"], 1);
}
