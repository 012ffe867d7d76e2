use std::time::Duration;

use rapporto::{CalendarOffset, Interval, RangeTable, Rapporto, RapportoConfig, RapportoError};
use rapporto_mock::MockProvider;

use crate::helpers::MockKlines;

#[test]
fn build_requires_a_provider() {
    let err = Rapporto::builder().build().err().unwrap();
    assert!(matches!(err, RapportoError::InvalidArg(_)));
}

#[test]
fn build_rejects_duplicate_exchange_names() {
    let err = Rapporto::builder()
        .with_provider(MockKlines::builder().name("binance").build())
        .with_provider(MockKlines::builder().name("Binance").build())
        .build()
        .err()
        .unwrap();
    match err {
        RapportoError::InvalidArg(msg) => assert!(msg.contains("binance"), "{msg}"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn build_rejects_zero_timeout() {
    let err = Rapporto::builder()
        .with_provider(MockKlines::builder().build())
        .fetch_timeout(Duration::ZERO)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, RapportoError::InvalidArg(_)));
}

#[test]
fn introspection_for_the_presentation_layer() {
    let r = Rapporto::builder()
        .with_provider(std::sync::Arc::new(MockProvider::with_name("binance")))
        .with_provider(
            MockKlines::builder()
                .name("gateio")
                .intervals(&[Interval::I1h, Interval::D1])
                .build(),
        )
        .build()
        .unwrap();

    assert_eq!(r.exchanges(), vec!["binance", "gateio"]);
    assert_eq!(
        r.range_tags().collect::<Vec<_>>(),
        vec!["1 day", "1 week", "1 month", "3 months", "6 months", "1 year", "2 years"]
    );
    assert_eq!(r.supported_intervals("GateIO").unwrap(), &[Interval::I1h, Interval::D1]);
    assert_eq!(r.supported_intervals("binance").unwrap().len(), Interval::ALL.len());
    assert_eq!(
        r.supported_intervals("kraken").unwrap_err(),
        RapportoError::UnknownExchange {
            exchange: "kraken".into()
        }
    );
}

#[test]
fn custom_ranges_and_config() {
    let ranges = RangeTable::empty().with_entry("48h", CalendarOffset::Hours(48));
    let r = Rapporto::builder()
        .with_provider(MockKlines::builder().build())
        .ranges(ranges.clone())
        .fetch_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    assert_eq!(r.range_tags().collect::<Vec<_>>(), vec!["48h"]);
    assert_eq!(r.config().fetch_timeout, Duration::from_secs(5));

    let cfg = RapportoConfig {
        ranges,
        fetch_timeout: Duration::from_millis(1_500),
    };
    let r = Rapporto::builder()
        .with_provider(MockKlines::builder().build())
        .config(cfg.clone())
        .build()
        .unwrap();
    assert_eq!(r.config(), &cfg);
}
