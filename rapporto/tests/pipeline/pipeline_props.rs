use std::collections::BTreeMap;

use proptest::prelude::*;
use rapporto::{Rapporto, RapportoError};

use crate::helpers::{BTC, ETH, MockKlines, now, request, series};

const DEC_31: i64 = 1_703_980_800; // 2023-12-31, window start for "1 month" at `now()`

/// Day offset -> close (0 allowed) for one side.
fn arb_side() -> impl Strategy<Value = BTreeMap<i64, u32>> {
    proptest::collection::btree_map(0i64..31, 0u32..5, 0..20)
}

fn to_points(side: &BTreeMap<i64, u32>) -> Vec<(i64, String)> {
    side.iter()
        .map(|(d, c)| (DEC_31 + d * 86_400, c.to_string()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn report_accounts_for_every_shared_timestamp(a in arb_side(), b in arb_side()) {
        let pa = to_points(&a);
        let pb = to_points(&b);
        let shared: Vec<i64> = a.keys().filter(|d| b.contains_key(d)).copied().collect();
        let nonzero = shared.iter().filter(|d| b[*d] != 0).count();

        let outcome = tokio_test::block_on(async move {
            let mock = MockKlines::builder()
                .with_klines_fn(move |s| {
                    let pts = if s == ETH { &pa } else { &pb };
                    if pts.is_empty() {
                        return Err(RapportoError::empty_result("mock", s, "1d"));
                    }
                    let refs: Vec<(i64, &str)> = pts.iter().map(|(t, c)| (*t, c.as_str())).collect();
                    Ok(series(s, "mock", &refs))
                })
                .build();
            let r = Rapporto::builder().with_provider(mock).build().unwrap();
            r.run_at(&request("mock", ETH, BTC), now()).await
        });

        match outcome {
            Ok(report) => {
                prop_assert_eq!(report.aligned, shared.len());
                prop_assert_eq!(report.series.len() + report.excluded, report.aligned);
                prop_assert_eq!(report.series.len(), nonzero);
                prop_assert!(report.series.windows(2).all(|w| w[0].ts < w[1].ts));
            }
            Err(RapportoError::EmptyResult { .. }) => prop_assert!(a.is_empty() || b.is_empty()),
            Err(RapportoError::EmptyAlignment { .. }) => prop_assert!(shared.is_empty()),
            Err(RapportoError::DegenerateRatio { excluded, .. }) => {
                prop_assert_eq!(nonzero, 0);
                prop_assert_eq!(excluded, shared.len());
            }
            Err(other) => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
