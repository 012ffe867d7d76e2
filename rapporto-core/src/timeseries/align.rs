use std::cmp::Ordering;

use crate::series::{AlignedPair, AlignedPoint, Series};
use rapporto_types::RapportoError;

/// Inner-join two series on exact timestamp equality.
///
/// Both inputs are strictly increasing, so a single forward pass over each
/// suffices. The output keeps the shared timestamps in increasing order.
///
/// # Errors
/// Returns `EmptyAlignment` when the series share no timestamp.
pub fn align(a: &Series, b: &Series) -> Result<AlignedPair, RapportoError> {
    let (pa, pb) = (a.points(), b.points());
    let mut points = Vec::with_capacity(pa.len().min(pb.len()));
    let (mut i, mut j) = (0, 0);

    while i < pa.len() && j < pb.len() {
        match pa[i].ts.cmp(&pb[j].ts) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                points.push(AlignedPoint {
                    ts: pa[i].ts,
                    close_a: pa[i].close,
                    close_b: pb[j].close,
                });
                i += 1;
                j += 1;
            }
        }
    }

    if points.is_empty() {
        return Err(RapportoError::EmptyAlignment {
            symbol_a: a.symbol().to_string(),
            symbol_b: b.symbol().to_string(),
        });
    }

    Ok(AlignedPair {
        symbol_a: a.symbol().to_string(),
        symbol_b: b.symbol().to_string(),
        points,
    })
}
