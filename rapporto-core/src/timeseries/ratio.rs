use crate::series::{AlignedPair, RatioOutcome, RatioPoint};
use rapporto_types::RapportoError;

/// Divide `close_a` by `close_b` at every aligned timestamp.
///
/// A zero denominator, or a quotient that does not fit a `Decimal`, excludes
/// the point and counts it in `excluded`. The series is never padded with
/// placeholders, so `series.len() + excluded == pair.len()`.
///
/// # Errors
/// Returns `DegenerateRatio` when no point survives.
pub fn compute_ratio(pair: &AlignedPair) -> Result<RatioOutcome, RapportoError> {
    let mut series = Vec::with_capacity(pair.len());
    let mut excluded = 0usize;

    for p in &pair.points {
        match p.close_a.checked_div(p.close_b) {
            Some(ratio) => series.push(RatioPoint { ts: p.ts, ratio }),
            None => excluded += 1,
        }
    }

    if series.is_empty() {
        return Err(RapportoError::DegenerateRatio {
            symbol_a: pair.symbol_a.clone(),
            symbol_b: pair.symbol_b.clone(),
            excluded,
        });
    }

    #[cfg(feature = "tracing")]
    if excluded > 0 {
        tracing::debug!(
            symbol_a = %pair.symbol_a,
            symbol_b = %pair.symbol_b,
            excluded,
            "excluded ratio points with undefined quotient"
        );
    }

    Ok(RatioOutcome { series, excluded })
}
