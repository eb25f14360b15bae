//! Per-column summary statistics.

use crate::domain::SummaryStats;

/// Summarize the present cells of a column.
///
/// `latest` is the last present value in row order. `sd` uses the sample
/// (n - 1) denominator.
pub fn summarize(values: &[Option<f64>]) -> SummaryStats {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let Some(&latest) = present.last() else {
        return SummaryStats::default();
    };

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sd = if present.len() > 1 {
        let variance = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(variance.sqrt())
    } else {
        None
    };

    SummaryStats {
        latest: Some(latest),
        mean: Some(mean),
        min: Some(min),
        max: Some(max),
        sd,
    }
}
