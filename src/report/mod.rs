//! Reporting utilities: per-symbol statistics and terminal output.

use std::collections::BTreeMap;

use crate::domain::SummaryStats;
use crate::math::summarize;
use crate::plot::SymbolSeries;

pub mod format;

pub use format::*;

/// Summary statistics for every present symbol, keyed by ticker.
pub fn compute_stats(series: &[SymbolSeries]) -> BTreeMap<String, SummaryStats> {
    series
        .iter()
        .map(|s| (s.symbol.ticker().to_string(), summarize(&s.raw)))
        .collect()
}
