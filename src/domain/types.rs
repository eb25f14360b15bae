//! Shared value types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One closing price for one symbol on one trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(symbol: impl Into<String>, date: NaiveDate, close: f64) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            close,
        }
    }
}

/// Aggregates over the non-null closes of one column.
///
/// Every field is `None` for a column without values; `sd` is also `None`
/// when only one value exists (sample standard deviation is undefined).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub latest: Option<f64>,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sd: Option<f64>,
}

impl SummaryStats {
    /// Latest close relative to the mean, in percent.
    pub fn vs_average_pct(&self) -> Option<f64> {
        let (latest, mean) = (self.latest?, self.mean?);
        if mean == 0.0 {
            return None;
        }
        Some((latest - mean) / mean * 100.0)
    }
}
