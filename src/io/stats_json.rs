//! Read/write the per-symbol statistics snapshot (`stats.json`).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::{SummaryStats, Symbol};
use crate::error::AppError;

pub const STATS_FILE_NAME: &str = "stats.json";

/// Write `{ "<SYM>": {latest, mean, min, max, sd}, ... }`, pretty-printed.
///
/// Keys follow [`Symbol::ALL`]; tickers outside the universe come last.
pub fn write_stats_json(path: &Path, stats: &BTreeMap<String, SummaryStats>) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create stats JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(&mut file, &ordered(stats)?)
        .map_err(|e| AppError::io(format!("Failed to write stats JSON: {e}")))?;
    writeln!(file).map_err(|e| AppError::io(format!("Failed to write stats JSON: {e}")))?;

    Ok(())
}

pub fn read_stats_json(path: &Path) -> Result<BTreeMap<String, SummaryStats>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open stats JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid stats JSON: {e}")))
}

fn ordered(stats: &BTreeMap<String, SummaryStats>) -> Result<Map<String, Value>, AppError> {
    let universe = Symbol::ALL.iter().map(|s| s.ticker());
    let others = stats
        .keys()
        .map(String::as_str)
        .filter(|k| Symbol::from_ticker(k).is_none());

    let mut out = Map::new();
    for ticker in universe.chain(others) {
        let Some(s) = stats.get(ticker) else {
            continue;
        };
        let value = serde_json::to_value(s)
            .map_err(|e| AppError::io(format!("Failed to encode stats for {ticker}: {e}")))?;
        out.insert(ticker.to_string(), value);
    }
    Ok(out)
}
