//! The two run pipelines behind the binaries.
//!
//! fetch:  upstream API -> long-form points -> pivoted table CSV
//! report: fetch child process -> table CSV -> charts + stats JSON
//!
//! Both take an explicit `Config` so tests can point them at scratch
//! directories and stand-in fetch executables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::data::HistoryClient;
use crate::domain::{PricePoint, SummaryStats, Symbol};
use crate::error::AppError;
use crate::io::{PriceTable, STATS_FILE_NAME, read_table_csv, write_table_csv, write_stats_json};
use crate::plot::{init_chart_font, present_series, render_all};
use crate::report::compute_stats;

/// Everything a reporter run wrote.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub table: PriceTable,
    pub stats: BTreeMap<String, SummaryStats>,
    pub charts: Vec<PathBuf>,
    pub stats_path: PathBuf,
}

/// Fetch every symbol and rewrite the table. Returns `None` when no symbol
/// produced data, in which case nothing is written.
pub fn fetch_and_store(config: &Config) -> Result<Option<PriceTable>, AppError> {
    let client = HistoryClient::new(config)?;
    let points = client.fetch_all(Symbol::ALL.iter().map(|s| s.ticker()));
    store_points(&config.table_path(), &points)
}

pub fn store_points(path: &Path, points: &[PricePoint]) -> Result<Option<PriceTable>, AppError> {
    if points.is_empty() {
        log::info!("No data collected; {} left untouched", path.display());
        return Ok(None);
    }

    let table = PriceTable::from_points(points);
    write_table_csv(path, &table)?;
    log::info!(
        "Saved pivoted table to {} ({} dates x {} symbols)",
        path.display(),
        table.dates().len(),
        table.symbols().len()
    );
    Ok(Some(table))
}

/// Refresh the table through the fetch executable, then build every output.
pub fn refresh_and_report(config: &Config) -> Result<ReportOutput, AppError> {
    run_fetcher(&config.fetch_bin)?;
    report_from_table(config)
}

/// Run the fetch executable with no arguments and wait for it.
pub fn run_fetcher(bin: &Path) -> Result<(), AppError> {
    log::info!("Refreshing price table via {}", bin.display());
    let status = Command::new(bin).status().map_err(|e| {
        AppError::fetch_child(format!("Failed to start fetcher '{}': {e}", bin.display()))
    })?;
    if !status.success() {
        return Err(AppError::fetch_child(format!(
            "Fetcher '{}' failed ({status}); no report produced.",
            bin.display()
        )));
    }
    Ok(())
}

/// Charts and stats from the table currently on disk.
pub fn report_from_table(config: &Config) -> Result<ReportOutput, AppError> {
    init_chart_font(config.chart_font.as_deref());

    let table = read_table_csv(&config.table_path())?;
    let series = present_series(&table);
    if series.is_empty() {
        log::warn!("Table has no tracked symbols; charts will be empty");
    }

    let charts = render_all(&config.plots_dir, &table, &series)?;

    let stats = compute_stats(&series);
    let stats_path = config.plots_dir.join(STATS_FILE_NAME);
    write_stats_json(&stats_path, &stats)?;
    log::info!("Saved statistics to {}", stats_path.display());

    Ok(ReportOutput {
        table,
        stats,
        charts,
        stats_path,
    })
}
