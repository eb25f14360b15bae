//! The reporter's chart set: combined trends, moving averages, overlay and
//! one chart per symbol.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use crate::domain::Symbol;
use crate::error::AppError;
use crate::io::PriceTable;
use crate::math::{MA_WINDOW, rolling_mean};
use crate::plot::chart::{LineChart, LineKind, Trace, render_line_chart};
use crate::plot::palette::symbol_color;

pub const TRENDS_FILE: &str = "stock_trends.png";
pub const MOVING_AVERAGE_FILE: &str = "fortnightly_moving_average.png";
pub const OVERLAY_FILE: &str = "stock_trends_with_ma.png";

const SIZE_COMBINED: (u32, u32) = (1400, 700);
const SIZE_OVERLAY: (u32, u32) = (1600, 800);
const SIZE_SINGLE: (u32, u32) = (1800, 900);

const UNIVERSE_TITLE: &str = "Major Australian Banks, Miners & Energy Companies";

/// Raw and smoothed closes for one symbol present in the table.
#[derive(Debug, Clone)]
pub struct SymbolSeries {
    pub symbol: Symbol,
    pub raw: Vec<Option<f64>>,
    pub moving_average: Vec<Option<f64>>,
}

/// Columns of `table` that belong to the universe, in universe order.
pub fn present_series(table: &PriceTable) -> Vec<SymbolSeries> {
    Symbol::ALL
        .into_iter()
        .filter_map(|symbol| {
            let raw = table.column(symbol.ticker())?;
            let moving_average = rolling_mean(&raw, MA_WINDOW);
            Some(SymbolSeries {
                symbol,
                raw,
                moving_average,
            })
        })
        .collect()
}

pub fn symbol_chart_file(symbol: Symbol) -> String {
    format!("{}_trend.png", symbol.ticker())
}

/// Render every chart into `dir` (created if missing) and return the paths
/// written.
pub fn render_all(dir: &Path, table: &PriceTable, series: &[SymbolSeries]) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create plots directory '{}': {e}", dir.display())))?;

    let dates = table.dates();
    let mut written = Vec::with_capacity(series.len() + 3);

    let path = dir.join(TRENDS_FILE);
    render_line_chart(
        &path,
        &LineChart {
            title: format!("Stock Price Trends: {UNIVERSE_TITLE}"),
            y_label: "Closing Price ($)",
            dates,
            traces: series
                .iter()
                .map(|s| trace(s.symbol.ticker().to_string(), s.symbol, LineKind::Solid, &s.raw))
                .collect(),
            size: SIZE_COMBINED,
            light_grid: false,
        },
    )?;
    written.push(path);

    let path = dir.join(MOVING_AVERAGE_FILE);
    render_line_chart(
        &path,
        &LineChart {
            title: format!("Fortnightly Moving Average: {UNIVERSE_TITLE}"),
            y_label: "14-Day Moving Average Price ($)",
            dates,
            traces: series
                .iter()
                .map(|s| trace(ma_label(s.symbol), s.symbol, LineKind::Solid, &s.moving_average))
                .collect(),
            size: SIZE_COMBINED,
            light_grid: false,
        },
    )?;
    written.push(path);

    let path = dir.join(OVERLAY_FILE);
    render_line_chart(
        &path,
        &LineChart {
            title: "Stock Prices with Fortnightly Moving Average Overlay".to_string(),
            y_label: "Price ($)",
            dates,
            traces: series.iter().flat_map(overlay_pair).collect(),
            size: SIZE_OVERLAY,
            light_grid: false,
        },
    )?;
    written.push(path);

    for s in series {
        let path = dir.join(symbol_chart_file(s.symbol));
        render_line_chart(
            &path,
            &LineChart {
                title: format!("Stock Price Trend with Moving Average: {}", s.symbol),
                y_label: "Closing Price ($)",
                dates,
                traces: overlay_pair(s).into_iter().collect(),
                size: SIZE_SINGLE,
                light_grid: true,
            },
        )?;
        written.push(path);
    }

    log::info!("Wrote {} charts to {}", written.len(), dir.display());
    Ok(written)
}

/// Raw (faded) plus moving average (dashed), sharing the symbol's color.
fn overlay_pair(s: &SymbolSeries) -> [Trace; 2] {
    [
        trace(format!("{} (Actual)", s.symbol), s.symbol, LineKind::Faded, &s.raw),
        trace(ma_label(s.symbol), s.symbol, LineKind::Dashed, &s.moving_average),
    ]
}

fn ma_label(symbol: Symbol) -> String {
    format!("{symbol} ({MA_WINDOW}-day MA)")
}

fn trace(label: String, symbol: Symbol, kind: LineKind, values: &[Option<f64>]) -> Trace {
    Trace {
        label,
        color: symbol_color(symbol),
        kind,
        values: values.to_vec(),
    }
}
