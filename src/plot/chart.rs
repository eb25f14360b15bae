//! Plotters-powered date/price line charts written as PNG.
//!
//! A chart is a plain description (`LineChart`) built by the callers in
//! `plot::trends`; this module only draws. Text goes through the `ab_glyph`
//! font backend, which needs a font registered at runtime. Without one the
//! chart is still drawn, minus caption, axis labels and legend.

use std::error::Error;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use crate::error::AppError;

const FONT_FAMILY: &str = "sans-serif";

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Register the TTF at `path` as the chart font. Only the first call in a
/// process has any effect; later calls return the first outcome.
pub fn init_chart_font(path: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| load_font(path))
}

fn load_font(path: Option<&Path>) -> bool {
    match path {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => {
                // Plotters keeps a reference for the lifetime of the process.
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                    Ok(()) => {
                        log::debug!("Chart font loaded from {}", path.display());
                        true
                    }
                    Err(_) => {
                        log::warn!("Unusable chart font {}; charts will have no text", path.display());
                        false
                    }
                }
            }
            Err(e) => {
                log::warn!("Cannot read chart font {}: {e}; charts will have no text", path.display());
                false
            }
        },
        None => {
            log::warn!("No chart font found (set ASX_CHART_FONT); charts will have no text");
            false
        }
    }
}

fn text_enabled() -> bool {
    FONT_READY.get().copied().unwrap_or(false)
}

/// How a trace is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    /// Semi-transparent, for raw prices under an overlay.
    Faded,
    /// Bold dashed, for moving averages in an overlay.
    Dashed,
}

#[derive(Debug, Clone)]
pub struct Trace {
    pub label: String,
    pub color: RGBColor,
    pub kind: LineKind,
    /// Aligned with `LineChart::dates`; `None` breaks the line.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    pub title: String,
    pub y_label: &'a str,
    pub dates: &'a [NaiveDate],
    pub traces: Vec<Trace>,
    /// Pixel size (width, height).
    pub size: (u32, u32),
    pub light_grid: bool,
}

/// Draw `chart` to `path`, replacing any existing file.
pub fn render_line_chart(path: &Path, chart: &LineChart<'_>) -> Result<(), AppError> {
    draw(path, chart, text_enabled())
        .map_err(|e| AppError::render(format!("Failed to render chart '{}': {e}", path.display())))
}

fn draw(path: &Path, chart: &LineChart<'_>, text: bool) -> Result<(), Box<dyn Error>> {
    let (x0, x1) = x_bounds(chart.dates);
    let (y0, y1) = y_bounds(&chart.traces);

    let root = BitMapBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if text {
        builder
            .caption(&chart.title, (FONT_FAMILY, 26).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 60);
    }
    let mut ctx = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    if text {
        let grid_alpha = if chart.light_grid { 0.05 } else { 0.15 };
        ctx.configure_mesh()
            .x_desc("Date")
            .y_desc(chart.y_label)
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&|v| format_day(*v))
            .y_label_formatter(&|v| format!("{v:.2}"))
            .light_line_style(BLACK.mix(grid_alpha))
            .draw()?;
    }

    let mut labelled = false;
    for trace in &chart.traces {
        let style = match trace.kind {
            LineKind::Solid => trace.color.stroke_width(2),
            LineKind::Faded => trace.color.mix(0.6).stroke_width(2),
            LineKind::Dashed => trace.color.stroke_width(3),
        };

        for (i, run) in segments(chart.dates, &trace.values).into_iter().enumerate() {
            let anno = match trace.kind {
                LineKind::Dashed => ctx.draw_series(DashedLineSeries::new(run, 10, 6, style))?,
                LineKind::Solid | LineKind::Faded => ctx.draw_series(LineSeries::new(run, style))?,
            };
            if i == 0 {
                anno.label(trace.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                labelled = true;
            }
        }
    }

    if text && labelled {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Split a gappy series into runs of consecutive present points.
fn segments(dates: &[NaiveDate], values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (date, value) in dates.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((day_number(*date), *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn format_day(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn x_bounds(dates: &[NaiveDate]) -> (f64, f64) {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if last > first => (day_number(*first), day_number(*last)),
        (Some(only), _) => (day_number(*only) - 1.0, day_number(*only) + 1.0),
        _ => (0.0, 1.0),
    }
}

fn y_bounds(traces: &[Trace]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in traces.iter().flat_map(|t| t.values.iter().flatten()) {
        if v.is_finite() {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    if hi - lo < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}
