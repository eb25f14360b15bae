//! PNG chart rendering.

pub mod chart;
pub mod palette;
pub mod trends;

pub use chart::{LineChart, LineKind, Trace, init_chart_font, render_line_chart};
pub use trends::{SymbolSeries, present_series, render_all, symbol_chart_file};
