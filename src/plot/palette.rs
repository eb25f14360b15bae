//! Categorical line colors.

use plotters::style::RGBColor;

use crate::domain::Symbol;

/// Ten well-separated hues, cycled when there are more series than colors.
pub const CATEGORY10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub fn color_at(index: usize) -> RGBColor {
    CATEGORY10[index % CATEGORY10.len()]
}

/// Stable color for a symbol, independent of which columns are present.
pub fn symbol_color(symbol: Symbol) -> RGBColor {
    color_at(symbol.index())
}
