//! Mathematical utilities: rolling means and summary statistics.

pub mod rolling;
pub mod summary;

pub use rolling::*;
pub use summary::*;
