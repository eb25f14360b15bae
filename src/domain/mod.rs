//! Domain types used throughout the pipeline.
//!
//! - the fixed symbol universe with company metadata (`Symbol`, `Sector`)
//! - fetched observations (`PricePoint`)
//! - derived per-symbol aggregates (`SummaryStats`)

pub mod symbols;
pub mod types;

pub use symbols::*;
pub use types::*;
