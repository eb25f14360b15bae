//! Input/output helpers.
//!
//! - the pivoted price table and its CSV form (`table`)
//! - the statistics snapshot JSON (`stats_json`)

pub mod stats_json;
pub mod table;

pub use stats_json::*;
pub use table::*;
