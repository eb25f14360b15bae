//! `asx-trends` library crate.
//!
//! Two binaries sit on top of this library:
//!
//! - `asx-fetch` pulls daily closes for the tracked ASX symbols and writes
//!   the pivoted price table
//! - `asx-report` refreshes that table through `asx-fetch`, then renders
//!   trend charts and a statistics snapshot
//!
//! Keeping the logic here means it is testable without spawning the real
//! binaries.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
