//! Top-level application orchestration.
//!
//! The binaries in `src/bin/` are tiny; this module is the "real main" that:
//! - parses CLI arguments (help/version only)
//! - loads `.env` and initializes logging
//! - reads the run configuration
//! - hands off to `pipeline`

use clap::Parser;

use crate::cli::{FetchCli, ReportCli};
use crate::config::Config;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `asx-fetch` binary.
pub fn run_fetch() -> Result<(), AppError> {
    let _cli = FetchCli::parse();
    preprocess();
    let config = Config::from_env();

    pipeline::fetch_and_store(&config)?;
    Ok(())
}

/// Entry point for the `asx-report` binary.
pub fn run_report() -> Result<(), AppError> {
    let _cli = ReportCli::parse();
    preprocess();
    let config = Config::from_env();

    let run = pipeline::refresh_and_report(&config)?;
    println!("{}", crate::report::format_summary(&run.stats));
    Ok(())
}

fn preprocess() {
    // `.env` first so RUST_LOG can come from it.
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .ok();
}
