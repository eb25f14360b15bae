//! `asx-report`: see [`asx_trends::app::run_report`].

use std::process::ExitCode;

use asx_trends::error::AppError;

fn main() -> ExitCode {
    asx_trends::app::run_report().map_or_else(AppError::into_exit_code, |()| ExitCode::SUCCESS)
}
