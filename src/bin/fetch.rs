//! `asx-fetch`: see [`asx_trends::app::run_fetch`].

use std::process::ExitCode;

use asx_trends::error::AppError;

fn main() -> ExitCode {
    asx_trends::app::run_fetch().map_or_else(AppError::into_exit_code, |()| ExitCode::SUCCESS)
}
