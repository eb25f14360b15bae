//! Process-level error type.
//!
//! Every failure that should terminate a binary carries the stage it came
//! from; the stage decides the exit code.

use std::process::ExitCode;

/// Reading or writing the CSV table, the stats JSON or the output directories.
pub const EXIT_IO: u8 = 2;
/// The child fetch process could not be started or exited non-zero.
pub const EXIT_FETCH_CHILD: u8 = 3;
/// The HTTP client could not be constructed.
pub const EXIT_HTTP: u8 = 4;
/// A chart failed to render.
pub const EXIT_RENDER: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Io,
    FetchChild,
    Http,
    Render,
}

impl Stage {
    pub const fn exit_code(self) -> u8 {
        match self {
            Stage::Io => EXIT_IO,
            Stage::FetchChild => EXIT_FETCH_CHILD,
            Stage::Http => EXIT_HTTP,
            Stage::Render => EXIT_RENDER,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::Io => "io",
            Stage::FetchChild => "fetcher",
            Stage::Http => "http",
            Stage::Render => "chart",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppError {
    stage: Stage,
    message: String,
}

impl AppError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::at(Stage::Io, message)
    }

    pub fn fetch_child(message: impl Into<String>) -> Self {
        Self::at(Stage::FetchChild, message)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::at(Stage::Http, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::at(Stage::Render, message)
    }

    fn at(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn exit_code(&self) -> u8 {
        self.stage.exit_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Report the failure and hand back the process exit code.
    ///
    /// Goes to stderr as well as the log so it shows even with `RUST_LOG=off`.
    pub fn into_exit_code(self) -> ExitCode {
        log::error!("{self}");
        eprintln!("{self}");
        ExitCode::from(self.exit_code())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.stage.label(), self.message)
    }
}

impl std::error::Error for AppError {}
