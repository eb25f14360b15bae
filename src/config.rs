//! Run configuration, read once from the environment (and `.env`).

use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://yahoo-finance15.p.rapidapi.com/api/v2/markets/stock/history";
pub const DEFAULT_DATA_DIR: &str = "Data";
pub const DEFAULT_PLOTS_DIR: &str = "docs/plots";
pub const TABLE_FILE_NAME: &str = "output_all_companies.csv";
pub const FETCH_BIN_NAME: &str = "asx-fetch";

/// Fonts tried, in order, when `ASX_CHART_FONT` is not set.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Sent as `x-rapidapi-key` when present.
    pub api_key: Option<String>,
    /// Sent as `x-rapidapi-host` when present.
    pub api_host: Option<String>,
    pub data_dir: PathBuf,
    pub plots_dir: PathBuf,
    /// Executable the reporter runs to refresh the table.
    pub fetch_bin: PathBuf,
    pub chart_font: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = non_empty_var("RAPIDAPI_KEY");
        let api_host = non_empty_var("RAPIDAPI_HOST");
        if api_key.is_none() || api_host.is_none() {
            log::warn!("RAPIDAPI_KEY/RAPIDAPI_HOST not fully set; requests will go out without them");
        }

        Self {
            api_url: non_empty_var("ASX_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key,
            api_host,
            data_dir: non_empty_var("ASX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            plots_dir: non_empty_var("ASX_PLOTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PLOTS_DIR)),
            fetch_bin: non_empty_var("ASX_FETCH_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(default_fetch_bin),
            chart_font: non_empty_var("ASX_CHART_FONT")
                .map(PathBuf::from)
                .or_else(|| find_font(FONT_CANDIDATES)),
        }
    }

    /// Location of the pivoted price table.
    pub fn table_path(&self) -> PathBuf {
        self.data_dir.join(TABLE_FILE_NAME)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `asx-fetch` sitting next to the current executable, or a bare name
/// resolved through `PATH` if the current executable cannot be located.
fn default_fetch_bin() -> PathBuf {
    let file_name = format!("{FETCH_BIN_NAME}{}", std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

fn find_font(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}
