//! Command-line parsing.
//!
//! Neither binary takes options; everything is configured through the
//! environment. The parsers exist for `--help` and `--version`.

use clap::Parser;

/// `asx-fetch`
#[derive(Debug, Parser)]
#[command(
    name = "asx-fetch",
    version,
    about = "Fetch daily closes for the tracked ASX symbols into the pivoted price table",
    after_help = "Environment: RAPIDAPI_KEY, RAPIDAPI_HOST, ASX_API_URL, ASX_DATA_DIR"
)]
pub struct FetchCli {}

/// `asx-report`
#[derive(Debug, Parser)]
#[command(
    name = "asx-report",
    version,
    about = "Refresh the price table, then write trend charts and summary statistics",
    after_help = "Environment: ASX_DATA_DIR, ASX_PLOTS_DIR, ASX_FETCH_BIN, ASX_CHART_FONT"
)]
pub struct ReportCli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parsers_are_well_formed() {
        FetchCli::command().debug_assert();
        ReportCli::command().debug_assert();
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(FetchCli::try_parse_from(["asx-fetch"]).is_ok());
        assert!(ReportCli::try_parse_from(["asx-report", "extra"]).is_err());
    }
}
