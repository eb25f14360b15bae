//! Historical daily price endpoint (RapidAPI yahoo-finance15).

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::PricePoint;
use crate::error::AppError;

const INTERVAL: &str = "1d";
const HEADER_KEY: &str = "x-rapidapi-key";
const HEADER_HOST: &str = "x-rapidapi-host";

/// Timestamps above this magnitude are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// What a single symbol's request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolFetch {
    Points(Vec<PricePoint>),
    /// HTTP 200 whose `body` array is missing or empty.
    Empty,
    /// Any status other than 200.
    Status(u16),
    /// Transport error or undecodable body.
    Failed(String),
}

pub struct HistoryClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    api_host: Option<String>,
}

impl HistoryClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        // Requests block until the server answers; there is no deadline.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| AppError::http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
        })
    }

    /// Fetch every ticker in order, skipping the ones that fail.
    pub fn fetch_all<'a>(&self, tickers: impl IntoIterator<Item = &'a str>) -> Vec<PricePoint> {
        collect_points(tickers, |ticker| self.fetch_symbol(ticker))
    }

    pub fn fetch_symbol(&self, ticker: &str) -> SymbolFetch {
        let mut req = self
            .client
            .get(&self.url)
            .query(&[("symbol", ticker), ("interval", INTERVAL)]);
        if let Some(key) = &self.api_key {
            req = req.header(HEADER_KEY, key);
        }
        if let Some(host) = &self.api_host {
            req = req.header(HEADER_HOST, host);
        }

        let resp = match req.send() {
            Ok(resp) => resp,
            Err(e) => return SymbolFetch::Failed(format!("request failed: {e}")),
        };
        let status = resp.status();
        if status != StatusCode::OK {
            return SymbolFetch::Status(status.as_u16());
        }
        match resp.text() {
            Ok(body) => classify_response(ticker, status.as_u16(), &body),
            Err(e) => SymbolFetch::Failed(format!("failed to read body: {e}")),
        }
    }
}

/// Run `fetch` for each ticker and keep the points of the successful ones.
///
/// A failing ticker never affects the others.
pub fn collect_points<'a, F>(tickers: impl IntoIterator<Item = &'a str>, mut fetch: F) -> Vec<PricePoint>
where
    F: FnMut(&str) -> SymbolFetch,
{
    let mut all = Vec::new();
    for ticker in tickers {
        log::info!("Fetching data for {ticker}...");
        match fetch(ticker) {
            SymbolFetch::Points(points) => {
                log::debug!("{ticker}: {} closes", points.len());
                all.extend(points);
            }
            SymbolFetch::Empty => log::warn!("No data in response body for {ticker}"),
            SymbolFetch::Status(code) => {
                log::warn!("Unable to fetch data for {ticker}. Status code {code}")
            }
            SymbolFetch::Failed(reason) => log::error!("Unable to fetch data for {ticker}: {reason}"),
        }
    }
    all
}

/// Turn a raw status + body into a [`SymbolFetch`].
pub fn classify_response(ticker: &str, status: u16, body: &str) -> SymbolFetch {
    if status != StatusCode::OK.as_u16() {
        return SymbolFetch::Status(status);
    }

    let parsed: HistoryResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return SymbolFetch::Failed(format!("failed to parse response: {e}")),
    };

    let entries = parsed.body.unwrap_or_default();
    if entries.is_empty() {
        return SymbolFetch::Empty;
    }

    let mut points = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(close) = entry.close.filter(|c| c.is_finite()) else {
            continue;
        };
        match entry.timestamp.to_date() {
            Some(date) => points.push(PricePoint::new(ticker, date, close)),
            None => log::warn!("{ticker}: skipping entry with unreadable timestamp {:?}", entry.timestamp),
        }
    }

    if points.is_empty() {
        SymbolFetch::Empty
    } else {
        SymbolFetch::Points(points)
    }
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    body: Option<Vec<HistoryEntry>>,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    timestamp: RawTimestamp,
    #[serde(default)]
    close: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Unix(i64),
    Fractional(f64),
    Text(String),
}

impl RawTimestamp {
    fn to_date(&self) -> Option<NaiveDate> {
        match self {
            RawTimestamp::Unix(v) => unix_to_date(*v),
            RawTimestamp::Fractional(v) if v.is_finite() => unix_to_date(v.trunc() as i64),
            RawTimestamp::Fractional(_) => None,
            RawTimestamp::Text(s) => parse_text_date(s),
        }
    }
}

fn unix_to_date(value: i64) -> Option<NaiveDate> {
    let secs = if value.unsigned_abs() >= MILLIS_THRESHOLD.unsigned_abs() {
        value / 1000
    } else {
        value
    };
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return unix_to_date(v);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    // "2024-03-01", "2024-03-01 00:00:00", "2024-03-01T10:00:00" ...
    trimmed
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ok_body_yields_one_point_per_entry() {
        let body = r#"{"meta":{},"body":[
            {"timestamp":1704153600,"open":1.0,"close":118.25},
            {"timestamp":1704240000,"close":119.5}
        ]}"#;
        let SymbolFetch::Points(points) = classify_response("CBA.AX", 200, body) else {
            panic!("expected points");
        };
        assert_eq!(
            points,
            vec![
                PricePoint::new("CBA.AX", date(2024, 1, 2), 118.25),
                PricePoint::new("CBA.AX", date(2024, 1, 3), 119.5),
            ]
        );
    }

    #[test]
    fn non_200_is_reported_as_status() {
        let body = r#"{"body":[{"timestamp":1704153600,"close":1.0}]}"#;
        assert_eq!(classify_response("NAB.AX", 429, body), SymbolFetch::Status(429));
    }

    #[test]
    fn empty_or_missing_body_is_empty() {
        assert_eq!(classify_response("WBC.AX", 200, r#"{"body":[]}"#), SymbolFetch::Empty);
        assert_eq!(classify_response("WBC.AX", 200, r#"{"meta":{}}"#), SymbolFetch::Empty);
        assert_eq!(classify_response("WBC.AX", 200, r#"{"body":null}"#), SymbolFetch::Empty);
    }

    #[test]
    fn malformed_json_is_a_failure() {
        assert!(matches!(
            classify_response("ANZ.AX", 200, "<html>oops</html>"),
            SymbolFetch::Failed(_)
        ));
    }

    #[test]
    fn timestamps_accept_seconds_millis_and_strings() {
        let body = r#"{"body":[
            {"timestamp":1704153600000,"close":1.0},
            {"timestamp":"2024-01-03 00:00:00","close":2.0},
            {"timestamp":"2024-01-04T10:00:00+11:00","close":3.0},
            {"timestamp":"1704412800","close":4.0}
        ]}"#;
        let SymbolFetch::Points(points) = classify_response("BHP.AX", 200, body) else {
            panic!("expected points");
        };
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5)]
        );
    }

    #[test]
    fn null_closes_are_dropped() {
        let body = r#"{"body":[
            {"timestamp":1704153600,"close":null},
            {"timestamp":1704240000,"close":45.1}
        ]}"#;
        let SymbolFetch::Points(points) = classify_response("RIO.AX", 200, body) else {
            panic!("expected points");
        };
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 45.1);
    }

    #[test]
    fn out_of_range_timestamps_skip_only_that_entry() {
        let body = r#"{"body":[
            {"timestamp":-9223372036854775808,"close":1.0},
            {"timestamp":9223372036854775807,"close":2.0},
            {"timestamp":1704153600,"close":3.0}
        ]}"#;
        let SymbolFetch::Points(points) = classify_response("FMG.AX", 200, body) else {
            panic!("expected points");
        };
        assert_eq!(points, vec![PricePoint::new("FMG.AX", date(2024, 1, 2), 3.0)]);
    }

    #[test]
    fn failures_are_isolated_per_symbol() {
        let points = collect_points(["CBA.AX", "NAB.AX", "WBC.AX", "ANZ.AX"], |ticker| match ticker {
            "CBA.AX" => SymbolFetch::Points(vec![PricePoint::new(ticker, date(2024, 1, 2), 100.0)]),
            "NAB.AX" => SymbolFetch::Status(500),
            "WBC.AX" => SymbolFetch::Empty,
            _ => SymbolFetch::Points(vec![PricePoint::new(ticker, date(2024, 1, 3), 30.0)]),
        });
        let tickers: Vec<&str> = points.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(tickers, vec!["CBA.AX", "ANZ.AX"]);
    }
}
