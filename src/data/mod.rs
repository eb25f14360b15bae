//! Upstream market data access.

pub mod history;

pub use history::{HistoryClient, SymbolFetch, classify_response, collect_points};
