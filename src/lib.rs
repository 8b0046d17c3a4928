//! Monthly net-savings forecasting from a short history.

pub mod cli;
pub mod config;
pub mod error;
pub mod forecast;
/// Request/response bodies, ledger ingestion, and CSV export.
pub mod io;
pub mod logging;
pub mod runner;
pub mod scenario;
