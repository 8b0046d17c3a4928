//! Input and output surfaces: request bodies, ledgers, and CSV export.

/// Prediction CSV export.
pub mod export;
/// Transactions ledger ingestion.
pub mod ledger;
pub mod types;
