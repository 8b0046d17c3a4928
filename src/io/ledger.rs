//! Transactions ledger ingestion and monthly net-savings aggregation.
//!
//! A ledger is a CSV file with a `date,description,amount[,category]` header.
//! Positive amounts are income and negative amounts are expenses.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LedgerError;

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// Booking date as `YYYY-MM-DD`.
    pub date: String,
    pub description: String,
    /// Signed amount: income when positive, expense when negative.
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
}

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// Month of year, 1 to 12.
    pub month: u32,
}

impl YearMonth {
    /// Extracts the month from a `YYYY-MM-DD` date string.
    ///
    /// Returns `None` unless the string names a real calendar day.
    pub fn from_date(date: &str) -> Option<Self> {
        let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
        Some(Self {
            year: day.year(),
            month: day.month(),
        })
    }

    /// Months elapsed since January of year 0.
    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyNetSavings {
    pub month: YearMonth,
    /// Sum of positive amounts.
    pub income: f64,
    /// Sum of the magnitudes of negative amounts.
    pub expenses: f64,
}

impl MonthlyNetSavings {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Monthly history and balance derived from a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    /// Months with at least one transaction, oldest first.
    pub months: Vec<MonthlyNetSavings>,
    /// Income minus expenses over every kept transaction.
    pub starting_balance: f64,
}

impl LedgerSummary {
    /// Aggregates transactions into monthly net savings.
    ///
    /// Only the `trailing_months` calendar months ending at the latest month
    /// present in the ledger are kept; older transactions are ignored for
    /// both the history and the balance.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` if a date cannot be parsed or an amount is
    /// not finite. Rows are numbered from 1, excluding the header.
    pub fn from_transactions(
        transactions: &[Transaction],
        trailing_months: usize,
    ) -> Result<Self, LedgerError> {
        let mut dated = Vec::with_capacity(transactions.len());
        for (idx, tx) in transactions.iter().enumerate() {
            let row = idx + 1;
            let month = YearMonth::from_date(&tx.date).ok_or_else(|| LedgerError::InvalidDate {
                row,
                value: tx.date.clone(),
            })?;
            if !tx.amount.is_finite() {
                return Err(LedgerError::InvalidAmount { row });
            }
            dated.push((month, tx.amount));
        }

        let Some(latest) = dated.iter().map(|(m, _)| *m).max() else {
            return Ok(Self {
                months: Vec::new(),
                starting_balance: 0.0,
            });
        };
        let cutoff = latest.ordinal() - trailing_months.max(1) as i64 + 1;

        let mut by_month: BTreeMap<YearMonth, MonthlyNetSavings> = BTreeMap::new();
        let mut skipped = 0_usize;
        for (month, amount) in dated {
            if month.ordinal() < cutoff {
                skipped += 1;
                continue;
            }
            let entry = by_month.entry(month).or_insert(MonthlyNetSavings {
                month,
                income: 0.0,
                expenses: 0.0,
            });
            if amount > 0.0 {
                entry.income += amount;
            } else if amount < 0.0 {
                entry.expenses += amount.abs();
            }
        }

        let months: Vec<MonthlyNetSavings> = by_month.into_values().collect();
        let starting_balance = months.iter().map(MonthlyNetSavings::net).sum();

        info!(
            months = months.len(),
            skipped,
            latest = %latest,
            "aggregated ledger into monthly net savings"
        );

        Ok(Self {
            months,
            starting_balance,
        })
    }

    /// Monthly net savings, oldest first.
    pub fn history(&self) -> Vec<f64> {
        self.months.iter().map(MonthlyNetSavings::net).collect()
    }

    /// Average monthly expenses over the last `months` calendar months
    /// ending at the latest ledger month. Months without transactions count
    /// as zero; an empty ledger yields `0.0`.
    pub fn recent_monthly_expenses(&self, months: usize) -> f64 {
        let months = months.max(1);
        let Some(latest) = self.months.last().map(|m| m.month) else {
            return 0.0;
        };
        let cutoff = latest.ordinal() - months as i64 + 1;
        let total: f64 = self
            .months
            .iter()
            .filter(|m| m.month.ordinal() >= cutoff)
            .map(|m| m.expenses)
            .sum();
        total / months as f64
    }
}

/// Reads ledger rows from any CSV source.
///
/// # Errors
///
/// Returns a `LedgerError` if the CSV is malformed or a row does not match
/// the ledger columns.
pub fn read_transactions(reader: impl Read) -> Result<Vec<Transaction>, LedgerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for record in rdr.deserialize() {
        transactions.push(record?);
    }
    debug!(rows = transactions.len(), "read ledger");
    Ok(transactions)
}

/// Reads ledger rows from a CSV file.
///
/// # Errors
///
/// Returns a `LedgerError` if the file cannot be opened or parsed.
pub fn read_transactions_from_path(path: &Path) -> Result<Vec<Transaction>, LedgerError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_transactions(std::io::BufReader::new(file))
}
