//! CSV export for forecast predictions.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Column header for prediction export.
const HEADER: &str = "period,predicted_net_savings,projected_balance";

/// Extra columns written when a scenario was applied.
const SCENARIO_HEADER: &str = "adjusted_net_savings,adjusted_balance";

/// Exports predictions to a CSV file at the given path.
///
/// Writes a header row followed by one row per forecast month. The projected
/// balance is the running total of predictions on top of `starting_balance`.
/// When `adjusted` is given, scenario-adjusted predictions and their running
/// balance are appended as two more columns.
/// Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `predictions` - Predicted monthly net savings, in order
/// * `adjusted` - Scenario-adjusted predictions, same length as `predictions`
/// * `starting_balance` - Balance before the first forecast month
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(
    predictions: &[f64],
    adjusted: Option<&[f64]>,
    starting_balance: f64,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(predictions, adjusted, starting_balance, buf)
}

/// Writes predictions as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    predictions: &[f64],
    adjusted: Option<&[f64]>,
    starting_balance: f64,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = HEADER.split(',').collect();
    if adjusted.is_some() {
        header.extend(SCENARIO_HEADER.split(','));
    }
    wtr.write_record(&header)?;

    let mut balance = starting_balance;
    let mut adjusted_balance = starting_balance;
    for (i, p) in predictions.iter().enumerate() {
        balance += p;
        let mut record = vec![
            (i + 1).to_string(),
            format!("{p:.2}"),
            format!("{balance:.2}"),
        ];
        if let Some(a) = adjusted.and_then(|values| values.get(i)) {
            adjusted_balance += a;
            record.push(format!("{a:.2}"));
            record.push(format!("{adjusted_balance:.2}"));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
