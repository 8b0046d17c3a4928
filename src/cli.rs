use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub ledger: Option<PathBuf>,
    pub horizon: Option<i64>,
    pub method: Option<String>,
    pub extra_savings: Option<f64>,
    pub expense_reduction: Option<f64>,
    pub predictions_out: Option<PathBuf>,
}

impl CliOptions {
    /// Whether a what-if scenario was requested.
    pub fn has_scenario(&self) -> bool {
        self.extra_savings.is_some() || self.expense_reduction.is_some()
    }
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<CliCommand, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliCommand, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--ledger" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --ledger (expected a CSV file path)")?;
                if opts.ledger.replace(PathBuf::from(path)).is_some() {
                    return Err("--ledger provided more than once".to_string());
                }
            }
            "--horizon" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --horizon (expected months)")?;
                let months = raw
                    .parse::<i64>()
                    .map_err(|_| format!("--horizon value \"{raw}\" is not an integer"))?;
                if opts.horizon.replace(months).is_some() {
                    return Err("--horizon provided more than once".to_string());
                }
            }
            "--method" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --method (expected a name)")?;
                if opts.method.replace(name.to_string()).is_some() {
                    return Err("--method provided more than once".to_string());
                }
            }
            "--extra-savings" => {
                i += 1;
                let raw =
                    args.next_or_err(i, "missing value for --extra-savings (expected an amount)")?;
                let amount = parse_number(raw, "--extra-savings")?;
                if opts.extra_savings.replace(amount).is_some() {
                    return Err("--extra-savings provided more than once".to_string());
                }
            }
            "--expense-reduction" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --expense-reduction (expected a percentage)",
                )?;
                let percent = parse_number(raw, "--expense-reduction")?;
                if opts.expense_reduction.replace(percent).is_some() {
                    return Err("--expense-reduction provided more than once".to_string());
                }
            }
            "--predictions-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --predictions-out (expected a file path)",
                )?;
                if opts.predictions_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--predictions-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => return Ok(CliCommand::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.ledger.is_none() && (opts.horizon.is_some() || opts.method.is_some()) {
        return Err(
            "`--horizon` and `--method` require `--ledger`; stdin requests carry their own fields"
                .to_string(),
        );
    }

    if opts.ledger.is_none() && opts.has_scenario() {
        return Err(
            "`--extra-savings` and `--expense-reduction` require `--ledger`".to_string(),
        );
    }

    Ok(CliCommand::Run(opts))
}

fn parse_number(raw: &str, flag: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("{flag} value \"{raw}\" is not a number"))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("savings-forecast: forecast monthly net savings");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  savings-forecast [--config <path>] [--predictions-out <path>] < request.json");
    eprintln!(
        "  savings-forecast --ledger <path> [--horizon <months>] [--method <name>] [--config <path>] [--predictions-out <path>]"
    );
    eprintln!(
        "                   [--extra-savings <amount>] [--expense-reduction <percent>]"
    );
    eprintln!();
    eprintln!("Reads a JSON request from stdin unless --ledger is given, and writes a JSON");
    eprintln!("response to stdout. Methods: linear (default), moving_average.");
    eprintln!("--extra-savings and --expense-reduction apply a what-if scenario to a ledger");
    eprintln!("forecast (0 to 10000 per month, 0 to 100 percent of recent expenses).");
}
