//! Savings forecaster entry point: CLI wiring, configuration, and one
//! request/response cycle over stdin/stdout.

use std::io;
use std::process;

use savings_forecast::cli::{CliCommand, parse_args, print_usage};
use savings_forecast::config::ForecasterConfig;
use savings_forecast::error::ForecastError;
use savings_forecast::io::types::ForecastResponse;
use savings_forecast::logging;
use savings_forecast::runner::execute;

fn emit(response: &ForecastResponse) -> ! {
    println!("{}", response.to_json());
    process::exit(response.exit_code());
}

fn main() {
    let options = match parse_args() {
        Ok(CliCommand::Run(options)) => options,
        Ok(CliCommand::Help) => {
            print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    let config = match options.config {
        Some(ref path) => match ForecasterConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => emit(&ForecastResponse::from(&ForecastError::from(e))),
        },
        None => ForecasterConfig::default(),
    };

    // Report every invalid field on stderr, the first in the response.
    let mut errors = config.validate().into_iter();
    if let Some(first) = errors.next() {
        for e in errors {
            eprintln!("{e}");
        }
        emit(&ForecastResponse::from(&ForecastError::from(first)));
    }

    logging::init(&config.logging.filter);

    let response = execute(&options, &config, io::stdin().lock());
    emit(&response);
}
