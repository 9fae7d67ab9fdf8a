//! Thicket CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use thicket_cli::{Args, error_adapter::render_report};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse configuration first
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Thicket");
    debug!(args:?; "Parsed arguments");

    // Run the application
    let rendered = match thicket_cli::run(&args) {
        Ok(rendered) => rendered,
        Err(err) => {
            error!("{}", render_report(&err));
            process::exit(1);
        }
    };

    // One JSON line per input on stdout, diagnostics through the logger
    for item in &rendered {
        match item.to_json() {
            Ok(line) => println!("{line}"),
            Err(err) => error!(input = item.input().display().to_string(), err:%; "Failed to encode report"),
        }
        if let Err(err) = item.outcome() {
            error!("{}", render_report(err));
        }
    }

    if !rendered.iter().all(|item| item.succeeded()) {
        process::exit(1);
    }

    info!("Completed successfully");
}
