//! Command-line argument definitions for the Thicket CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the request files, where and in which
//! formats they are rendered, the configuration file and logging verbosity.

use clap::Parser;

use thicket::request::OutputFormat;

/// Command-line arguments for the Thicket mind-map renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Mind-map request files (JSON)
    #[arg(required = true, help = "Paths to the request files")]
    pub inputs: Vec<String>,

    /// Directory for rendered files, replacing the configured one
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Output formats (png, pdf, both), replacing each request's own
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
