//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments
//! - runs the report pipeline
//! - prints the closing summary

use clap::Parser;
use log::debug;

use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::report::{COMPLETION_LINE, format_run_summary};

pub mod pipeline;

/// Entry point for the `sales-report` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let cli = crate::cli::Cli::parse();
    let config = ReportConfig::default();
    debug!("config: {config:?}");

    let run = pipeline::run_sales_analysis(&cli.file, &config)?;

    println!();
    println!("{COMPLETION_LINE}");
    println!();
    print!("{}", format_run_summary(&run));
    Ok(())
}

/// `RUST_LOG` selects verbosity; warnings and above by default.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A logger may already be installed when embedded; keep that one.
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}
