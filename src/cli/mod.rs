//! Command-line parsing.
//!
//! The report takes no options. The single positional argument is the data
//! file name, which is echoed in messages but never changes what is read.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::DATA_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "sales-report",
    version,
    about = "Aggregate a sales CSV by day, month, quarter and category, and save PNG charts"
)]
pub struct Cli {
    /// Sales data file. Only used in messages: the report always reads
    /// `amazon_sales_2025_INR.csv` from the working directory.
    #[arg(value_name = "FILE", default_value = DATA_FILE)]
    pub file: PathBuf,
}
