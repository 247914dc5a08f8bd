//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the run configuration (`ReportConfig`) and fixed input schema names
//! - normalized sales records (`SalesRecord`, `SalesDataset`)
//! - aggregate outputs (`AggregateSeries`, `CategoryAggregate`)

pub mod types;

pub use types::*;
