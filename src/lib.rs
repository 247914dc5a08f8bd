//! `sales-report` library crate.
//!
//! The binary (`sales-report`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - aggregation and chart layout can be checked without drawing images

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod render;
pub mod report;
