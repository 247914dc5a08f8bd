//! Aggregations over a normalized dataset.
//!
//! - time buckets: day, month-end, quarter-end (`time`)
//! - per-category totals and shares (`category`)

pub mod category;
pub mod time;

pub use category::by_category;
pub use time::{aggregate_by, daily, monthly, quarterly};
