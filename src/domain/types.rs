//! Shared domain types.
//!
//! Records, aggregates, and the run configuration. Everything here is
//! created and dropped within a single run.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

/// The file name the report always reads from.
pub const DATA_FILE: &str = "amazon_sales_2025_INR.csv";

/// Column holding the transaction date.
pub const COL_DATE: &str = "Date";
/// Column holding the product category.
pub const COL_CATEGORY: &str = "Product_Category";
/// Column holding the transaction amount in INR.
pub const COL_AMOUNT: &str = "Total_Sales_INR";

/// Where the report reads from and writes to.
///
/// The binary only ever uses `ReportConfig::default()`. The fields exist so
/// the pipeline can be pointed at temporary directories.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// File actually opened for loading.
    pub data_file: PathBuf,
    /// Directory the chart images are written into.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE),
            output_dir: PathBuf::from("."),
        }
    }
}

/// One sales transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
}

/// Normalized records, ordered by date.
///
/// Every record has a parsed date and a finite amount.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    /// Build a dataset, ordering records by date. The sort is stable so rows
    /// sharing a date keep their file order.
    pub fn new(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date covered, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        let last = self.records.last()?.date;
        Some((first, last))
    }

    pub fn grand_total(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }
}

/// Time bucket width used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Month,
    Quarter,
}

impl Granularity {
    pub fn display_name(self) -> &'static str {
        match self {
            Granularity::Day => "daily",
            Granularity::Month => "monthly",
            Granularity::Quarter => "quarterly",
        }
    }

    /// The last calendar day of the bucket containing `date`.
    pub fn bucket_end(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => month_end(date.year(), date.month()),
            Granularity::Quarter => {
                let last_month = quarter_of(date) * 3;
                month_end(date.year(), last_month)
            }
        }
    }

    /// The end of the bucket following the one ending at `bucket_end`.
    pub fn next_bucket_end(self, bucket_end: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => bucket_end.succ_opt().unwrap_or(bucket_end),
            Granularity::Month | Granularity::Quarter => {
                // The day after a month/quarter end opens the next bucket.
                let next_start = bucket_end.succ_opt().unwrap_or(bucket_end);
                self.bucket_end(next_start)
            }
        }
    }

    /// Axis label for a bucket: `YYYY-MM-DD`, `YYYY-MM`, or `YYYY Qn`.
    pub fn label(self, bucket_end: NaiveDate) -> String {
        match self {
            Granularity::Day => bucket_end.format("%Y-%m-%d").to_string(),
            Granularity::Month => bucket_end.format("%Y-%m").to_string(),
            Granularity::Quarter => format!("{} Q{}", bucket_end.year(), quarter_of(bucket_end)),
        }
    }
}

/// Calendar quarter (1..=4) of a date.
pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// One bucket of a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Last calendar day of the bucket.
    pub bucket_end: NaiveDate,
    pub label: String,
    pub total: f64,
}

/// Summed sales per time bucket, ascending and without gaps between the first
/// and last populated bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSeries {
    pub granularity: Granularity,
    pub points: Vec<SeriesPoint>,
}

impl AggregateSeries {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.total).sum()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total).collect()
    }
}

/// Summed sales for one product category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Share of the grand total, in percent.
    pub share_pct: f64,
}

/// Per-category totals, sorted descending by total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryAggregate {
    pub rows: Vec<CategoryTotal>,
    pub grand_total: f64,
}
