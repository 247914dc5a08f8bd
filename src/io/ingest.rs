//! CSV ingest and normalization.
//!
//! Turns a sales export into a `SalesDataset`: dates parsed, amounts coerced
//! to numbers, and rows whose amount cannot be read dropped (and counted).
//! No aggregation happens here.

use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, info};

use crate::domain::{COL_AMOUNT, COL_CATEGORY, COL_DATE, SalesDataset, SalesRecord};
use crate::error::AppError;

/// A row that was left out of the dataset.
#[derive(Debug, Clone)]
pub struct RowDrop {
    /// 1-based line number in the source file.
    pub line: usize,
    pub reason: String,
}

/// Ingest output: normalized dataset + row accounting.
#[derive(Debug, Clone)]
pub struct IngestedSales {
    pub dataset: SalesDataset,
    pub dropped: Vec<RowDrop>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Open `path` and load it as sales data.
///
/// A missing file is reported against `shown_path`, the name the caller was
/// asked to load.
pub fn load_sales_file(path: &Path, shown_path: &Path) -> Result<IngestedSales, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::file_not_found(shown_path.display()),
        _ => AppError::input(format!("Failed to open CSV '{}': {e}", path.display())),
    })?;
    info!("loading sales data from {}", path.display());
    load_sales(file)
}

/// Load sales rows from any CSV source.
pub fn load_sales<R: Read>(source: R) -> Result<IngestedSales, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    let mut dropped = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = result.map_err(|e| AppError::input(format!("Line {line}: {e}")))?;

        match parse_row(&record, &columns, line)? {
            Ok(row) => records.push(row),
            Err(reason) => {
                debug!("line {line}: dropped, {reason}");
                dropped.push(RowDrop { line, reason });
            }
        }
    }

    let rows_used = records.len();
    info!(
        "ingest: {rows_read} rows read, {rows_used} kept, {} dropped",
        dropped.len()
    );

    Ok(IngestedSales {
        dataset: SalesDataset::new(records),
        dropped,
        rows_read,
        rows_used,
    })
}

/// Column positions of the required fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    category: usize,
    amount: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, AppError> {
        let map = build_header_map(headers);
        let find = |name: &str| {
            map.get(&normalize_header_name(name))
                .copied()
                .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
        };
        Ok(Self {
            date: find(COL_DATE)?,
            category: find(COL_CATEGORY)?,
            amount: find(COL_AMOUNT)?,
        })
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Outer error aborts the load; inner error drops the row.
fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    line: usize,
) -> Result<Result<SalesRecord, String>, AppError> {
    let raw_amount = field(record, columns.amount);
    let Some(amount) = parse_amount(raw_amount) else {
        return Ok(Err(format!("unparsable `{COL_AMOUNT}` value '{raw_amount}'")));
    };

    let raw_date = field(record, columns.date);
    let date = parse_date(raw_date)
        .map_err(|e| AppError::input(format!("Line {line}: {e}")))?;

    Ok(Ok(SalesRecord {
        date,
        category: field(record, columns.category).to_string(),
        amount,
    }))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

/// Coerce an amount to a number; anything that is not a finite number is
/// treated as missing.
fn parse_amount(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Month-first wins for ambiguous numeric dates; day-first is only reached
    // when the month-first reading is impossible (e.g. `31/12/2025`).
    const FMTS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%d/%m/%Y", "%d-%m-%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    // Timestamps: keep the calendar day only.
    if let Some((day, _time)) = s.split_once(['T', ' ']) {
        if let Ok(d) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Ok(d);
        }
    }

    Err(format!(
        "Invalid `{COL_DATE}` value '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, MM-DD-YYYY, DD/MM/YYYY, DD-MM-YYYY."
    ))
}
