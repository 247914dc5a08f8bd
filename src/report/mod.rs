//! Reporting utilities: console lines printed while and after charts are
//! written.

pub mod format;

pub use format::format_run_summary;

/// Printed once per chart after its file has been written.
pub fn chart_saved_line(file_name: &str) -> String {
    format!("Chart saved: {file_name}")
}

/// Printed after the last chart.
pub const COMPLETION_LINE: &str =
    "All charts have been generated and saved as PNG files in the current directory.";
