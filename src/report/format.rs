//! Formatted terminal output for a finished run.

use crate::app::pipeline::RunOutput;
use crate::chart::{format_percent, format_thousands};

/// How many categories the summary lists.
const TOP_CATEGORIES: usize = 5;

/// Format the run summary (ingest stats, bucket counts, top categories).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();
    let ingest = &run.ingest;

    out.push_str("=== Sales report ===\n");
    out.push_str(&format!(
        "Rows: read={} | used={} | dropped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.dropped.len()
    ));
    if let Some((first, last)) = ingest.dataset.date_range() {
        out.push_str(&format!("Dates: {first} .. {last}\n"));
    }
    out.push_str(&format!(
        "Grand total (INR): {}\n",
        format_thousands(ingest.dataset.grand_total())
    ));

    out.push_str("\nBuckets:\n");
    for series in [&run.daily, &run.monthly, &run.quarterly] {
        out.push_str(&format!(
            "- {:<10} n={:<5} total={}\n",
            series.granularity.display_name(),
            series.points.len(),
            format_thousands(series.total())
        ));
    }

    out.push_str("\nTop categories:\n");
    out.push_str(
        format!("{:<24} {:>16} {:>8}\n", "category", "total_inr", "share").trim_end(),
    );
    out.push('\n');
    for row in run.categories.rows.iter().take(TOP_CATEGORIES) {
        out.push_str(&format!(
            "{:<24} {:>16} {:>8}\n",
            truncate(&row.category, 24),
            format_thousands(row.total),
            format_percent(row.share_pct)
        ));
    }
    let hidden = run.categories.rows.len().saturating_sub(TOP_CATEGORIES);
    if hidden > 0 {
        out.push_str(&format!("(+{hidden} more)\n"));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
