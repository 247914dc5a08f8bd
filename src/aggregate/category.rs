//! Sum sales per product category and derive percentage shares.

use std::collections::HashMap;

use crate::domain::{CategoryAggregate, CategoryTotal, SalesDataset};

/// Totals per category, largest first.
///
/// Records with an empty category have no group key and are left out.
/// Equal totals are ordered by category name.
pub fn by_category(dataset: &SalesDataset) -> CategoryAggregate {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for r in dataset.records() {
        if r.category.is_empty() {
            continue;
        }
        *sums.entry(r.category.as_str()).or_default() += r.amount;
    }

    let grand_total: f64 = sums.values().sum();

    let mut rows: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
            share_pct: share_of(total, grand_total),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    CategoryAggregate { rows, grand_total }
}

fn share_of(total: f64, grand_total: f64) -> f64 {
    if grand_total == 0.0 {
        return 0.0;
    }
    total / grand_total * 100.0
}
