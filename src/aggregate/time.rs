//! Sum sales into calendar buckets.

use std::collections::BTreeMap;

use crate::domain::{AggregateSeries, Granularity, SalesDataset, SeriesPoint};

/// Sum amounts per bucket of `granularity`.
///
/// Buckets run contiguously from the first to the last populated one; buckets
/// with no sales in between carry a zero total.
pub fn aggregate_by(dataset: &SalesDataset, granularity: Granularity) -> AggregateSeries {
    let mut sums: BTreeMap<_, f64> = BTreeMap::new();
    for r in dataset.records() {
        *sums.entry(granularity.bucket_end(r.date)).or_default() += r.amount;
    }

    let (Some(&first), Some(&last)) = (sums.keys().next(), sums.keys().next_back()) else {
        return AggregateSeries {
            granularity,
            points: Vec::new(),
        };
    };

    let mut points = Vec::new();
    let mut bucket = first;
    loop {
        points.push(SeriesPoint {
            bucket_end: bucket,
            label: granularity.label(bucket),
            total: sums.get(&bucket).copied().unwrap_or(0.0),
        });
        if bucket >= last {
            break;
        }
        bucket = granularity.next_bucket_end(bucket);
    }

    AggregateSeries { granularity, points }
}

pub fn daily(dataset: &SalesDataset) -> AggregateSeries {
    aggregate_by(dataset, Granularity::Day)
}

pub fn monthly(dataset: &SalesDataset) -> AggregateSeries {
    aggregate_by(dataset, Granularity::Month)
}

pub fn quarterly(dataset: &SalesDataset) -> AggregateSeries {
    aggregate_by(dataset, Granularity::Quarter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;
    use chrono::NaiveDate;

    fn rec(y: i32, m: u32, d: u32, amount: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category: "A".to_string(),
            amount,
        }
    }

    #[test]
    fn single_row_lands_in_one_bucket_each() {
        let ds = SalesDataset::new(vec![rec(2025, 1, 15, 1000.0)]);

        let m = monthly(&ds);
        assert_eq!(m.points.len(), 1);
        assert_eq!(m.points[0].label, "2025-01");
        assert!((m.points[0].total - 1000.0).abs() < 1e-9);

        let q = quarterly(&ds);
        assert_eq!(q.points.len(), 1);
        assert_eq!(q.points[0].label, "2025 Q1");
        assert!((q.points[0].total - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn gaps_are_filled_with_zero() {
        let ds = SalesDataset::new(vec![rec(2025, 1, 3, 5.0), rec(2025, 1, 1, 10.0)]);
        let days = daily(&ds);
        assert_eq!(days.labels(), ["2025-01-01", "2025-01-02", "2025-01-03"]);
        assert_eq!(days.values(), [10.0, 0.0, 5.0]);

        let ds = SalesDataset::new(vec![rec(2024, 11, 20, 1.0), rec(2025, 2, 1, 2.0)]);
        assert_eq!(monthly(&ds).labels(), ["2024-11", "2024-12", "2025-01", "2025-02"]);
        assert_eq!(quarterly(&ds).labels(), ["2024 Q4", "2025 Q1"]);
    }

    #[test]
    fn all_granularities_preserve_the_total() {
        let ds = SalesDataset::new(vec![
            rec(2025, 1, 1, 100.0),
            rec(2025, 1, 1, 20.5),
            rec(2025, 3, 31, 300.0),
            rec(2025, 4, 1, 42.0),
            rec(2025, 12, 31, 7.25),
        ]);
        let total = ds.grand_total();
        for series in [daily(&ds), monthly(&ds), quarterly(&ds)] {
            assert!((series.total() - total).abs() < 1e-9, "{:?}", series.granularity);
        }
        assert_eq!(quarterly(&ds).points.len(), 4);
    }

    #[test]
    fn empty_dataset_yields_empty_series() {
        let series = daily(&SalesDataset::default());
        assert!(series.points.is_empty());
    }
}
