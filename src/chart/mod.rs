//! Render-only chart descriptions.
//!
//! Every chart the report draws is described here as plain data: file name,
//! canvas size, titles, series, bounds and annotations. All of it is derived
//! from the aggregates before any drawing starts, so `render` only draws and
//! the layout decisions can be tested without producing images.

use plotters::style::RGBColor;

use crate::domain::{AggregateSeries, CategoryAggregate, Granularity};

pub mod format;

pub use format::{format_percent, format_thousands};

pub const DAILY_CHART_FILE: &str = "daily_sales_line_chart.png";
pub const MONTHLY_CHART_FILE: &str = "monthly_sales_line_chart.png";
pub const QUARTERLY_CHART_FILE: &str = "quarterly_sales_line_chart.png";
pub const CATEGORY_BAR_CHART_FILE: &str = "category_sales_bar_chart.png";
pub const CATEGORY_PIE_CHART_FILE: &str = "category_sales_pie_chart.png";

/// Y-axis title shared by the line and bar charts.
pub const SALES_AXIS_LABEL: &str = "Total Sales (INR)";

/// Ten-colour categorical palette used for pie wedges.
pub const CATEGORY_PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Point marker drawn on each bucket of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
    Square,
}

/// Sales over time as a single line.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub file_name: &'static str,
    pub size: (u32, u32),
    pub title: &'static str,
    pub x_label: &'static str,
    pub legend: &'static str,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub marker: Marker,
    /// Rotate x tick labels so long dates don't collide.
    pub rotate_x_labels: bool,
    /// One label per bucket, in x order.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub y_bounds: [f64; 2],
}

impl LineChart {
    pub fn from_series(series: &AggregateSeries) -> Self {
        let values = series.values();
        let y_bounds = padded_bounds(&values);
        let labels = series.labels();

        match series.granularity {
            Granularity::Day => Self {
                file_name: DAILY_CHART_FILE,
                size: (1400, 600),
                title: "Daily Total Sales (INR) Over Time",
                x_label: "Date",
                legend: "Daily Sales",
                color: RGBColor(0x1f, 0x77, 0xb4),
                stroke_width: 1,
                marker: Marker::None,
                rotate_x_labels: true,
                labels,
                values,
                y_bounds,
            },
            Granularity::Month => Self {
                file_name: MONTHLY_CHART_FILE,
                size: (1000, 500),
                title: "Monthly Total Sales (INR)",
                x_label: "Month",
                legend: "Monthly Sales",
                color: RGBColor(0x2c, 0xa0, 0x2c),
                stroke_width: 2,
                marker: Marker::Circle,
                rotate_x_labels: true,
                labels,
                values,
                y_bounds,
            },
            Granularity::Quarter => Self {
                file_name: QUARTERLY_CHART_FILE,
                size: (800, 500),
                title: "Quarterly Total Sales (INR)",
                x_label: "Quarter",
                legend: "Quarterly Sales",
                color: RGBColor(0xff, 0x7f, 0x0e),
                stroke_width: 3,
                marker: Marker::Square,
                rotate_x_labels: false,
                labels,
                values,
                y_bounds,
            },
        }
    }

    /// `(x, y)` pairs with x as the bucket index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    /// X range covering every bucket with half a bucket of margin.
    pub fn x_bounds(&self) -> [f64; 2] {
        let n = self.values.len().max(1) as f64;
        [-0.5, n - 0.5]
    }

    /// Tick label for an x coordinate, or empty between buckets.
    pub fn label_at(&self, x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        self.labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// One labelled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text drawn above the bar.
    pub annotation: String,
    /// Data-space y where the annotation baseline sits.
    pub annotation_y: f64,
}

/// Category totals as bars, largest first.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub file_name: &'static str,
    pub size: (u32, u32),
    pub title: &'static str,
    pub x_label: &'static str,
    pub color: RGBColor,
    pub bars: Vec<Bar>,
    pub y_bounds: [f64; 2],
}

impl BarChart {
    pub fn from_categories(agg: &CategoryAggregate) -> Self {
        let bars: Vec<Bar> = agg
            .rows
            .iter()
            .map(|row| Bar {
                label: row.category.clone(),
                value: row.total,
                annotation: format_thousands(row.total),
                annotation_y: row.total + row.total * 0.01,
            })
            .collect();

        // Bars grow from zero; leave headroom for the annotations.
        let max = bars.iter().map(|b| b.annotation_y.max(b.value)).fold(0.0, f64::max);
        let min = bars.iter().map(|b| b.annotation_y.min(b.value)).fold(0.0, f64::min);
        let hi = if max > 0.0 { max * 1.08 } else { 1.0 };
        let lo = if min < 0.0 { min * 1.08 } else { 0.0 };

        Self {
            file_name: CATEGORY_BAR_CHART_FILE,
            size: (1000, 600),
            title: "Total Sales (INR) by Product Category",
            x_label: "Product Category",
            color: RGBColor(0xd6, 0x27, 0x28),
            bars,
            y_bounds: [lo, hi],
        }
    }
}

/// One pie wedge. Angles are in degrees, counter-clockwise from 3 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieWedge {
    pub label: String,
    pub share_pct: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    pub color: RGBColor,
    /// Percentage text drawn inside the wedge.
    pub annotation: String,
}

impl PieWedge {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Category shares as a pie.
#[derive(Debug, Clone)]
pub struct PieChart {
    pub file_name: &'static str,
    pub size: (u32, u32),
    pub title: &'static str,
    pub edge_color: RGBColor,
    pub edge_width: u32,
    pub wedges: Vec<PieWedge>,
}

/// Where the first wedge begins (12 o'clock).
pub const PIE_START_DEG: f64 = 90.0;

impl PieChart {
    pub fn from_categories(agg: &CategoryAggregate) -> Self {
        let mut start = PIE_START_DEG;
        let wedges = agg
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.share_pct > 0.0)
            .map(|(i, row)| {
                let sweep = row.share_pct / 100.0 * 360.0;
                let wedge = PieWedge {
                    label: row.category.clone(),
                    share_pct: row.share_pct,
                    start_deg: start,
                    end_deg: start + sweep,
                    color: CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()],
                    annotation: format_percent(row.share_pct),
                };
                start += sweep;
                wedge
            })
            .collect();

        Self {
            file_name: CATEGORY_PIE_CHART_FILE,
            size: (900, 900),
            title: "Total Sales Share by Product Category",
            edge_color: RGBColor(0, 0, 0),
            edge_width: 2,
            wedges,
        }
    }
}

/// Min/max with 5% padding; flat or empty series get a unit band.
fn padded_bounds(values: &[f64]) -> [f64; 2] {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(lo.is_finite() && hi.is_finite()) {
        return [0.0, 1.0];
    }
    let span = hi - lo;
    if span <= 0.0 {
        let pad = (hi.abs() * 0.05).max(1.0);
        return [lo - pad, hi + pad];
    }
    [lo - span * 0.05, hi + span * 0.05]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryTotal;

    fn two_categories() -> CategoryAggregate {
        CategoryAggregate {
            rows: vec![
                CategoryTotal {
                    category: "A".to_string(),
                    total: 600.0,
                    share_pct: 60.0,
                },
                CategoryTotal {
                    category: "B".to_string(),
                    total: 400.0,
                    share_pct: 40.0,
                },
            ],
            grand_total: 1000.0,
        }
    }

    #[test]
    fn bar_chart_keeps_rank_and_annotates_values() {
        let chart = BarChart::from_categories(&two_categories());
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        assert_eq!(chart.bars[0].annotation, "600");
        assert!(chart.bars[0].annotation_y > 600.0);
        assert!(chart.y_bounds[1] > chart.bars[0].annotation_y);
        assert_eq!(chart.y_bounds[0], 0.0);
    }

    #[test]
    fn pie_chart_reports_shares_from_twelve_oclock() {
        let chart = PieChart::from_categories(&two_categories());
        let annotations: Vec<&str> = chart.wedges.iter().map(|w| w.annotation.as_str()).collect();
        assert_eq!(annotations, ["60.0%", "40.0%"]);

        assert_eq!(chart.wedges[0].start_deg, PIE_START_DEG);
        let sweep: f64 = chart.wedges.iter().map(|w| w.end_deg - w.start_deg).sum();
        assert!((sweep - 360.0).abs() < 1e-9);
        assert_eq!(chart.wedges[1].start_deg, chart.wedges[0].end_deg);
    }

    #[test]
    fn line_chart_styling_follows_granularity() {
        let series = AggregateSeries {
            granularity: Granularity::Quarter,
            points: vec![crate::domain::SeriesPoint {
                bucket_end: chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
                label: "2025 Q1".to_string(),
                total: 1000.0,
            }],
        };
        let chart = LineChart::from_series(&series);
        assert_eq!(chart.file_name, QUARTERLY_CHART_FILE);
        assert_eq!(chart.marker, Marker::Square);
        assert_eq!(chart.label_at(0.0), "2025 Q1");
        assert_eq!(chart.label_at(0.5), "");
        assert!(chart.y_bounds[0] < 1000.0 && chart.y_bounds[1] > 1000.0);
    }
}
