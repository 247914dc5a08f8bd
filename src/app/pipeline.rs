//! The report workflow: load -> clean -> aggregate -> render.
//!
//! Kept separate from `app::run` so the whole pass can be driven from tests
//! with a custom `ReportConfig`.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::aggregate;
use crate::chart::{BarChart, LineChart, PieChart};
use crate::domain::{AggregateSeries, CategoryAggregate, ReportConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestedSales, load_sales_file};
use crate::render;
use crate::report::chart_saved_line;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedSales,
    pub daily: AggregateSeries,
    pub monthly: AggregateSeries,
    pub quarterly: AggregateSeries,
    pub categories: CategoryAggregate,
    /// Chart files written, in drawing order.
    pub charts: Vec<PathBuf>,
}

/// Run the full sales analysis and write the chart images.
///
/// `file_path` is only used to name the input in messages: the data is always
/// read from `config.data_file`.
pub fn run_sales_analysis(file_path: &Path, config: &ReportConfig) -> Result<RunOutput, AppError> {
    if file_path != config.data_file {
        warn!(
            "requested input '{}' is ignored; reading '{}'",
            file_path.display(),
            config.data_file.display()
        );
    }

    // 1) Load and clean.
    let ingest = load_sales_file(&config.data_file, file_path)?;
    if ingest.dataset.is_empty() {
        return Err(AppError::empty_dataset(format!(
            "No valid rows remain in '{}' after dropping unparsable amounts.",
            config.data_file.display()
        )));
    }

    // 2) Aggregate.
    let daily = aggregate::daily(&ingest.dataset);
    let monthly = aggregate::monthly(&ingest.dataset);
    let quarterly = aggregate::quarterly(&ingest.dataset);
    let categories = aggregate::by_category(&ingest.dataset);
    info!(
        "aggregated {} days, {} months, {} quarters, {} categories",
        daily.points.len(),
        monthly.points.len(),
        quarterly.points.len(),
        categories.rows.len()
    );

    // 3) Render, one scoped canvas per chart.
    let dir = config.output_dir.as_path();
    let mut charts = Vec::with_capacity(5);

    for series in [&daily, &monthly, &quarterly] {
        let chart = LineChart::from_series(series);
        charts.push(render::render_line_chart(dir, &chart)?);
        println!("{}", chart_saved_line(chart.file_name));
    }

    let bar = BarChart::from_categories(&categories);
    charts.push(render::render_bar_chart(dir, &bar)?);
    println!("{}", chart_saved_line(bar.file_name));

    let pie = PieChart::from_categories(&categories);
    charts.push(render::render_pie_chart(dir, &pie)?);
    println!("{}", chart_saved_line(pie.file_name));

    Ok(RunOutput {
        ingest,
        daily,
        monthly,
        quarterly,
        categories,
        charts,
    })
}
