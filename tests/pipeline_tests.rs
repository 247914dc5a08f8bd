use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sales_report::aggregate;
use sales_report::app::pipeline::run_sales_analysis;
use sales_report::chart::{
    BarChart, CATEGORY_BAR_CHART_FILE, CATEGORY_PIE_CHART_FILE, DAILY_CHART_FILE, MONTHLY_CHART_FILE,
    PieChart, QUARTERLY_CHART_FILE,
};
use sales_report::domain::{DATA_FILE, ReportConfig};
use sales_report::error::{EXIT_EMPTY, EXIT_FILE_NOT_FOUND, EXIT_INPUT};
use sales_report::io::ingest::{IngestedSales, load_sales_file};
use tempfile::{NamedTempFile, TempDir};

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file.flush().unwrap();
    file
}

fn load(contents: &str) -> IngestedSales {
    let file = fixture(contents);
    load_sales_file(file.path(), file.path()).unwrap()
}

fn config_in(dir: &TempDir, data_file: PathBuf) -> ReportConfig {
    ReportConfig {
        data_file,
        output_dir: dir.path().to_path_buf(),
    }
}

fn pngs_in(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect()
}

#[test]
fn missing_input_exits_with_one_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, dir.path().join(DATA_FILE));

    let err = run_sales_analysis(Path::new(DATA_FILE), &config).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_FILE_NOT_FOUND);
    assert_eq!(
        err.to_string(),
        format!("Error: The file '{DATA_FILE}' was not found.")
    );
    assert!(pngs_in(dir.path()).is_empty());
}

#[test]
fn successful_run_writes_all_five_charts_in_order() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join(DATA_FILE);
    fs::write(
        &data,
        "Date,Product_Category,Total_Sales_INR\n\
         2025-01-15,Electronics,1200\n\
         2025-02-03,Books,300\n\
         2025-04-20,Electronics,450.75\n",
    )
    .unwrap();

    let run = run_sales_analysis(Path::new(DATA_FILE), &config_in(&dir, data)).unwrap();

    let expected: Vec<PathBuf> = [
        DAILY_CHART_FILE,
        MONTHLY_CHART_FILE,
        QUARTERLY_CHART_FILE,
        CATEGORY_BAR_CHART_FILE,
        CATEGORY_PIE_CHART_FILE,
    ]
    .iter()
    .map(|name| dir.path().join(name))
    .collect();
    assert_eq!(run.charts, expected);
    for path in &expected {
        let len = fs::metadata(path).unwrap().len();
        assert!(len > 0, "{} is empty", path.display());
    }
    assert_eq!(pngs_in(dir.path()).len(), 5);
    assert_eq!(run.ingest.rows_used, 3);
}

#[test]
fn requested_path_is_reported_but_not_opened() {
    let dir = TempDir::new().unwrap();
    let requested = fixture("Date,Product_Category,Total_Sales_INR\n2025-01-15,A,1000\n");
    let config = config_in(&dir, dir.path().join(DATA_FILE));

    // The requested file exists, but the configured data file does not.
    let err = run_sales_analysis(requested.path(), &config).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_FILE_NOT_FOUND);
    assert!(err.to_string().contains(&requested.path().display().to_string()));
}

#[test]
fn no_usable_rows_aborts_before_rendering() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join(DATA_FILE);
    fs::write(&data, "Date,Product_Category,Total_Sales_INR\n2025-01-15,A,n/a\n").unwrap();

    let err = run_sales_analysis(Path::new(DATA_FILE), &config_in(&dir, data)).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_EMPTY);
    assert!(pngs_in(dir.path()).is_empty());
}

#[test]
fn unparsable_date_aborts_before_rendering() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join(DATA_FILE);
    fs::write(&data, "Date,Product_Category,Total_Sales_INR\nsomeday,A,10\n").unwrap();

    let err = run_sales_analysis(Path::new(DATA_FILE), &config_in(&dir, data)).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_INPUT);
    assert!(pngs_in(dir.path()).is_empty());
}

#[test]
fn every_aggregate_sums_to_the_grand_total() {
    let ingest = load(
        "Date,Product_Category,Total_Sales_INR\n\
         2025-01-03,Electronics,1200.50\n\
         2025-01-03,Books,300\n\
         2025-02-28,Fashion,799.99\n\
         2025-05-10,Electronics,15000\n\
         2025-09-30,Books,45.5\n\
         2025-12-31,Home,2500\n",
    );
    let ds = &ingest.dataset;
    let total = ds.grand_total();

    let sums = [
        aggregate::daily(ds).total(),
        aggregate::monthly(ds).total(),
        aggregate::quarterly(ds).total(),
        aggregate::by_category(ds).grand_total,
    ];
    for sum in sums {
        assert!((sum - total).abs() < 1e-6, "{sum} != {total}");
    }

    let shares: f64 = aggregate::by_category(ds).rows.iter().map(|r| r.share_pct).sum();
    assert!((shares - 100.0).abs() < 1e-9);
}

#[test]
fn non_numeric_amounts_do_not_reach_any_aggregate() {
    let ingest = load(
        "Date,Product_Category,Total_Sales_INR\n\
         2025-01-01,A,100\n\
         2025-01-02,A,unknown\n\
         2025-04-01,C,\n\
         2025-01-03,B,50\n",
    );
    assert_eq!(ingest.rows_read, 4);
    assert_eq!(ingest.rows_used, 2);
    assert!((ingest.dataset.grand_total() - 150.0).abs() < 1e-9);

    // The dropped April row must not open a second quarter.
    assert_eq!(aggregate::quarterly(&ingest.dataset).points.len(), 1);
    let categories = aggregate::by_category(&ingest.dataset);
    assert!(categories.rows.iter().all(|r| r.category != "C"));
}

#[test]
fn two_category_fixture_ranks_and_shares() {
    let ingest = load(
        "Date,Product_Category,Total_Sales_INR\n\
         2025-01-01,B,250\n\
         2025-01-02,A,600\n\
         2025-01-03,B,150\n",
    );
    let categories = aggregate::by_category(&ingest.dataset);

    let bar = BarChart::from_categories(&categories);
    let ranked: Vec<&str> = bar.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(ranked, ["A", "B"]);

    let pie = PieChart::from_categories(&categories);
    let shares: Vec<&str> = pie.wedges.iter().map(|w| w.annotation.as_str()).collect();
    assert_eq!(shares, ["60.0%", "40.0%"]);
}

#[test]
fn single_row_fixture_buckets() {
    let ingest = load("Date,Product_Category,Total_Sales_INR\n2025-01-15,A,1000\n");

    let monthly = aggregate::monthly(&ingest.dataset);
    assert_eq!(monthly.labels(), ["2025-01"]);
    assert_eq!(monthly.values(), [1000.0]);

    let quarterly = aggregate::quarterly(&ingest.dataset);
    assert_eq!(quarterly.labels(), ["2025 Q1"]);
    assert_eq!(quarterly.values(), [1000.0]);
}
