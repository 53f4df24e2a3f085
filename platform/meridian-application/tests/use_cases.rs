use chrono::NaiveDate;
use meridian_application::monthly::monthly_series;
use meridian_application::table_view::load_table_view;
use meridian_domain::entities::price_table::PriceTable;
use meridian_domain::errors::TableError;
use meridian_domain::repositories::price_data::{Delimiter, PriceDataRepository, PriceSource};
use meridian_domain::services::load_report::LoadReport;
use meridian_domain::value_objects::date_window::DateWindow;
use meridian_domain::value_objects::price_column::PriceColumn;
use meridian_domain::value_objects::price_row::PriceRow;
use meridian_infrastructure::market_data::FilesystemPriceDataRepository;
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Default)]
struct FakePriceRepo {
    present: bool,
    table: PriceTable,
    report: LoadReport,
    loads: Cell<usize>,
}

impl PriceDataRepository for FakePriceRepo {
    fn exists(&self, _source: &PriceSource) -> bool {
        self.present
    }

    fn load_table(&self, _source: &PriceSource) -> Result<(PriceTable, LoadReport), TableError> {
        self.loads.set(self.loads.get() + 1);
        Ok((self.table.clone(), self.report.clone()))
    }
}

fn source() -> PriceSource {
    PriceSource {
        path: PathBuf::from("prices.csv"),
        delimiter: Delimiter::Auto,
        drop_columns: vec!["OpenInt".to_string()],
    }
}

fn row(y: i32, m: u32, d: u32, volume: Option<f64>) -> PriceRow {
    let mut row = PriceRow::new(NaiveDate::from_ymd_opt(y, m, d).expect("date"));
    row.volume = volume;
    row
}

fn volume_table(rows: Vec<PriceRow>) -> PriceTable {
    PriceTable::new(vec!["Date".to_string(), "Volume".to_string()], rows)
}

fn unique_tmp_path(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("meridian_{name}_{}_{}", std::process::id(), now))
}

#[test]
fn table_view_reports_missing_file_without_loading() {
    let repo = FakePriceRepo::default();
    let err = load_table_view(&repo, &source())
        .err()
        .expect("missing file should fail");
    assert!(matches!(err, TableError::NotFound(_)));
    assert_eq!(repo.loads.get(), 0);
}

#[test]
fn table_view_returns_loaded_table() {
    let repo = FakePriceRepo {
        present: true,
        table: volume_table(vec![row(2016, 1, 4, Some(10.0))]),
        ..FakePriceRepo::default()
    };
    let view = load_table_view(&repo, &source()).expect("view");
    assert_eq!(view.table.len(), 1);
    assert_eq!(repo.loads.get(), 1);
}

#[test]
fn monthly_series_single_value_is_unchanged() {
    let repo = FakePriceRepo {
        present: true,
        table: volume_table(vec![row(2016, 5, 9, Some(777.0))]),
        ..FakePriceRepo::default()
    };
    let window = DateWindow::parse("2016-01-01", "2016-12-31").expect("window");
    let series =
        monthly_series(&repo, &source(), &window, PriceColumn::Volume).expect("series");
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].mean, 777.0);
    assert_eq!(series.points[0].label(), "2016-05");
}

#[test]
fn monthly_series_empty_window_is_no_data() {
    let repo = FakePriceRepo {
        present: true,
        table: volume_table(vec![row(2016, 5, 9, Some(777.0))]),
        ..FakePriceRepo::default()
    };
    let window = DateWindow::parse("2019-01-01", "2019-12-31").expect("window");
    let err = monthly_series(&repo, &source(), &window, PriceColumn::Volume)
        .expect_err("empty window");
    assert!(matches!(err, TableError::NoData(_)));
    assert!(err.to_string().contains("no data"));
}

#[test]
fn monthly_series_all_uncoercible_is_no_data() {
    let repo = FakePriceRepo {
        present: true,
        table: volume_table(vec![row(2016, 5, 9, None), row(2016, 5, 10, None)]),
        ..FakePriceRepo::default()
    };
    let window = DateWindow::parse("2016-01-01", "2016-12-31").expect("window");
    let err = monthly_series(&repo, &source(), &window, PriceColumn::Volume)
        .expect_err("nothing coercible");
    assert!(matches!(err, TableError::NoData(_)));
}

#[test]
fn monthly_series_missing_column_is_an_error() {
    let repo = FakePriceRepo {
        present: true,
        table: volume_table(vec![row(2016, 5, 9, Some(1.0))]),
        ..FakePriceRepo::default()
    };
    let window = DateWindow::parse("2016-01-01", "2016-12-31").expect("window");
    let err = monthly_series(&repo, &source(), &window, PriceColumn::Close)
        .expect_err("close column absent");
    assert_eq!(err, TableError::MissingColumn("Close".to_string()));
}

#[test]
fn filesystem_tsv_feeds_monthly_close() {
    let path = unique_tmp_path("use_case_prices.txt");
    let data = "Date\tOpen\tHigh\tLow\tClose\tVolume\tOpenInt\n\
2016-01-04\t2.0\t2.1\t1.9\t2.0\t100\t0\n\
2016-01-05\t2.0\t2.3\t2.0\t3.0\t200\t0\n\
2016-02-01\tx\t2.3\t2.0\tbad\t300\t0\n\
garbage\t1\t1\t1\t1\t1\t0\n";
    fs::write(&path, data).expect("write tsv");

    let source = PriceSource {
        path: path.clone(),
        ..source()
    };
    let repo = FilesystemPriceDataRepository::new();
    let window = DateWindow::parse("2016-01-01", "2016-12-31").expect("window");

    let series = monthly_series(&repo, &source, &window, PriceColumn::Close).expect("close");
    assert_eq!(series.points.len(), 1);
    assert!((series.points[0].mean - 2.5).abs() < 1e-9);

    let volume = monthly_series(&repo, &source, &window, PriceColumn::Volume).expect("volume");
    assert_eq!(volume.points.len(), 2);
    assert_eq!(volume.points[1].mean, 300.0);

    let view = load_table_view(&repo, &source).expect("view");
    assert_eq!(view.report.invalid_date, 1);
    assert!(!view.table.columns.iter().any(|c| c == "OpenInt"));
}

#[test]
fn repeated_dates_each_count_toward_the_monthly_mean() {
    let path = unique_tmp_path("repeated_dates.csv");
    fs::write(&path, "Date,Close\n2016-01-04,10\n2016-01-04,20\n2016-01-05,30\n")
        .expect("write csv");

    let source = PriceSource {
        path: path.clone(),
        ..source()
    };
    let repo = FilesystemPriceDataRepository::new();
    let window = DateWindow::parse("2016-01-01", "2016-12-31").expect("window");

    let series = monthly_series(&repo, &source, &window, PriceColumn::Close).expect("close");
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].samples, 3);
    assert!((series.points[0].mean - 20.0).abs() < 1e-9);

    let view = load_table_view(&repo, &source).expect("view");
    assert_eq!(view.table.len(), 3);
    assert_eq!(view.report.duplicates, 1);
}
