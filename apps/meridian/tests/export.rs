use meridian::export::export_pages;
use meridian::state::AppState;
use meridian_application::config::Config;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_tmp_path(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("meridian_{name}_{}_{}", std::process::id(), now))
}

fn config_for(path: &PathBuf) -> Config {
    let mut config = Config::default();
    config.data.path = path.display().to_string();
    config.window.start = "2016-01-01".to_string();
    config.window.end = "2016-12-31".to_string();
    config
}

#[test]
fn export_writes_index_and_chart_pages() {
    let prices = unique_tmp_path("export_prices.csv");
    fs::write(
        &prices,
        "Date,Open,Close,Volume\n2016-01-04,1,2,100\n2016-02-01,3,4,300\n",
    )
    .expect("write prices");
    let out_dir = unique_tmp_path("export_out");

    let state = AppState::new(&config_for(&prices)).expect("state");
    let report = export_pages(&state, &out_dir).expect("export");

    assert_eq!(report.written.len(), 4);
    assert!(report.skipped.is_empty());
    for name in [
        "index.html",
        "monthly_volume.html",
        "monthly_open.html",
        "monthly_close.html",
    ] {
        assert!(out_dir.join(name).is_file(), "{name}");
    }
    let volume = fs::read_to_string(out_dir.join("monthly_volume.html")).expect("read");
    assert!(volume.contains("<td>2016-02</td><td>300</td><td>1</td>"));

    let _ = fs::remove_dir_all(&out_dir);
    let _ = fs::remove_file(&prices);
}

#[test]
fn export_skips_columns_missing_from_file() {
    let prices = unique_tmp_path("export_close_only.csv");
    fs::write(&prices, "Date,Close\n2016-01-04,2\n").expect("write prices");
    let out_dir = unique_tmp_path("export_partial");

    let state = AppState::new(&config_for(&prices)).expect("state");
    let report = export_pages(&state, &out_dir).expect("export");

    assert_eq!(report.written.len(), 2);
    assert_eq!(report.skipped.len(), 2);
    assert!(out_dir.join("monthly_close.html").is_file());
    assert!(!out_dir.join("monthly_volume.html").exists());

    let _ = fs::remove_dir_all(&out_dir);
    let _ = fs::remove_file(&prices);
}

#[test]
fn export_fails_when_price_file_is_missing() {
    let state = AppState::new(&config_for(&unique_tmp_path("export_missing.csv")))
        .expect("state");
    let err = export_pages(&state, &unique_tmp_path("export_never")).expect_err("missing");
    assert!(err.contains("file not found"));
}
