use meridian_application::monthly::monthly_series;
use meridian_application::table_view::load_table_view;
use meridian_domain::errors::TableError;
use meridian_domain::value_objects::price_column::PriceColumn;
use meridian_infrastructure::reporting::export::{ensure_dir, write_page};
use meridian_infrastructure::reporting::html::{render_monthly_chart_page, render_table_page};
use std::path::{Path, PathBuf};
use tracing::info_span;

use crate::state::AppState;

/// Columns that get a chart page, matching the `/monthly*` routes.
pub const EXPORTED_COLUMNS: [PriceColumn; 3] =
    [PriceColumn::Volume, PriceColumn::Open, PriceColumn::Close];

#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PriceColumn, String)>,
}

/// Writes `index.html` plus one `monthly_<column>.html` per exported column.
/// Columns that are absent or empty in the window are skipped, not fatal.
pub fn export_pages(state: &AppState, out_dir: &Path) -> Result<ExportReport, String> {
    let _span = info_span!("export_pages", out_dir = %out_dir.display()).entered();
    ensure_dir(out_dir)?;

    let mut report = ExportReport::default();
    let view =
        load_table_view(state.repo.as_ref(), &state.source).map_err(|err| err.to_string())?;
    let index = out_dir.join("index.html");
    write_page(&index, &render_table_page(&view.table, &view.report))?;
    report.written.push(index);

    for column in EXPORTED_COLUMNS {
        let series =
            match monthly_series(state.repo.as_ref(), &state.source, &state.window, column) {
                Ok(series) => series,
                Err(err @ (TableError::NoData(_) | TableError::MissingColumn(_))) => {
                    tracing::warn!(column = %column, "skipping chart page: {err}");
                    report.skipped.push((column, err.to_string()));
                    continue;
                }
                Err(err) => return Err(err.to_string()),
            };
        let html = render_monthly_chart_page(series.column, &series.window, &series.points)?;
        let path = out_dir.join(format!("monthly_{}.html", column.slug()));
        write_page(&path, &html)?;
        report.written.push(path);
    }

    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "export complete"
    );
    Ok(report)
}
