use meridian_domain::entities::price_table::PriceTable;
use meridian_domain::errors::TableError;
use meridian_domain::repositories::price_data::{PriceDataRepository, PriceSource};
use meridian_domain::services::load_report::LoadReport;
use std::time::Instant;
use tracing::info_span;

pub struct TableView {
    pub table: PriceTable,
    pub report: LoadReport,
}

/// Checks the file exists, then loads and cleans it.
pub fn load_table_view(
    repo: &dyn PriceDataRepository,
    source: &PriceSource,
) -> Result<TableView, TableError> {
    let _span = info_span!("load_table", path = %source.path.display()).entered();

    if !repo.exists(source) {
        metrics::counter!("meridian.load.not_found").increment(1);
        return Err(TableError::NotFound(source.path.display().to_string()));
    }

    let stage_start = Instant::now();
    let (table, report) = repo.load_table(source)?;
    metrics::histogram!("meridian.load.ms").record(stage_start.elapsed().as_millis() as f64);
    metrics::gauge!("meridian.load.rows").set(table.len() as f64);
    metrics::counter!("meridian.load.invalid_date").increment(report.invalid_date as u64);

    if !report.is_clean() {
        tracing::info!(
            rows = table.len(),
            invalid_date = report.invalid_date,
            duplicates = report.duplicates,
            out_of_order = report.out_of_order,
            "price file cleaned"
        );
    }

    Ok(TableView { table, report })
}
