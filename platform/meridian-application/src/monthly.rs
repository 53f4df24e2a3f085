use crate::table_view::load_table_view;
use meridian_domain::errors::TableError;
use meridian_domain::repositories::price_data::{PriceDataRepository, PriceSource};
use meridian_domain::services::aggregation::{monthly_mean, MonthlyAggregate};
use meridian_domain::value_objects::date_window::DateWindow;
use meridian_domain::value_objects::price_column::PriceColumn;
use tracing::info_span;

#[derive(Debug, Clone)]
pub struct MonthlySeries {
    pub column: PriceColumn,
    pub window: DateWindow,
    pub points: Vec<MonthlyAggregate>,
}

/// Load, filter to `window`, and average `column` per calendar month.
pub fn monthly_series(
    repo: &dyn PriceDataRepository,
    source: &PriceSource,
    window: &DateWindow,
    column: PriceColumn,
) -> Result<MonthlySeries, TableError> {
    let view = load_table_view(repo, source)?;
    let _span = info_span!("monthly_series", column = %column).entered();

    if !view.table.has_column(column) {
        return Err(TableError::MissingColumn(column.label().to_string()));
    }

    let points = monthly_mean(view.table.rows_in(window), column, window);
    if points.is_empty() {
        return Err(TableError::NoData(format!(
            "no {} values between {} and {}",
            column.label(),
            window.start(),
            window.end()
        )));
    }
    metrics::gauge!("meridian.monthly.points").set(points.len() as f64);

    Ok(MonthlySeries {
        column,
        window: *window,
        points,
    })
}
