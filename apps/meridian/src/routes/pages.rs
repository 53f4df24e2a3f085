use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use meridian_application::monthly::monthly_series;
use meridian_application::table_view::load_table_view;
use meridian_domain::errors::TableError;
use meridian_domain::value_objects::price_column::PriceColumn;
use meridian_infrastructure::reporting::html::{render_monthly_chart_page, render_table_page};
use std::sync::Arc;

use super::run_blocking;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(table_page))
        .route("/monthlyvolume", get(monthly_volume))
        .route("/volume-monthly", get(monthly_volume))
        .route("/monthlyopen", get(monthly_open))
        .route("/monthlyclose", get(monthly_close))
        .route("/monthly/{column}", get(monthly_any))
}

/// GET /: the whole cleaned file as a table.
async fn table_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let html = run_blocking(move || {
        let view = load_table_view(state.repo.as_ref(), &state.source)?;
        Ok(render_table_page(&view.table, &view.report))
    })
    .await?;
    Ok(Html(html))
}

async fn monthly_volume(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    monthly_chart(state, PriceColumn::Volume).await
}

async fn monthly_open(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    monthly_chart(state, PriceColumn::Open).await
}

async fn monthly_close(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    monthly_chart(state, PriceColumn::Close).await
}

/// GET /monthly/{column}: any numeric column by name.
async fn monthly_any(
    State(state): State<Arc<AppState>>,
    Path(column): Path<String>,
) -> Result<Html<String>, AppError> {
    let column = parse_column(&column)?;
    monthly_chart(state, column).await
}

pub(crate) fn parse_column(raw: &str) -> Result<PriceColumn, AppError> {
    PriceColumn::parse(raw)
        .map_err(|_| AppError::Table(TableError::InvalidColumn(raw.to_string())))
}

async fn monthly_chart(
    state: Arc<AppState>,
    column: PriceColumn,
) -> Result<Html<String>, AppError> {
    let html = run_blocking(move || {
        let series = monthly_series(state.repo.as_ref(), &state.source, &state.window, column)?;
        render_monthly_chart_page(series.column, &series.window, &series.points)
            .map_err(AppError::Internal)
    })
    .await?;
    Ok(Html(html))
}
