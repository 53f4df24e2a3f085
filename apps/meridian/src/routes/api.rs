use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use meridian_application::monthly::monthly_series;
use serde_json::{json, Value};
use std::sync::Arc;

use super::pages::parse_column;
use super::run_blocking;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/monthly/{column}", get(monthly_json))
}

/// GET /api/monthly/{column}: monthly means as JSON.
async fn monthly_json(
    State(state): State<Arc<AppState>>,
    Path(column): Path<String>,
) -> Result<Json<Value>, AppError> {
    let column = parse_column(&column)?;
    let series = run_blocking(move || {
        Ok(monthly_series(
            state.repo.as_ref(),
            &state.source,
            &state.window,
            column,
        )?)
    })
    .await?;

    Ok(Json(json!({
        "column": series.column,
        "start": series.window.start().to_string(),
        "end": series.window.end().to_string(),
        "points": series.points,
    })))
}
