pub mod api;
pub mod pages;
pub mod system;

use axum::Router;
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the page, API and system routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(pages::routes())
        .merge(api::routes())
        .merge(system::routes())
}

/// Runs the synchronous load/aggregate/render pipeline off the async workers.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| AppError::Internal(format!("worker task failed: {err}")))?
}
