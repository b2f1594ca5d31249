use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::services::{SyncOutcome, SyncReport};
use crate::state::AppState;

/// Run a sync with Transmission now
///
/// Shares its guard with the scheduled sync: while one is running, this
/// returns 409 instead of starting another.
#[utoipa::path(
    post,
    path = "/api/sync",
    tag = "sync",
    responses(
        (status = 200, description = "Sync completed", body = SyncReport),
        (status = 409, description = "A sync is already running"),
        (status = 502, description = "Transmission unreachable")
    )
)]
pub async fn trigger_sync(State(state): State<AppState>) -> AppResult<Json<SyncReport>> {
    tracing::info!("Manually triggering sync");

    match state.sync.tick().await? {
        SyncOutcome::Completed(report) => Ok(Json(report)),
        SyncOutcome::Skipped => Err(AppError::conflict("A sync is already running")),
    }
}
