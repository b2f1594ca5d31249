use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::models::{
    DaemonHealth, DatabaseHealth, DownloadStatus, HealthResponse, Statistics,
};
use crate::repositories::{DownloadRepository, ReminderRepository};
use crate::state::AppState;

async fn collect_statistics(state: &AppState) -> Result<Statistics, sqlx::Error> {
    let (total_downloads, downloading, finished, total_reminders) = futures::try_join!(
        DownloadRepository::count(&state.db, None),
        DownloadRepository::count(&state.db, Some(DownloadStatus::Downloading)),
        DownloadRepository::count(&state.db, Some(DownloadStatus::Finished)),
        ReminderRepository::count(&state.db),
    )?;

    Ok(Statistics {
        total_downloads,
        downloading,
        finished,
        total_reminders,
    })
}

/// Service health
///
/// Reports database reachability, Transmission connectivity and record
/// counts. A Transmission outage alone does not make the service unhealthy.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let transmission = match state.downloader.health_check().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Health check: {} unreachable: {}", state.downloader.downloader_type(), e);
            "disconnected"
        }
    };

    let (status, database, statistics) = match collect_statistics(&state).await {
        Ok(statistics) => (StatusCode::OK, "connected", statistics),
        Err(e) => {
            tracing::error!("Health check: database unavailable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "disconnected", Statistics::default())
        }
    };

    let response = HealthResponse {
        status: if status.is_success() { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            status: database.to_string(),
        },
        transmission: DaemonHealth {
            status: transmission.to_string(),
        },
        statistics,
    };

    (status, Json(response))
}
