use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::models::{CreateDownload, Download, DownloadFilter, DownloadStatus};
use crate::repositories::{CategoryRepository, DownloadRepository};
use crate::state::AppState;

async fn find_download(state: &AppState, id: i64) -> AppResult<Download> {
    DownloadRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Download {} not found", id)))
}

fn linked_torrent(download: &Download) -> AppResult<i64> {
    download
        .torrent_id
        .ok_or_else(|| AppError::conflict("Download is not linked to a torrent"))
}

/// List downloads, newest first
#[utoipa::path(
    get,
    path = "/api/downloads",
    tag = "downloads",
    params(DownloadFilter),
    responses(
        (status = 200, description = "List of downloads", body = Vec<Download>)
    )
)]
pub async fn list_downloads(
    State(state): State<AppState>,
    Query(filter): Query<DownloadFilter>,
) -> AppResult<Json<Vec<Download>>> {
    let downloads = DownloadRepository::list(&state.db, &filter).await?;
    Ok(Json(downloads))
}

/// Get a download by ID
#[utoipa::path(
    get,
    path = "/api/downloads/{id}",
    tag = "downloads",
    params(
        ("id" = i64, Path, description = "Download ID")
    ),
    responses(
        (status = 200, description = "Download", body = Download),
        (status = 404, description = "Download not found")
    )
)]
pub async fn get_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Download>> {
    Ok(Json(find_download(&state, id).await?))
}

/// Create a download and hand its magnet link to Transmission
///
/// The record is created even when the daemon refuses or cannot be reached;
/// it is then simply not linked to a torrent.
#[utoipa::path(
    post,
    path = "/api/downloads",
    tag = "downloads",
    request_body = CreateDownload,
    responses(
        (status = 201, description = "Download created", body = Download),
        (status = 400, description = "Missing title or unknown category")
    )
)]
pub async fn create_download(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateDownload>,
) -> AppResult<(StatusCode, Json<Download>)> {
    payload.title = payload.title.trim().to_string();
    if payload.title.is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }

    let category = CategoryRepository::get_by_id(&state.db, payload.category_id)
        .await?
        .ok_or_else(|| AppError::bad_request(format!("Unknown category {}", payload.category_id)))?;

    payload.magnet_link = payload.magnet_link.filter(|m| !m.trim().is_empty());
    payload.image_url = payload.image_url.filter(|u| !u.trim().is_empty());
    if payload.image_url.is_none() {
        payload.image_url = state.poster.find_poster(&payload.title, &category.name).await;
    }

    let magnet_link = payload.magnet_link.clone();
    let download = DownloadRepository::create(&state.db, payload).await?;
    tracing::info!("Created download {} ({})", download.id, download.title);

    if let Some(magnet_link) = magnet_link {
        match state.downloader.add_torrent(&magnet_link, None).await {
            Ok(torrent_id) => {
                DownloadRepository::set_torrent_id(&state.db, download.id, torrent_id).await?;
                tracing::info!("Download {} linked to torrent {}", download.id, torrent_id);
            }
            Err(e) => {
                tracing::warn!("Failed to add torrent for download {}: {}", download.id, e);
            }
        }
    }

    let download = find_download(&state, download.id).await?;
    Ok((StatusCode::CREATED, Json(download)))
}

/// Pause a running download
#[utoipa::path(
    post,
    path = "/api/downloads/{id}/pause",
    tag = "downloads",
    params(
        ("id" = i64, Path, description = "Download ID")
    ),
    responses(
        (status = 200, description = "Download paused", body = Download),
        (status = 404, description = "Download not found"),
        (status = 409, description = "Download is not downloading or has no torrent"),
        (status = 502, description = "Transmission unreachable")
    )
)]
pub async fn pause_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Download>> {
    let download = find_download(&state, id).await?;
    if download.status != DownloadStatus::Downloading {
        return Err(AppError::conflict(format!(
            "Cannot pause a download in status {}",
            download.status
        )));
    }

    let torrent_id = linked_torrent(&download)?;
    state.downloader.pause(torrent_id).await?;
    DownloadRepository::update_status(&state.db, id, DownloadStatus::Paused).await?;

    Ok(Json(find_download(&state, id).await?))
}

/// Resume a paused or failed download
#[utoipa::path(
    post,
    path = "/api/downloads/{id}/resume",
    tag = "downloads",
    params(
        ("id" = i64, Path, description = "Download ID")
    ),
    responses(
        (status = 200, description = "Download resumed", body = Download),
        (status = 404, description = "Download not found"),
        (status = 409, description = "Download is not paused or has no torrent"),
        (status = 502, description = "Transmission unreachable")
    )
)]
pub async fn resume_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Download>> {
    let download = find_download(&state, id).await?;
    if !matches!(download.status, DownloadStatus::Paused | DownloadStatus::Error) {
        return Err(AppError::conflict(format!(
            "Cannot resume a download in status {}",
            download.status
        )));
    }

    let torrent_id = linked_torrent(&download)?;
    state.downloader.resume(torrent_id).await?;
    DownloadRepository::update_status(&state.db, id, DownloadStatus::Downloading).await?;

    Ok(Json(find_download(&state, id).await?))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DeleteDownloadQuery {
    /// Also delete the downloaded data from the daemon's directory
    #[serde(default)]
    pub delete_data: bool,
}

/// Delete a download and remove its torrent from Transmission
#[utoipa::path(
    delete,
    path = "/api/downloads/{id}",
    tag = "downloads",
    params(
        ("id" = i64, Path, description = "Download ID"),
        DeleteDownloadQuery
    ),
    responses(
        (status = 204, description = "Download deleted"),
        (status = 404, description = "Download not found")
    )
)]
pub async fn delete_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteDownloadQuery>,
) -> AppResult<StatusCode> {
    let download = find_download(&state, id).await?;

    if let Some(torrent_id) = download.torrent_id {
        if let Err(e) = state.downloader.remove(torrent_id, query.delete_data).await {
            tracing::warn!("Failed to remove torrent {} for download {}: {}", torrent_id, id, e);
        }
    }

    DownloadRepository::delete(&state.db, id).await?;
    tracing::info!("Deleted download {} ({})", id, download.title);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_download, test_state, DaemonCall};

    fn new_download(title: &str, magnet: Option<&str>) -> CreateDownload {
        CreateDownload {
            title: title.to_string(),
            category_id: 3,
            magnet_link: magnet.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_links_torrent() {
        let (state, daemon) = test_state().await;

        let (status, Json(download)) = create_download(
            State(state.clone()),
            Json(new_download("  Clip.mp4 ", Some("magnet:?xt=urn:btih:abc"))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(download.title, "Clip.mp4");
        assert_eq!(download.status, DownloadStatus::Downloading);
        assert_eq!(download.category_name, "other");
        assert_eq!(download.torrent_id, Some(100));
        assert_eq!(
            daemon.calls(),
            vec![DaemonCall::Add {
                uri: "magnet:?xt=urn:btih:abc".into(),
                download_dir: None
            }]
        );
    }

    #[tokio::test]
    async fn test_create_survives_daemon_failure() {
        let (state, daemon) = test_state().await;
        daemon.set_unreachable(true);

        let (_, Json(download)) = create_download(
            State(state),
            Json(new_download("Clip.mp4", Some("magnet:?xt=urn:btih:abc"))),
        )
        .await
        .unwrap();

        assert!(download.torrent_id.is_none());
        assert_eq!(download.status, DownloadStatus::Downloading);
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let (state, _) = test_state().await;

        let err = create_download(State(state.clone()), Json(new_download("   ", None)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let mut unknown = new_download("Movie", None);
        unknown.category_id = 999;
        let err = create_download(State(state), Json(unknown)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_pause_and_resume() {
        let (state, daemon) = test_state().await;
        let download = seed_download(&state.db, "Movie.mkv", "films", Some(42)).await;

        let Json(paused) = pause_download(State(state.clone()), Path(download.id)).await.unwrap();
        assert_eq!(paused.status, DownloadStatus::Paused);

        // Pausing twice is a conflict
        let err = pause_download(State(state.clone()), Path(download.id)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let Json(resumed) = resume_download(State(state.clone()), Path(download.id)).await.unwrap();
        assert_eq!(resumed.status, DownloadStatus::Downloading);

        assert_eq!(daemon.calls(), vec![DaemonCall::Pause(42), DaemonCall::Resume(42)]);
    }

    #[tokio::test]
    async fn test_pause_requires_torrent_and_reachable_daemon() {
        let (state, daemon) = test_state().await;
        let unlinked = seed_download(&state.db, "A", "films", None).await;
        let err = pause_download(State(state.clone()), Path(unlinked.id)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let linked = seed_download(&state.db, "B", "films", Some(7)).await;
        daemon.set_unreachable(true);
        let err = pause_download(State(state.clone()), Path(linked.id)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let record = DownloadRepository::get_by_id(&state.db, linked.id).await.unwrap().unwrap();
        assert_eq!(record.status, DownloadStatus::Downloading);
    }

    #[tokio::test]
    async fn test_delete_removes_torrent_and_record() {
        let (state, daemon) = test_state().await;
        let download = seed_download(&state.db, "Movie.mkv", "films", Some(42)).await;

        let status = delete_download(
            State(state.clone()),
            Path(download.id),
            Query(DeleteDownloadQuery { delete_data: true }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(
            daemon.calls(),
            vec![DaemonCall::Remove {
                id: 42,
                delete_data: true
            }]
        );
        let err = get_download(State(state), Path(download.id)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let (state, _) = test_state().await;
        seed_download(&state.db, "Movie.mkv", "films", None).await;
        seed_download(&state.db, "Show", "series", None).await;

        let Json(series) = list_downloads(
            State(state),
            Query(DownloadFilter {
                status: None,
                category: Some("series".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].title, "Show");
    }
}
