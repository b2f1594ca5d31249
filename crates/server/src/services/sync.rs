use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use super::downloader::{Downloader, DownloaderError, TorrentSnapshot};
use super::mover::FileMover;
use super::status::{map_status, progress_percent};
use crate::models::{Download, DownloadStatus};
use crate::repositories::DownloadRepository;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to list torrents: {0}")]
    Downloader(#[from] DownloaderError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Records changed by one tick
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SyncReport {
    pub updated: usize,
    pub downloads: Vec<Download>,
}

#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Another tick was already running
    Skipped,
    Completed(SyncReport),
}

/// Keeps download records in line with the daemon and moves finished
/// content into the library.
///
/// Ticks are serialized: a tick started while another one is in flight
/// returns [`SyncOutcome::Skipped`] without touching the daemon or the
/// database.
pub struct SyncEngine {
    db: SqlitePool,
    downloader: Arc<dyn Downloader>,
    mover: FileMover,
    in_progress: AtomicBool,
}

impl SyncEngine {
    pub fn new(db: SqlitePool, downloader: Arc<dyn Downloader>, mover: FileMover) -> Self {
        Self {
            db,
            downloader,
            mover,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Check if a tick is currently running
    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    pub async fn tick(&self) -> Result<SyncOutcome, SyncError> {
        let Some(_guard) = RunGuard::acquire(&self.in_progress) else {
            tracing::debug!("Sync already in progress, skipping tick");
            return Ok(SyncOutcome::Skipped);
        };

        let torrents = self.downloader.list_torrents().await.map_err(|e| {
            tracing::warn!("Sync aborted, {} unavailable: {}", self.downloader.downloader_type(), e);
            e
        })?;
        let torrents: HashMap<i64, TorrentSnapshot> = torrents
            .into_iter()
            .map(|t| (t.external_id, t))
            .collect();

        let records = DownloadRepository::find_for_sync(
            &self.db,
            &[DownloadStatus::Downloading, DownloadStatus::Moving],
        )
        .await?;

        let mut report = SyncReport::default();
        for record in records {
            let Some(snapshot) = record.torrent_id.and_then(|id| torrents.get(&id)) else {
                tracing::debug!("Torrent for download {} not found in daemon", record.id);
                continue;
            };

            if self.reconcile(&record, snapshot).await? {
                report.updated += 1;
                if let Some(updated) = DownloadRepository::get_by_id(&self.db, record.id).await? {
                    report.downloads.push(updated);
                }
            }
        }

        if report.updated > 0 {
            tracing::info!("Sync completed: {} downloads updated", report.updated);
        } else {
            tracing::debug!("Sync completed: nothing to update");
        }

        Ok(SyncOutcome::Completed(report))
    }

    /// Apply one torrent snapshot to its record. Returns whether anything was written.
    async fn reconcile(&self, record: &Download, snapshot: &TorrentSnapshot) -> Result<bool, sqlx::Error> {
        let status = map_status(snapshot.native_status);
        let progress = progress_percent(snapshot.fraction_done);

        match record.status {
            // A move already started; only a finished torrent resumes it
            DownloadStatus::Moving => {
                if status != DownloadStatus::Finished {
                    return Ok(false);
                }
                let outcome = self.mover.move_to_library(record, &snapshot.download_dir).await?;
                Ok(outcome.is_settled())
            }
            DownloadStatus::Downloading if status == DownloadStatus::Finished => {
                if progress != record.progress || record.size != Some(snapshot.total_size) {
                    DownloadRepository::update_sync(
                        &self.db,
                        record.id,
                        DownloadStatus::Downloading,
                        progress,
                        snapshot.total_size,
                    )
                    .await?;
                }
                tracing::info!("Download {} ({}) complete, moving to library", record.id, record.title);
                // The mover marks the record Moving before anything else, so this
                // branch always writes even when the move itself is retried later
                self.mover.move_to_library(record, &snapshot.download_dir).await?;
                Ok(true)
            }
            _ => {
                if status == record.status && progress == record.progress {
                    return Ok(false);
                }
                DownloadRepository::update_sync(
                    &self.db,
                    record.id,
                    status,
                    progress,
                    snapshot.total_size,
                )
                .await?;
                Ok(true)
            }
        }
    }
}

/// Holds the in-progress flag for the lifetime of one tick
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
