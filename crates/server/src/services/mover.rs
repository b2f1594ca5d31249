use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

use super::placement::{PlacementError, PlacementPolicy};
use crate::models::{Download, DownloadStatus};
use crate::repositories::DownloadRepository;

/// Result of one attempt to move a download into the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Content moved, record is Finished
    Moved { final_path: PathBuf },
    /// Source not on disk yet, record stays Moving
    SourceMissing,
    /// No library root for the category, record stays Moving
    UnknownCategory,
    /// Move failed, record is Error
    Failed { reason: String },
}

impl MoveOutcome {
    /// Whether the attempt left the record in a different status than Moving
    pub fn is_settled(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. } | MoveOutcome::Failed { .. })
    }
}

/// Moves finished downloads from the daemon's directory into the library
pub struct FileMover {
    db: SqlitePool,
    placement: PlacementPolicy,
}

impl FileMover {
    pub fn new(db: SqlitePool, placement: PlacementPolicy) -> Self {
        Self { db, placement }
    }

    /// Run the move workflow for one download.
    ///
    /// The record is written as Moving before the filesystem is touched.
    /// Filesystem failures are contained in the returned outcome; only
    /// database errors are propagated.
    pub async fn move_to_library(
        &self,
        download: &Download,
        download_dir: &str,
    ) -> Result<MoveOutcome, sqlx::Error> {
        if download.status != DownloadStatus::Moving {
            DownloadRepository::mark_moving(&self.db, download.id).await?;
        }

        let root = match self.placement.destination_root(&download.category_name) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!("Download {} left in moving: {}", download.id, e);
                return Ok(MoveOutcome::UnknownCategory);
            }
        };

        let planned = match PlacementPolicy::compute_paths(&download.title, download_dir, root) {
            Ok(planned) => planned,
            Err(e @ PlacementError::UnsafeTitle(_)) => return self.fail(download, e.to_string()).await,
            Err(e @ PlacementError::UnknownCategory(_)) => {
                tracing::warn!("Download {} left in moving: {}", download.id, e);
                return Ok(MoveOutcome::UnknownCategory);
            }
        };

        match tokio::fs::try_exists(&planned.source).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(
                    "Source {} for download {} not found yet, will retry",
                    planned.source.display(),
                    download.id
                );
                return Ok(MoveOutcome::SourceMissing);
            }
            Err(e) => {
                return self
                    .fail(download, format!("cannot stat {}: {}", planned.source.display(), e))
                    .await;
            }
        }

        if let Err(reason) = relocate(&planned.source, &planned.destination).await {
            return self.fail(download, reason).await;
        }

        let final_path = planned.destination.to_string_lossy().into_owned();
        DownloadRepository::mark_finished(&self.db, download.id, &final_path).await?;
        tracing::info!("Moved '{}' to {}", download.title, final_path);

        Ok(MoveOutcome::Moved {
            final_path: planned.destination,
        })
    }

    async fn fail(&self, download: &Download, reason: String) -> Result<MoveOutcome, sqlx::Error> {
        tracing::error!("Failed to move download {} ({}): {}", download.id, download.title, reason);
        DownloadRepository::mark_error(&self.db, download.id).await?;
        Ok(MoveOutcome::Failed { reason })
    }
}

/// Rename `source` to `destination`, creating the destination directory.
/// An existing destination is never overwritten.
async fn relocate(source: &Path, destination: &Path) -> Result<(), String> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
    }

    match tokio::fs::try_exists(destination).await {
        Ok(false) => {}
        Ok(true) => return Err(format!("{} already exists", destination.display())),
        Err(e) => return Err(format!("cannot stat {}: {}", destination.display(), e)),
    }

    tokio::fs::rename(source, destination).await.map_err(|e| {
        format!(
            "cannot move {} to {}: {}",
            source.display(),
            destination.display(),
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryPaths;
    use crate::db::create_memory_pool;
    use crate::test_support::seed_download;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        downloads: PathBuf,
        library: LibraryPaths,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let downloads = tmp.path().join("downloads");
        std::fs::create_dir_all(&downloads).unwrap();
        let library = LibraryPaths {
            films: tmp.path().join("plex/movies"),
            series: tmp.path().join("plex/series"),
            other: tmp.path().join("plex/other"),
        };
        Fixture {
            _tmp: tmp,
            downloads,
            library,
        }
    }

    async fn status_of(pool: &SqlitePool, id: i64) -> Download {
        DownloadRepository::get_by_id(pool, id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_move_success() {
        let fx = fixture();
        let pool = create_memory_pool().await;
        std::fs::write(fx.downloads.join("Movie.mkv"), b"data").unwrap();
        let download = seed_download(&pool, "Movie.mkv", "films", Some(1)).await;

        let mover = FileMover::new(pool.clone(), PlacementPolicy::new(fx.library.clone()));
        let outcome = mover
            .move_to_library(&download, fx.downloads.to_str().unwrap())
            .await
            .unwrap();

        let expected = fx.library.films.join("Movie.mkv");
        assert_eq!(outcome, MoveOutcome::Moved { final_path: expected.clone() });
        assert!(expected.exists());
        assert!(!fx.downloads.join("Movie.mkv").exists());

        let record = status_of(&pool, download.id).await;
        assert_eq!(record.status, DownloadStatus::Finished);
        assert_eq!(record.final_path.as_deref(), expected.to_str());
    }

    #[tokio::test]
    async fn test_move_directory_content() {
        let fx = fixture();
        let pool = create_memory_pool().await;
        let season = fx.downloads.join("Show S01");
        std::fs::create_dir_all(&season).unwrap();
        std::fs::write(season.join("e01.mkv"), b"x").unwrap();
        let download = seed_download(&pool, "Show S01", "series", Some(2)).await;

        let mover = FileMover::new(pool.clone(), PlacementPolicy::new(fx.library.clone()));
        let outcome = mover
            .move_to_library(&download, fx.downloads.to_str().unwrap())
            .await
            .unwrap();

        assert!(outcome.is_settled());
        assert!(fx.library.series.join("Show S01/e01.mkv").exists());
    }

    #[tokio::test]
    async fn test_missing_source_stays_moving() {
        let fx = fixture();
        let pool = create_memory_pool().await;
        let download = seed_download(&pool, "NotYet.mkv", "films", Some(1)).await;

        let mover = FileMover::new(pool.clone(), PlacementPolicy::new(fx.library.clone()));
        let outcome = mover
            .move_to_library(&download, fx.downloads.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(outcome, MoveOutcome::SourceMissing);
        let record = status_of(&pool, download.id).await;
        assert_eq!(record.status, DownloadStatus::Moving);
        assert!(record.final_path.is_none());
    }

    #[tokio::test]
    async fn test_unknown_category_stays_moving() {
        let fx = fixture();
        let pool = create_memory_pool().await;
        sqlx::query("INSERT INTO category (name) VALUES ('autres')")
            .execute(&pool)
            .await
            .unwrap();
        std::fs::write(fx.downloads.join("Clip.mp4"), b"data").unwrap();
        let download = seed_download(&pool, "Clip.mp4", "autres", Some(3)).await;

        let mover = FileMover::new(pool.clone(), PlacementPolicy::new(fx.library.clone()));
        let outcome = mover
            .move_to_library(&download, fx.downloads.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(outcome, MoveOutcome::UnknownCategory);
        assert_eq!(status_of(&pool, download.id).await.status, DownloadStatus::Moving);
        assert!(fx.downloads.join("Clip.mp4").exists());
    }

    #[tokio::test]
    async fn test_unsafe_title_is_error() {
        let fx = fixture();
        let pool = create_memory_pool().await;
        let download = seed_download(&pool, "../escape", "films", Some(1)).await;

        let mover = FileMover::new(pool.clone(), PlacementPolicy::new(fx.library.clone()));
        let outcome = mover
            .move_to_library(&download, fx.downloads.to_str().unwrap())
            .await
            .unwrap();

        assert!(matches!(outcome, MoveOutcome::Failed { .. }));
        let record = status_of(&pool, download.id).await;
        assert_eq!(record.status, DownloadStatus::Error);
        assert!(record.final_path.is_none());
    }

    #[tokio::test]
    async fn test_existing_destination_is_error() {
        let fx = fixture();
        let pool = create_memory_pool().await;
        std::fs::write(fx.downloads.join("Movie.mkv"), b"new").unwrap();
        std::fs::create_dir_all(&fx.library.films).unwrap();
        std::fs::write(fx.library.films.join("Movie.mkv"), b"old").unwrap();
        let download = seed_download(&pool, "Movie.mkv", "films", Some(1)).await;

        let mover = FileMover::new(pool.clone(), PlacementPolicy::new(fx.library.clone()));
        let outcome = mover
            .move_to_library(&download, fx.downloads.to_str().unwrap())
            .await
            .unwrap();

        assert!(matches!(outcome, MoveOutcome::Failed { .. }));
        assert_eq!(status_of(&pool, download.id).await.status, DownloadStatus::Error);
        assert_eq!(std::fs::read(fx.library.films.join("Movie.mkv")).unwrap(), b"old");
    }
}
