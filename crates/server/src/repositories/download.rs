use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::{CreateDownload, Download, DownloadFilter, DownloadStatus};

/// Common SELECT fields for download queries (joined with category name)
const SELECT_DOWNLOAD: &str = r#"
    SELECT
        d.id, d.created_at, d.updated_at,
        d.title, d.status, d.progress, d.size,
        d.category_id, c.name AS category_name,
        d.torrent_id, d.magnet_link, d.final_path,
        d.download_date, d.release_date, d.season, d.image_url
    FROM download d
    JOIN category c ON c.id = d.category_id
"#;

pub struct DownloadRepository;

impl DownloadRepository {
    /// Create a new download in the Downloading state
    pub async fn create(pool: &SqlitePool, data: CreateDownload) -> Result<Download, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO download (
                title, status, progress, category_id, magnet_link,
                download_date, release_date, season, image_url
            )
            VALUES ($1, $2, 0, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(DownloadStatus::Downloading.as_str())
        .bind(data.category_id)
        .bind(&data.magnet_link)
        .bind(Utc::now())
        .bind(data.release_date)
        .bind(data.season)
        .bind(&data.image_url)
        .fetch_one(pool)
        .await?;

        let id: i64 = sqlx::Row::get(&result, "id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Get a download by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Download>, sqlx::Error> {
        let query = format!("{} WHERE d.id = $1", SELECT_DOWNLOAD);
        let row = sqlx::query_as::<_, DownloadRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List downloads, newest first, optionally filtered by status and category name
    pub async fn list(pool: &SqlitePool, filter: &DownloadFilter) -> Result<Vec<Download>, sqlx::Error> {
        let query = format!(
            "{} WHERE ($1 IS NULL OR d.status = $1) AND ($2 IS NULL OR c.name = $2) \
             ORDER BY d.created_at DESC, d.id DESC",
            SELECT_DOWNLOAD
        );
        let rows = sqlx::query_as::<_, DownloadRow>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.category.as_deref())
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Records the sync engine has to look at: linked to a torrent and in one
    /// of the given statuses, oldest first.
    pub async fn find_for_sync(
        pool: &SqlitePool,
        statuses: &[DownloadStatus],
    ) -> Result<Vec<Download>, sqlx::Error> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=statuses.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "{} WHERE d.torrent_id IS NOT NULL AND d.status IN ({}) ORDER BY d.id ASC",
            SELECT_DOWNLOAD, placeholders
        );

        let mut q = sqlx::query_as::<_, DownloadRow>(&query);
        for status in statuses {
            q = q.bind(status.as_str());
        }
        let rows = q.fetch_all(pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Link a download to its daemon torrent.
    ///
    /// Only succeeds while no torrent is linked yet; an existing link is never replaced.
    pub async fn set_torrent_id(
        pool: &SqlitePool,
        id: i64,
        torrent_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE download SET torrent_id = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND torrent_id IS NULL
            "#,
        )
        .bind(torrent_id)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Persist the daemon's view of a download
    pub async fn update_sync(
        pool: &SqlitePool,
        id: i64,
        status: DownloadStatus,
        progress: i32,
        size: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE download SET
                status = $1,
                progress = $2,
                size = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $4
            "#,
        )
        .bind(status.as_str())
        .bind(progress)
        .bind(size)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update status only (manual pause/resume, move workflow steps)
    pub async fn update_status(
        pool: &SqlitePool,
        id: i64,
        status: DownloadStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE download SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark a download as being moved into the library
    pub async fn mark_moving(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        Self::update_status(pool, id, DownloadStatus::Moving).await
    }

    /// Mark a download as failed
    pub async fn mark_error(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        Self::update_status(pool, id, DownloadStatus::Error).await
    }

    /// Mark a download as finished at its library path.
    ///
    /// The only write that sets the Finished status.
    pub async fn mark_finished(
        pool: &SqlitePool,
        id: i64,
        final_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE download SET
                status = $1,
                final_path = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $3
            "#,
        )
        .bind(DownloadStatus::Finished.as_str())
        .bind(final_path)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a download by ID
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM download WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count downloads, optionally restricted to one status
    pub async fn count(pool: &SqlitePool, status: Option<DownloadStatus>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM download WHERE ($1 IS NULL OR status = $1)")
            .bind(status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct DownloadRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    title: String,
    status: String,
    progress: i32,
    size: Option<i64>,
    category_id: i64,
    category_name: String,
    torrent_id: Option<i64>,
    magnet_link: Option<String>,
    final_path: Option<String>,
    download_date: Option<DateTime<Utc>>,
    release_date: Option<NaiveDate>,
    season: Option<i32>,
    image_url: Option<String>,
}

impl From<DownloadRow> for Download {
    fn from(row: DownloadRow) -> Self {
        let status = row.status.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid download status '{}' for download id {}, defaulting to Error",
                row.status,
                row.id
            );
            DownloadStatus::Error
        });

        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            title: row.title,
            status,
            progress: row.progress,
            size: row.size,
            category_id: row.category_id,
            category_name: row.category_name,
            torrent_id: row.torrent_id,
            magnet_link: row.magnet_link,
            final_path: row.final_path,
            download_date: row.download_date,
            release_date: row.release_date,
            season: row.season,
            image_url: row.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::repositories::CategoryRepository;

    async fn films_id(pool: &SqlitePool) -> i64 {
        CategoryRepository::get_by_name(pool, "films")
            .await
            .unwrap()
            .unwrap()
            .id
    }

    fn new_download(title: &str, category_id: i64) -> CreateDownload {
        CreateDownload {
            title: title.to_string(),
            category_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let pool = create_memory_pool().await;
        let category_id = films_id(&pool).await;

        let download = DownloadRepository::create(&pool, new_download("Movie.mkv", category_id))
            .await
            .unwrap();

        assert_eq!(download.status, DownloadStatus::Downloading);
        assert_eq!(download.progress, 0);
        assert_eq!(download.category_name, "films");
        assert!(download.torrent_id.is_none());
        assert!(download.final_path.is_none());
        assert!(download.download_date.is_some());
    }

    #[tokio::test]
    async fn test_torrent_id_is_never_reassigned() {
        let pool = create_memory_pool().await;
        let category_id = films_id(&pool).await;
        let download = DownloadRepository::create(&pool, new_download("A", category_id))
            .await
            .unwrap();

        assert!(DownloadRepository::set_torrent_id(&pool, download.id, 42).await.unwrap());
        assert!(!DownloadRepository::set_torrent_id(&pool, download.id, 43).await.unwrap());

        let reloaded = DownloadRepository::get_by_id(&pool, download.id).await.unwrap().unwrap();
        assert_eq!(reloaded.torrent_id, Some(42));
    }

    #[tokio::test]
    async fn test_find_for_sync_filters_status_and_link() {
        let pool = create_memory_pool().await;
        let category_id = films_id(&pool).await;

        let linked = DownloadRepository::create(&pool, new_download("linked", category_id)).await.unwrap();
        DownloadRepository::set_torrent_id(&pool, linked.id, 1).await.unwrap();

        let moving = DownloadRepository::create(&pool, new_download("moving", category_id)).await.unwrap();
        DownloadRepository::set_torrent_id(&pool, moving.id, 2).await.unwrap();
        DownloadRepository::mark_moving(&pool, moving.id).await.unwrap();

        let finished = DownloadRepository::create(&pool, new_download("finished", category_id)).await.unwrap();
        DownloadRepository::set_torrent_id(&pool, finished.id, 3).await.unwrap();
        DownloadRepository::mark_finished(&pool, finished.id, "/plex/movies/finished").await.unwrap();

        DownloadRepository::create(&pool, new_download("unlinked", category_id)).await.unwrap();

        let found = DownloadRepository::find_for_sync(
            &pool,
            &[DownloadStatus::Downloading, DownloadStatus::Moving],
        )
        .await
        .unwrap();

        let titles: Vec<_> = found.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["linked", "moving"]);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let pool = create_memory_pool().await;
        let films = films_id(&pool).await;
        let series = CategoryRepository::get_by_name(&pool, "series").await.unwrap().unwrap().id;

        let a = DownloadRepository::create(&pool, new_download("a", films)).await.unwrap();
        DownloadRepository::create(&pool, new_download("b", series)).await.unwrap();
        DownloadRepository::update_status(&pool, a.id, DownloadStatus::Paused).await.unwrap();

        let all = DownloadRepository::list(&pool, &DownloadFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let paused = DownloadRepository::list(
            &pool,
            &DownloadFilter {
                status: Some(DownloadStatus::Paused),
                category: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(paused.len(), 1);
        assert_eq!(paused[0].title, "a");

        let in_series = DownloadRepository::list(
            &pool,
            &DownloadFilter {
                status: None,
                category: Some("series".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(in_series.len(), 1);
        assert_eq!(in_series[0].title, "b");

        assert_eq!(DownloadRepository::count(&pool, None).await.unwrap(), 2);
        assert_eq!(
            DownloadRepository::count(&pool, Some(DownloadStatus::Downloading)).await.unwrap(),
            1
        );
    }
}
