use async_trait::async_trait;

use super::error::Result;
use super::models::TorrentSnapshot;

/// Torrent daemon interface used by the sync engine and the API
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Snapshot of every torrent the daemon knows about
    async fn list_torrents(&self) -> Result<Vec<TorrentSnapshot>>;

    /// Add a torrent from a magnet link or URL, returns the daemon id
    async fn add_torrent(&self, uri: &str, download_dir: Option<&str>) -> Result<i64>;

    async fn pause(&self, id: i64) -> Result<()>;

    async fn resume(&self, id: i64) -> Result<()>;

    /// Remove a torrent, optionally deleting its downloaded data
    async fn remove(&self, id: i64, delete_data: bool) -> Result<()>;

    /// Check that the daemon is reachable and accepts our credentials
    async fn health_check(&self) -> Result<()>;

    /// Get the downloader type name (for logging)
    fn downloader_type(&self) -> &'static str;
}
