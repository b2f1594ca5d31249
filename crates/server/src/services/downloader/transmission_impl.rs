use async_trait::async_trait;
use transmission::{AddTorrentRequest, TransmissionClient};

use super::error::{DownloaderError, Result};
use super::models::TorrentSnapshot;
use super::traits::Downloader;
use crate::config::TransmissionConfig;

/// Transmission downloader wrapper
pub struct TransmissionDownloader {
    client: TransmissionClient,
}

impl TransmissionDownloader {
    pub fn new(client: TransmissionClient) -> Self {
        Self { client }
    }

    /// Build a downloader from the daemon connection settings
    pub fn from_config(config: &TransmissionConfig) -> Result<Self> {
        let client = TransmissionClient::with_timeout(config.rpc_url(), config.timeout())
            .map_err(|e| DownloaderError::Config(e.to_string()))?;

        let client = match config.credentials() {
            Some((username, password)) => client.with_auth(username, password),
            None => client,
        };

        tracing::debug!("Transmission RPC endpoint: {}", client.rpc_url());
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Downloader for TransmissionDownloader {
    async fn list_torrents(&self) -> Result<Vec<TorrentSnapshot>> {
        let torrents = self.client.list_torrents().await?;
        Ok(torrents.into_iter().map(Into::into).collect())
    }

    async fn add_torrent(&self, uri: &str, download_dir: Option<&str>) -> Result<i64> {
        let mut request = AddTorrentRequest::with_url(uri);

        if let Some(dir) = download_dir {
            request = request.download_dir(dir);
        }

        Ok(self.client.add_torrent(request).await?)
    }

    async fn pause(&self, id: i64) -> Result<()> {
        Ok(self.client.stop_torrents(&[id]).await?)
    }

    async fn resume(&self, id: i64) -> Result<()> {
        Ok(self.client.start_torrents(&[id]).await?)
    }

    async fn remove(&self, id: i64, delete_data: bool) -> Result<()> {
        Ok(self.client.remove_torrents(&[id], delete_data).await?)
    }

    async fn health_check(&self) -> Result<()> {
        let session = self.client.session_get().await?;
        tracing::debug!(
            "Transmission {} is reachable",
            session.version.as_deref().unwrap_or("(unknown version)")
        );
        Ok(())
    }

    fn downloader_type(&self) -> &'static str {
        "Transmission"
    }
}
