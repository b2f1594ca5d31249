use crate::client::TransmissionClient;
use crate::error::TransmissionError;
use crate::models::{
    AddTorrentRequest, Session, SessionGet, Torrent, TorrentGet, TorrentRemove, TorrentStart,
    TorrentStop,
};

impl TransmissionClient {
    /// List every torrent the daemon knows about
    /// RPC torrent-get
    pub async fn list_torrents(&self) -> crate::Result<Vec<Torrent>> {
        let list = self.call(&TorrentGet::default()).await?;
        Ok(list.torrents)
    }

    /// Add a torrent and return its daemon id.
    ///
    /// A duplicate answer is not an error: the id of the torrent already
    /// loaded in the daemon is returned instead.
    /// RPC torrent-add
    pub async fn add_torrent(&self, request: AddTorrentRequest) -> crate::Result<i64> {
        let added = self.call(&request).await?;

        match (added.added, added.duplicate) {
            (Some(torrent), _) => {
                tracing::debug!("Added torrent {} ({})", torrent.id, torrent.name);
                Ok(torrent.id)
            }
            (None, Some(torrent)) => {
                tracing::debug!("Torrent already present as {} ({})", torrent.id, torrent.name);
                Ok(torrent.id)
            }
            (None, None) => Err(TransmissionError::Protocol(
                "torrent-add response named no torrent".into(),
            )),
        }
    }

    /// Stop (pause) torrents
    /// RPC torrent-stop
    pub async fn stop_torrents(&self, ids: &[i64]) -> crate::Result<()> {
        self.call(&TorrentStop { ids: ids.to_vec() }).await?;
        Ok(())
    }

    /// Start (resume) torrents
    /// RPC torrent-start
    pub async fn start_torrents(&self, ids: &[i64]) -> crate::Result<()> {
        self.call(&TorrentStart { ids: ids.to_vec() }).await?;
        Ok(())
    }

    /// Remove torrents, optionally deleting their downloaded data
    /// RPC torrent-remove
    pub async fn remove_torrents(&self, ids: &[i64], delete_local_data: bool) -> crate::Result<()> {
        self.call(&TorrentRemove {
            ids: ids.to_vec(),
            delete_local_data,
        })
        .await?;
        Ok(())
    }

    /// Fetch session information, mostly useful as a connectivity probe
    /// RPC session-get
    pub async fn session_get(&self) -> crate::Result<Session> {
        self.call(&SessionGet::default()).await
    }
}
