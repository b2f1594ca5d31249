/// Point-in-time view of one torrent, as reported by the daemon
#[derive(Debug, Clone, PartialEq)]
pub struct TorrentSnapshot {
    pub external_id: i64,
    pub name: String,
    /// Raw daemon status code
    pub native_status: i64,
    /// Completion in `[0, 1]`
    pub fraction_done: f64,
    /// Bytes
    pub total_size: i64,
    /// Directory the torrent content sits in
    pub download_dir: String,
}

impl From<transmission::Torrent> for TorrentSnapshot {
    fn from(torrent: transmission::Torrent) -> Self {
        Self {
            external_id: torrent.id,
            name: torrent.name,
            native_status: torrent.status,
            fraction_done: torrent.percent_done,
            total_size: torrent.total_size,
            download_dir: torrent.download_dir,
        }
    }
}
