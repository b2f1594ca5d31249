use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A typed Transmission RPC call.
///
/// Each request struct names its RPC method and the shape of the `arguments`
/// object the daemon sends back for it.
pub trait RpcCall: Serialize {
    const METHOD: &'static str;
    type Response: DeserializeOwned;
}

/// Envelope sent to the daemon: `{"method": ..., "arguments": {...}}`
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, A: Serialize> {
    pub method: &'static str,
    pub arguments: &'a A,
}

/// Envelope returned by the daemon: `{"result": "success", "arguments": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<R> {
    pub result: String,
    pub arguments: Option<R>,
}

/// Empty arguments object, used by calls that only confirm success
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

// ============================================================================
// torrent-get
// ============================================================================

/// Fields requested for every torrent listing
pub(crate) const TORRENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "status",
    "percentDone",
    "totalSize",
    "downloadedEver",
    "downloadDir",
];

#[derive(Debug, Clone, Serialize)]
pub struct TorrentGet {
    pub fields: Vec<&'static str>,
}

impl Default for TorrentGet {
    fn default() -> Self {
        Self {
            fields: TORRENT_FIELDS.to_vec(),
        }
    }
}

impl RpcCall for TorrentGet {
    const METHOD: &'static str = "torrent-get";
    type Response = TorrentList;
}

#[derive(Debug, Clone, Deserialize)]
pub struct TorrentList {
    pub torrents: Vec<Torrent>,
}

/// Torrent snapshot as reported by `torrent-get`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Torrent {
    /// Daemon-local numeric id
    pub id: i64,

    #[serde(default)]
    pub name: String,

    /// Native status code (0 stopped .. 6 seeding)
    pub status: i64,

    /// Completion fraction (0.0 to 1.0)
    #[serde(default)]
    pub percent_done: f64,

    /// Total size in bytes
    #[serde(default)]
    pub total_size: i64,

    #[serde(default)]
    pub downloaded_ever: i64,

    /// Directory the daemon writes this torrent's data into
    #[serde(default)]
    pub download_dir: String,
}

// ============================================================================
// torrent-add
// ============================================================================

/// Request body for adding a torrent from a magnet link or torrent URL
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddTorrentRequest {
    pub filename: String,
    #[serde(rename = "download-dir", skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

impl AddTorrentRequest {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            filename: url.into(),
            download_dir: None,
        }
    }

    pub fn download_dir(mut self, dir: impl Into<String>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }
}

impl RpcCall for AddTorrentRequest {
    const METHOD: &'static str = "torrent-add";
    type Response = TorrentAdded;
}

/// `torrent-add` answers with exactly one of the two keys
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TorrentAdded {
    #[serde(rename = "torrent-added")]
    pub added: Option<AddedTorrent>,
    #[serde(rename = "torrent-duplicate")]
    pub duplicate: Option<AddedTorrent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedTorrent {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hash_string: String,
}

// ============================================================================
// torrent-start / torrent-stop / torrent-remove
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TorrentStart {
    pub ids: Vec<i64>,
}

impl RpcCall for TorrentStart {
    const METHOD: &'static str = "torrent-start";
    type Response = Empty;
}

#[derive(Debug, Clone, Serialize)]
pub struct TorrentStop {
    pub ids: Vec<i64>,
}

impl RpcCall for TorrentStop {
    const METHOD: &'static str = "torrent-stop";
    type Response = Empty;
}

#[derive(Debug, Clone, Serialize)]
pub struct TorrentRemove {
    pub ids: Vec<i64>,
    #[serde(rename = "delete-local-data")]
    pub delete_local_data: bool,
}

impl RpcCall for TorrentRemove {
    const METHOD: &'static str = "torrent-remove";
    type Response = Empty;
}

// ============================================================================
// session-get
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionGet {}

impl RpcCall for SessionGet {
    const METHOD: &'static str = "session-get";
    type Response = Session;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(rename = "rpc-version", default)]
    pub rpc_version: Option<i64>,
}
