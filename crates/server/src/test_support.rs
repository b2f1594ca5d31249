//! Shared fixtures for unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tmdb::TmdbClient;
use tokio::sync::Notify;

use crate::config::{Config, Environment};
use crate::db::create_memory_pool;
use crate::models::{CreateDownload, Download};
use crate::repositories::{CategoryRepository, DownloadRepository};
use crate::services::{Downloader, DownloaderError, TorrentSnapshot};
use crate::state::AppState;

/// Insert a download in the named category, optionally linked to a torrent
pub async fn seed_download(
    pool: &SqlitePool,
    title: &str,
    category: &str,
    torrent_id: Option<i64>,
) -> Download {
    let category = CategoryRepository::get_by_name(pool, category)
        .await
        .unwrap()
        .expect("category exists");

    let download = DownloadRepository::create(
        pool,
        CreateDownload {
            title: title.to_string(),
            category_id: category.id,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    if let Some(torrent_id) = torrent_id {
        DownloadRepository::set_torrent_id(pool, download.id, torrent_id)
            .await
            .unwrap();
    }

    DownloadRepository::get_by_id(pool, download.id)
        .await
        .unwrap()
        .unwrap()
}

pub fn snapshot(id: i64, status: i64, fraction_done: f64, size: i64, dir: &str) -> TorrentSnapshot {
    TorrentSnapshot {
        external_id: id,
        name: format!("torrent-{id}"),
        native_status: status,
        fraction_done,
        total_size: size,
        download_dir: dir.to_string(),
    }
}

/// Daemon calls recorded by [`FakeDownloader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonCall {
    Add { uri: String, download_dir: Option<String> },
    Pause(i64),
    Resume(i64),
    Remove { id: i64, delete_data: bool },
}

/// In-memory daemon
#[derive(Default)]
pub struct FakeDownloader {
    torrents: Mutex<Vec<TorrentSnapshot>>,
    calls: Mutex<Vec<DaemonCall>>,
    list_calls: AtomicUsize,
    fail: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
    next_id: AtomicUsize,
}

impl FakeDownloader {
    pub fn set_torrents(&self, torrents: Vec<TorrentSnapshot>) {
        *self.torrents.lock() = torrents;
    }

    /// Make every call fail as if the daemon were unreachable
    pub fn set_unreachable(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Park the next `list_torrents` until the returned notify fires
    pub fn hold_listing(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<DaemonCall> {
        self.calls.lock().clone()
    }

    fn check(&self) -> Result<(), DownloaderError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DownloaderError::Transmission(
                transmission::TransmissionError::Protocol("daemon down".into()),
            ))
        } else {
            Ok(())
        }
    }

    fn record(&self, call: DaemonCall) -> Result<(), DownloaderError> {
        self.check()?;
        self.calls.lock().push(call);
        Ok(())
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn list_torrents(&self) -> Result<Vec<TorrentSnapshot>, DownloaderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check()?;
        Ok(self.torrents.lock().clone())
    }

    async fn add_torrent(&self, uri: &str, download_dir: Option<&str>) -> Result<i64, DownloaderError> {
        self.record(DaemonCall::Add {
            uri: uri.to_string(),
            download_dir: download_dir.map(str::to_string),
        })?;
        Ok(100 + self.next_id.fetch_add(1, Ordering::SeqCst) as i64)
    }

    async fn pause(&self, id: i64) -> Result<(), DownloaderError> {
        self.record(DaemonCall::Pause(id))
    }

    async fn resume(&self, id: i64) -> Result<(), DownloaderError> {
        self.record(DaemonCall::Resume(id))
    }

    async fn remove(&self, id: i64, delete_data: bool) -> Result<(), DownloaderError> {
        self.record(DaemonCall::Remove { id, delete_data })
    }

    async fn health_check(&self) -> Result<(), DownloaderError> {
        self.check()
    }

    fn downloader_type(&self) -> &'static str {
        "Fake"
    }
}

/// Application state backed by an in-memory database and a [`FakeDownloader`]
pub async fn test_state() -> (AppState, Arc<FakeDownloader>) {
    let pool = create_memory_pool().await;
    let daemon = Arc::new(FakeDownloader::default());
    let config = Config::new(Environment::Dev, std::env::temp_dir());
    let tmdb = Arc::new(TmdbClient::with_client(reqwest::Client::new(), ""));

    let state = AppState::with_services(pool, config, daemon.clone(), tmdb);
    (state, daemon)
}
