use sqlx::SqlitePool;
use std::sync::Arc;
use tmdb::TmdbClient;

use crate::config::Config;
use crate::services::{
    Downloader, DownloaderError, FileMover, PlacementPolicy, PosterLookup, SchedulerService,
    SyncEngine, SyncJob, TransmissionDownloader,
};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub downloader: Arc<dyn Downloader>,
    pub poster: Arc<PosterLookup>,
    pub sync: Arc<SyncEngine>,
    pub scheduler: Arc<SchedulerService>,
}

impl AppState {
    /// Wire up services against the configured Transmission daemon.
    ///
    /// The scheduler is built but not started.
    pub fn new(db: SqlitePool, config: Config) -> Result<Self, DownloaderError> {
        let downloader = TransmissionDownloader::from_config(&config.transmission)?;
        let tmdb = TmdbClient::with_client(reqwest::Client::new(), &config.tmdb_api_key);

        Ok(Self::with_services(db, config, Arc::new(downloader), Arc::new(tmdb)))
    }

    /// Build the state around already constructed clients
    pub fn with_services(
        db: SqlitePool,
        config: Config,
        downloader: Arc<dyn Downloader>,
        tmdb: Arc<TmdbClient>,
    ) -> Self {
        let poster = Arc::new(PosterLookup::new(tmdb));

        let placement = PlacementPolicy::new(config.library.clone());
        let mover = FileMover::new(db.clone(), placement);
        let sync = Arc::new(SyncEngine::new(db.clone(), Arc::clone(&downloader), mover));

        let scheduler = SchedulerService::new()
            .with_job(SyncJob::new(Arc::clone(&sync), config.sync_interval()));

        Self {
            db,
            config: Arc::new(config),
            downloader,
            poster,
            sync,
            scheduler: Arc::new(scheduler),
        }
    }
}
