use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::traits::{JobResult, SchedulerJob};
use crate::services::{SyncEngine, SyncOutcome};

/// Periodic sync with the torrent daemon.
///
/// Shares its engine with the on-demand API trigger, so a manual sync and
/// a scheduled one never overlap.
pub struct SyncJob {
    engine: Arc<SyncEngine>,
    interval: Duration,
}

impl SyncJob {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }
}

#[async_trait]
impl SchedulerJob for SyncJob {
    fn name(&self) -> &'static str {
        "TransmissionSync"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn execute(&self) -> JobResult {
        match self.engine.tick().await? {
            SyncOutcome::Skipped => {
                tracing::debug!("Previous sync still running, skipped");
            }
            SyncOutcome::Completed(report) => {
                tracing::debug!("Scheduled sync updated {} downloads", report.updated);
            }
        }
        Ok(())
    }
}
