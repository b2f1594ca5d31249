mod sync_job;
mod traits;

pub use sync_job::SyncJob;
pub use traits::{JobResult, SchedulerJob};

use std::sync::Arc;
use tokio::task::JoinHandle;

/// Scheduler service that manages periodic background tasks.
///
/// Each registered job runs independently in its own tokio task.
///
/// # Example
///
/// ```rust,ignore
/// let scheduler = SchedulerService::new()
///     .with_job(SyncJob::new(engine, Duration::from_secs(300)));
///
/// scheduler.start();
/// ```
pub struct SchedulerService {
    jobs: Vec<Arc<dyn SchedulerJob>>,
}

impl SchedulerService {
    /// Creates a new scheduler service with no jobs.
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Adds a job to the scheduler.
    ///
    /// Jobs are not started until [`start`](Self::start) is called.
    pub fn with_job<J: SchedulerJob + 'static>(mut self, job: J) -> Self {
        self.jobs.push(Arc::new(job));
        self
    }

    /// Starts all registered jobs and returns their task handles.
    ///
    /// Returns immediately after spawning.
    pub fn start(&self) -> Vec<JoinHandle<()>> {
        self.jobs
            .iter()
            .map(|job| {
                let job = Arc::clone(job);
                tracing::info!("Starting job '{}' every {:?}", job.name(), job.interval());
                tokio::spawn(async move {
                    Self::run_job_loop(job).await;
                })
            })
            .collect()
    }

    /// Runs a single job in an infinite loop.
    async fn run_job_loop(job: Arc<dyn SchedulerJob>) {
        let name = job.name();

        let mut timer = tokio::time::interval(job.interval());
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            timer.tick().await;

            match job.execute().await {
                Ok(()) => {
                    tracing::debug!("Job '{}' completed successfully", name);
                }
                Err(e) => {
                    tracing::error!("Job '{}' failed: {}", name, e);
                }
            }
        }
    }

    /// Returns the number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for SchedulerService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingJob(Arc<AtomicUsize>);

    #[async_trait]
    impl SchedulerJob for CountingJob {
        fn name(&self) -> &'static str {
            "Counting"
        }

        fn interval(&self) -> Duration {
            Duration::from_secs(60)
        }

        async fn execute(&self) -> JobResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err("always fails".into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_on_interval_despite_errors() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = SchedulerService::new().with_job(CountingJob(runs.clone()));
        assert_eq!(scheduler.job_count(), 1);

        let handles = scheduler.start();
        tokio::time::sleep(Duration::from_secs(125)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 3);
        for handle in handles {
            handle.abort();
        }
    }
}
