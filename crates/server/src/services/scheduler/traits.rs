use async_trait::async_trait;
use std::time::Duration;

pub type JobResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A background job run by [`SchedulerService`](super::SchedulerService) at a fixed interval
#[async_trait]
pub trait SchedulerJob: Send + Sync {
    /// Job name used in logs
    fn name(&self) -> &'static str;

    /// Time between two runs. The first run happens immediately.
    fn interval(&self) -> Duration;

    async fn execute(&self) -> JobResult;
}
