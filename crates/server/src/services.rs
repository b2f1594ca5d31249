mod downloader;
mod mover;
mod placement;
mod poster;
mod scheduler;
mod status;
mod sync;

pub use downloader::{Downloader, DownloaderError, TorrentSnapshot, TransmissionDownloader};
pub use mover::{FileMover, MoveOutcome};
pub use placement::{PathSanitizer, PlacementError, PlacementPolicy, PlannedMove};
pub use poster::PosterLookup;
pub use scheduler::{JobResult, SchedulerJob, SchedulerService, SyncJob};
pub use status::{map_status, progress_percent};
pub use sync::{SyncEngine, SyncError, SyncOutcome, SyncReport};
