use utoipa::OpenApi;

use crate::models::{
    Category, CreateDownload, CreateReminder, DaemonHealth, DatabaseHealth, Download,
    DownloadStatus, HealthResponse, Reminder, Statistics, UpdateReminder,
};
use crate::services::SyncReport;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Plexdl API",
        version = "1.0.0"
    ),
    tags(
        (name = "downloads", description = "Download management endpoints"),
        (name = "categories", description = "Media categories"),
        (name = "reminders", description = "Wishlist endpoints"),
        (name = "sync", description = "Transmission synchronisation"),
        (name = "health", description = "Service health")
    ),
    components(schemas(
        Category,
        CreateDownload,
        CreateReminder,
        DaemonHealth,
        DatabaseHealth,
        Download,
        DownloadStatus,
        HealthResponse,
        Reminder,
        Statistics,
        SyncReport,
        UpdateReminder
    ))
)]
pub struct ApiDoc;
