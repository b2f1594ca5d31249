use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub database: DatabaseHealth,
    pub transmission: DaemonHealth,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DatabaseHealth {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaemonHealth {
    /// `connected` or `disconnected`
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Statistics {
    pub total_downloads: i64,
    pub downloading: i64,
    pub finished: i64,
    pub total_reminders: i64,
}
