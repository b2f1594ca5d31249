use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Lifecycle state of a download record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    #[default]
    Downloading,
    Moving,
    Finished,
    Paused,
    Error,
}

impl DownloadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Moving => "moving",
            DownloadStatus::Finished => "finished",
            DownloadStatus::Paused => "paused",
            DownloadStatus::Error => "error",
        }
    }

    /// Finished and Error are never revisited by the sync engine
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadStatus::Finished | DownloadStatus::Error)
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "downloading" => Ok(DownloadStatus::Downloading),
            "moving" => Ok(DownloadStatus::Moving),
            "finished" => Ok(DownloadStatus::Finished),
            "paused" => Ok(DownloadStatus::Paused),
            "error" => Ok(DownloadStatus::Error),
            _ => Err(format!("Invalid download status: {}", s)),
        }
    }
}

/// A user-requested download, tracked until it lands in the media library
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Download {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Display name, also the on-disk name of the downloaded content
    pub title: String,
    pub status: DownloadStatus,
    /// Percentage 0-100, meaningful while downloading
    pub progress: i32,
    /// Total size in bytes, once the daemon knows it
    pub size: Option<i64>,

    /// Foreign key to category
    pub category_id: i64,
    /// Joined category name
    pub category_name: String,

    /// Transmission torrent id, fixed once assigned
    pub torrent_id: Option<i64>,
    pub magnet_link: Option<String>,

    /// Library path, set only after a successful move
    pub final_path: Option<String>,

    pub download_date: Option<DateTime<Utc>>,
    pub release_date: Option<NaiveDate>,
    pub season: Option<i32>,
    pub image_url: Option<String>,
}

/// Request body for creating a download
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateDownload {
    pub title: String,
    pub category_id: i64,
    /// Magnet link or torrent URL handed to the daemon
    #[serde(default)]
    pub magnet_link: Option<String>,
    /// Poster URL; looked up from the metadata service when absent
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// Query filters for listing downloads
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DownloadFilter {
    /// Only downloads in this status
    pub status: Option<DownloadStatus>,
    /// Only downloads in the category with this name
    pub category: Option<String>,
}
