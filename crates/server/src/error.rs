use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{DownloaderError, SyncError};

/// 统一的应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 资源未找到
    #[error("{0}")]
    NotFound(String),

    /// 请求参数无效
    #[error("{0}")]
    BadRequest(String),

    /// 状态冲突
    #[error("{0}")]
    Conflict(String),

    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 下载器错误
    #[error("Downloader error: {0}")]
    Downloader(#[from] DownloaderError),

    /// 同步错误
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

/// API 错误响应体
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn downloader_status(e: &DownloaderError) -> StatusCode {
        if e.is_connectivity() {
            StatusCode::BAD_GATEWAY
        } else if e.is_rejected() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Downloader(e) | AppError::Sync(SyncError::Downloader(e)) => {
                Self::downloader_status(e)
            }
            AppError::Database(_) | AppError::Sync(SyncError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_message, details) = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Conflict(msg) => {
                (msg.clone(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("Database error".to_string(), Some(e.to_string()))
            }
            AppError::Downloader(e) => {
                tracing::error!("Downloader error: {}", e);
                ("Downloader error".to_string(), Some(e.to_string()))
            }
            AppError::Sync(e) => {
                tracing::error!("Sync error: {}", e);
                ("Sync failed".to_string(), Some(e.to_string()))
            }
        };

        let body = ErrorResponse {
            error: error_message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;

// 便捷方法
impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transmission::TransmissionError;

    #[test]
    fn test_downloader_errors_map_to_status() {
        let unreachable = AppError::Downloader(DownloaderError::Transmission(
            TransmissionError::Protocol("bad".into()),
        ));
        assert_eq!(unreachable.status_code(), StatusCode::BAD_GATEWAY);

        let rejected = AppError::Downloader(DownloaderError::Transmission(
            TransmissionError::Rejected("invalid or corrupt torrent file".into()),
        ));
        assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);

        let sync = AppError::Sync(SyncError::Downloader(DownloaderError::Transmission(
            TransmissionError::Api {
                status_code: 401,
                message: String::new(),
            },
        )));
        assert_eq!(sync.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status_code(), StatusCode::CONFLICT);
        let response = AppError::bad_request("Title is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
