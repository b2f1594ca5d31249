use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloaderError {
    #[error("Transmission error: {0}")]
    Transmission(#[from] transmission::TransmissionError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DownloaderError {
    /// The daemon could not be reached or answered with garbage
    pub fn is_connectivity(&self) -> bool {
        match self {
            DownloaderError::Transmission(e) => e.is_connectivity(),
            DownloaderError::Config(_) => false,
        }
    }

    /// The daemon understood the request and refused it
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            DownloaderError::Transmission(transmission::TransmissionError::Rejected(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, DownloaderError>;
