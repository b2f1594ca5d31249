use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransmissionError {
    /// Connection refused, DNS failure, timeout or a body cut short.
    #[error("Daemon unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The daemon answered with something that is not a valid RPC response,
    /// or the session handshake failed twice in a row.
    #[error("Daemon protocol error: {0}")]
    Protocol(String),

    /// The daemon understood the request and reported a non-success result.
    #[error("Daemon rejected request: {0}")]
    Rejected(String),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TransmissionError {
    /// Whether the failure means the daemon could not be talked to at all,
    /// as opposed to refusing one particular request.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Unreachable(_) | Self::Protocol(_) | Self::Api { .. }
        )
    }
}
