mod client;
mod error;
pub mod models;
mod torrents;

pub use client::{BasicAuth, TransmissionClient, SESSION_ID_HEADER};
pub use error::TransmissionError;
pub use models::{AddTorrentRequest, Torrent};

pub type Result<T> = std::result::Result<T, TransmissionError>;
