mod error;
mod models;
mod traits;
mod transmission_impl;

pub use error::DownloaderError;
pub use models::TorrentSnapshot;
pub use traits::Downloader;
pub use transmission_impl::TransmissionDownloader;
