use crate::models::DownloadStatus;

/// Map a Transmission status code onto a download status.
///
/// Codes 1 to 5 (check wait, checking, download wait, downloading, seed wait)
/// all count as Downloading. Unknown codes degrade to Error.
pub fn map_status(code: i64) -> DownloadStatus {
    match code {
        0 => DownloadStatus::Paused,
        1..=5 => DownloadStatus::Downloading,
        6 => DownloadStatus::Finished,
        _ => DownloadStatus::Error,
    }
}

/// Completion fraction as a rounded percentage in `0..=100`
pub fn progress_percent(fraction_done: f64) -> i32 {
    if !fraction_done.is_finite() {
        return 0;
    }
    (fraction_done * 100.0).round().clamp(0.0, 100.0) as i32
}
