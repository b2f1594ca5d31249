use regex::Regex;
use std::sync::LazyLock;

static VIDEO_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mkv|mp4|avi|mov|wmv|flv|webm)$").unwrap());

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[._-]").unwrap());

static RELEASE_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(FRENCH|TRUEFRENCH|VOSTFR|720p|1080p|4K|x264|x265|HEVC|HDRip|BluRay|WEBRip|WEB-DL)\b",
    )
    .unwrap()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Turn a release filename into a search query.
///
/// Drops the video extension, the first four-digit run (usually the year),
/// separators and common release tags.
pub fn clean_search_query(filename: &str) -> String {
    let query = VIDEO_EXTENSION.replace(filename, "");
    let query = YEAR.replace(&query, "");
    let query = SEPARATORS.replace_all(&query, " ");
    let query = RELEASE_TAGS.replace_all(&query, "");
    let query = WHITESPACE.replace_all(&query, " ");
    query.trim().to_string()
}
