/// Sanitizes path components by removing or replacing filesystem-illegal characters.
///
/// Handles characters that are illegal on Windows and Unix:
/// - Windows: < > : " / \ | ? *
/// - Also handles trailing dots (Windows restriction)
pub struct PathSanitizer;

impl PathSanitizer {
    const ILLEGAL_CHARS: &'static [char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\0'];

    /// Sanitize a single path component (file or directory name)
    pub fn sanitize(component: &str) -> String {
        let replaced: String = component
            .chars()
            .map(|ch| {
                if Self::ILLEGAL_CHARS.contains(&ch) || ch.is_control() {
                    ' '
                } else {
                    ch
                }
            })
            .collect();

        // Collapse runs of whitespace, then drop trailing dots
        let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
        let result = collapsed.trim_end_matches('.').trim_end();

        if result.is_empty() {
            "Unknown".to_string()
        } else {
            result.to_string()
        }
    }
}
