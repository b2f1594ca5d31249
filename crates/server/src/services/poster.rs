use std::sync::Arc;
use tmdb::{clean_search_query, TmdbClient};

use crate::models::MediaCategory;

/// Finds a poster image for a new download.
///
/// Lookup failures never surface to the caller: they are logged and the
/// download is simply created without an image.
pub struct PosterLookup {
    tmdb: Arc<TmdbClient>,
}

impl PosterLookup {
    pub fn new(tmdb: Arc<TmdbClient>) -> Self {
        Self { tmdb }
    }

    /// Poster URL of the first search hit for `title`, if any
    pub async fn find_poster(&self, title: &str, category: &str) -> Option<String> {
        if !self.tmdb.is_configured() {
            return None;
        }

        let category: MediaCategory = category.parse().ok()?;
        let query = clean_search_query(title);
        if query.is_empty() {
            return None;
        }

        let results = match category {
            MediaCategory::Films => self.tmdb.search_movie(&query).await,
            MediaCategory::Series => self.tmdb.search_tv(&query).await,
            MediaCategory::Other => return None,
        };

        let results = match results {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Poster lookup for '{}' failed: {}", query, e);
                return None;
            }
        };

        let poster = results
            .into_iter()
            .find_map(|r| r.poster_path.filter(|p| !p.is_empty()))?;
        tracing::debug!("Found poster {} for '{}'", poster, query);
        Some(self.tmdb.image_url(&poster))
    }
}
