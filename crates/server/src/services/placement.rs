mod sanitizer;

pub use sanitizer::PathSanitizer;

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::config::LibraryPaths;
use crate::models::MediaCategory;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Title cannot be used as a file name: {0:?}")]
    UnsafeTitle(String),
}

/// Where a finished download sits now and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Maps content categories onto library directories
#[derive(Debug, Clone)]
pub struct PlacementPolicy {
    library: LibraryPaths,
}

impl PlacementPolicy {
    pub fn new(library: LibraryPaths) -> Self {
        Self { library }
    }

    /// Library root for a category name
    pub fn destination_root(&self, category: &str) -> Result<&Path, PlacementError> {
        let category: MediaCategory = category
            .parse()
            .map_err(|_| PlacementError::UnknownCategory(category.to_string()))?;

        Ok(match category {
            MediaCategory::Films => &self.library.films,
            MediaCategory::Series => &self.library.series,
            MediaCategory::Other => &self.library.other,
        })
    }

    /// Source and destination paths for a title.
    ///
    /// The source is looked up under the title exactly as the daemon wrote it,
    /// so the title must be a single plain path component. The destination
    /// name is sanitized.
    pub fn compute_paths(
        title: &str,
        download_dir: impl AsRef<Path>,
        destination_root: impl AsRef<Path>,
    ) -> Result<PlannedMove, PlacementError> {
        if !is_single_component(title) {
            return Err(PlacementError::UnsafeTitle(title.to_string()));
        }

        Ok(PlannedMove {
            source: download_dir.as_ref().join(title),
            destination: destination_root
                .as_ref()
                .join(PathSanitizer::sanitize(title)),
        })
    }
}

fn is_single_component(title: &str) -> bool {
    if title.contains(['/', '\\', '\0']) {
        return false;
    }

    let mut components = Path::new(title).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
