use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::errors::{SearchError, SearchResult};
use crate::filters::NameFilter;
use crate::request::UnreadablePolicy;

/// Collects every file under `root` whose base name passes `filter`.
///
/// The walk visits all subdirectories, hidden ones included, and ignores
/// `.gitignore` and friends. Entries are sorted by name within each directory
/// so repeated walks over an unchanged tree yield the same order. Symlinked
/// directories are not descended into; symlinks to regular files are kept.
pub fn enumerate(
    root: &Path,
    filter: &NameFilter,
    policy: UnreadablePolicy,
) -> SearchResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SearchError::path_not_found(root));
    }

    debug!(
        "Walking {} for files named '{}'",
        root.display(),
        filter.as_str()
    );

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => match policy {
                UnreadablePolicy::Abort => return Err(SearchError::traversal(e.to_string())),
                UnreadablePolicy::Skip => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            },
        };

        let is_file = entry.file_type().is_some_and(|ft| {
            ft.is_file() || (ft.is_symlink() && entry.path().is_file())
        });
        if is_file && filter.matches_path(entry.path()) {
            trace!("Matched file: {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    debug!("Found {} files to scan", files.len());
    Ok(files)
}
