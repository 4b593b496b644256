use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::Result;
use crate::paths::absolutize;

/// Walk `root` and collect the files accepted by `is_valid`.
///
/// `should_skip` sees every entry, the root included, with its directory flag;
/// a skipped directory is pruned along with everything under it. Entries that
/// cannot be read are logged and skipped, and the walk goes on with the rest.
/// Entries are visited in file-name order, so an unchanged tree always yields
/// the same list.
pub fn find_files<V, S>(root: &Path, mut is_valid: V, mut should_skip: S) -> Result<Vec<PathBuf>>
where
    V: FnMut(&Path) -> bool,
    S: FnMut(&Path, bool) -> bool,
{
    let root = absolutize(root)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !should_skip(entry.path(), entry.file_type().is_dir()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if is_valid(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
