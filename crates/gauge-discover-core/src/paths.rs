use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{DiscoveryError, Result};

/// Absolute, lexically cleaned form of `path`.
///
/// Relative paths are resolved against the current directory. `.` components
/// are dropped and `..` pops the previous component; the filesystem is not
/// consulted, so symlinks are left as they are.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir().map_err(|source| DiscoveryError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean(&cwd.join(path)))
}

/// Resolve `path` against `base` unless it is already absolute, then absolutize
pub fn resolve_against(base: &Path, path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        absolutize(path)
    } else {
        absolutize(&base.join(path))
    }
}

/// Lexical path normalization
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Reports whether `path` is an existing directory
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Strip the `project_root` prefix from `path`.
///
/// Paths outside the project root, and the root itself, come back unchanged.
pub fn relative_to_project_root(project_root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(project_root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Location of a data file referenced from a spec.
///
/// Absolute paths are returned as they are. Anything else lives under
/// `project_root/data_dir`. `data_dir` must be relative to the project root;
/// an absolute one is still nested under the root, with a warning.
pub fn resolve_data_file_path(project_root: &Path, data_dir: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let data_dir = Path::new(data_dir);
    if data_dir != Path::new(".") && data_dir.is_absolute() {
        warn!(
            data_dir = %data_dir.display(),
            "'gauge_data_dir' property must be relative to Project Root. Found absolute path"
        );
    }

    let mut resolved = project_root.to_path_buf();
    for component in data_dir.components() {
        if let Component::Normal(_) | Component::CurDir | Component::ParentDir = component {
            resolved.push(component);
        }
    }
    resolved.push(path);
    let resolved = clean(&resolved);
    debug!(path = %resolved.display(), "Reading data file");
    resolved
}

/// Every directory below `dir`, at any depth, excluding `dir` itself.
///
/// Entries that cannot be read are logged and skipped; whatever could be
/// listed is returned.
pub fn find_all_nested_dirs(dir: &Path) -> Vec<PathBuf> {
    let mut nested = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => nested.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to find nested directories");
            }
        }
    }
    nested
}
