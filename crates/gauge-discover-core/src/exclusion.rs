use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Config;
use crate::paths::{clean, resolve_against};

/// Directory holding Gauge environment properties
pub const ENV_DIRECTORY_NAME: &str = "env";

/// Directories under the project root that concept discovery always skips
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["gauge_bin", "reports", "logs", ENV_DIRECTORY_NAME];

/// Absolute directories pruned from concept discovery.
///
/// Built fresh for every discovery session from the defaults plus the
/// configured reports, logs and exclude directories. Members are absolute
/// and lexically cleaned, so lookups compare walk paths directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    dirs: BTreeSet<PathBuf>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the exclusions for `config.project_root`
    pub fn build(config: &Config) -> Self {
        let root = &config.project_root;
        let settings = &config.discovery;
        let mut set = Self::new();

        for name in DEFAULT_EXCLUDED_DIRS {
            set.add(root, name);
        }
        if let Some(dir) = &settings.reports_dir {
            set.add(root, dir);
        }
        if let Some(dir) = &settings.logs_dir {
            set.add(root, dir);
        }
        for dir in &settings.exclude_dirs {
            set.add(root, dir);
        }

        set
    }

    /// Resolve `value` against `root` and insert it.
    ///
    /// Blank values are ignored. A value that cannot be made absolute is
    /// logged and skipped.
    pub fn add(&mut self, root: &Path, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match resolve_against(root, Path::new(value)) {
            Ok(path) => {
                self.dirs.insert(path);
            }
            Err(e) => {
                warn!(dir = %value, error = %e, "Error getting absolute path");
            }
        }
    }

    /// Whether the absolute directory `path` is excluded
    pub fn contains(&self, path: &Path) -> bool {
        self.dirs.contains(&clean(path))
    }

    /// Directory pruning rule for concept discovery: hidden or excluded dirs
    pub fn should_skip(&self, path: &Path, is_dir: bool) -> bool {
        if !is_dir {
            return false;
        }
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        hidden || self.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
