//! Environment lookups used to configure discovery.
//!
//! Discovery never reads `std::env` directly; it asks an [`Environment`], so
//! callers can hand in a map instead of the process environment.

use std::collections::HashMap;

/// Custom reports directory, excluded from concept discovery.
pub const GAUGE_REPORTS_DIR: &str = "gauge_reports_dir";
/// Custom logs directory, excluded from concept discovery.
pub const LOGS_DIRECTORY: &str = "logs_directory";
/// Comma-separated list of extra directories to exclude.
pub const GAUGE_EXCLUDE_DIRS: &str = "gauge_exclude_dirs";
/// Comma-separated list of spec directories, also searched for concepts.
pub const GAUGE_SPECS_DIR: &str = "gauge_specs_dir";
/// Comma-separated list of explicit concept search paths.
pub const GAUGE_CONCEPTS_PATH: &str = "gauge_concepts_path";
/// Data directory, relative to project root.
pub const GAUGE_DATA_DIR: &str = "gauge_data_dir";
/// Comma-separated list of spec file extensions.
pub const GAUGE_SPEC_FILE_EXTENSIONS: &str = "gauge_spec_file_extensions";

/// Source of named configuration values
pub trait Environment {
    /// Raw value of `key`, or `None` when unset.
    fn raw(&self, key: &str) -> Option<String>;

    /// Value of `key`; empty values count as unset
    fn var(&self, key: &str) -> Option<String> {
        self.raw(key).filter(|v| !v.trim().is_empty())
    }

    /// Comma-separated value of `key`, trimmed, empty items dropped
    fn list(&self, key: &str) -> Vec<String> {
        self.var(key).map(|v| split_list(&v)).unwrap_or_default()
    }
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Split a comma-separated value into trimmed, non-empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
