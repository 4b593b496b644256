use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::{
    Environment, GAUGE_CONCEPTS_PATH, GAUGE_DATA_DIR, GAUGE_EXCLUDE_DIRS, GAUGE_REPORTS_DIR,
    GAUGE_SPECS_DIR, GAUGE_SPEC_FILE_EXTENSIONS, LOGS_DIRECTORY,
};
use crate::error::{DiscoveryError, Result};
use crate::extension::{normalize_extension, ExtensionClassifier, DEFAULT_SPEC_EXTENSIONS};

const CONFIG_FILE: &str = "gauge-discover.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# gauge-discover configuration file
# Location: <project root>/gauge-discover.toml
# Environment variables override every value below.

[discovery]
# Spec file extensions (env: gauge_spec_file_extensions)
spec_extensions = [".spec", ".md"]

# Explicit concept search paths; empty searches the whole project
# (env: gauge_concepts_path)
concepts_paths = []

# Spec directories, also searched for concepts (env: gauge_specs_dir)
specs_dirs = []

# Data directory, relative to the project root (env: gauge_data_dir)
data_dir = "."

# Extra directories skipped by concept discovery (env: gauge_exclude_dirs)
# Example: exclude_dirs = ["build", "node_modules"]
exclude_dirs = []

# Custom reports/logs directories, also skipped
# (env: gauge_reports_dir, logs_directory)
# reports_dir = "out/reports"
# logs_dir = "out/logs"
"#;

/// On-disk layout of the config file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    discovery: DiscoverySettings,
}

/// Discovery-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySettings {
    #[serde(default = "default_spec_extensions")]
    pub spec_extensions: Vec<String>,

    #[serde(default)]
    pub concepts_paths: Vec<String>,

    #[serde(default)]
    pub specs_dirs: Vec<String>,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_dir: Option<String>,

    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

fn default_spec_extensions() -> Vec<String> {
    DEFAULT_SPEC_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_data_dir() -> String {
    ".".to_string()
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            spec_extensions: default_spec_extensions(),
            concepts_paths: Vec::new(),
            specs_dirs: Vec::new(),
            data_dir: default_data_dir(),
            reports_dir: None,
            logs_dir: None,
            exclude_dirs: Vec::new(),
        }
    }
}

/// Configuration for one discovery session.
///
/// `project_root` may be empty when no root could be resolved; operations
/// that need it fail with [`DiscoveryError::ProjectRootNotSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub project_root: PathBuf,
    pub discovery: DiscoverySettings,
}

impl Config {
    /// Built-in defaults for `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            discovery: DiscoverySettings::default(),
        }
    }

    /// Load the project's config file, if any, then apply `env` on top
    pub fn load(project_root: impl Into<PathBuf>, env: &dyn Environment) -> Result<Self> {
        let project_root = project_root.into();
        let mut config = Self::new(project_root.clone());

        let path = Self::path(&project_root);
        if !project_root.as_os_str().is_empty() && path.is_file() {
            let content = fs::read_to_string(&path)?;
            let file: ConfigFile =
                toml::from_str(&content).map_err(|e| DiscoveryError::ConfigParse {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            config.discovery = file.discovery;
        }

        config.apply_env(env);
        Ok(config)
    }

    /// Override settings with any values present in `env`
    pub fn apply_env(&mut self, env: &dyn Environment) {
        let settings = &mut self.discovery;

        let extensions = env.list(GAUGE_SPEC_FILE_EXTENSIONS);
        if !extensions.is_empty() {
            settings.spec_extensions = extensions;
        }
        let concepts = env.list(GAUGE_CONCEPTS_PATH);
        if !concepts.is_empty() {
            settings.concepts_paths = concepts;
        }
        let specs = env.list(GAUGE_SPECS_DIR);
        if !specs.is_empty() {
            settings.specs_dirs = specs;
        }
        let excludes = env.list(GAUGE_EXCLUDE_DIRS);
        if !excludes.is_empty() {
            settings.exclude_dirs = excludes;
        }
        if let Some(dir) = env.var(GAUGE_DATA_DIR) {
            settings.data_dir = dir.trim().to_string();
        }
        if let Some(dir) = env.var(GAUGE_REPORTS_DIR) {
            settings.reports_dir = Some(dir.trim().to_string());
        }
        if let Some(dir) = env.var(LOGS_DIRECTORY) {
            settings.logs_dir = Some(dir.trim().to_string());
        }

        settings.spec_extensions = settings
            .spec_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();
    }

    /// Config file location for `project_root`
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Write the default template unless a config file already exists
    pub fn init(project_root: &Path) -> Result<PathBuf> {
        let path = Self::path(project_root);
        fs::create_dir_all(project_root)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Render the effective discovery settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        let file = ConfigFile {
            discovery: self.discovery.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    pub fn classifier(&self) -> ExtensionClassifier {
        ExtensionClassifier::new(&self.discovery.spec_extensions)
    }

    pub fn has_project_root(&self) -> bool {
        !self.project_root.as_os_str().is_empty()
    }
}
