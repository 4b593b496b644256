use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Specs directory {path} does not exist.")]
    PathNotFound { path: PathBuf },

    #[error("No specifications found in {path}.")]
    NoSpecifications { path: PathBuf },

    #[error("No such file or directory: {path}")]
    NoSuchFileOrDirectory { path: PathBuf },

    #[error("Failed to get project root.")]
    ProjectRootNotSet,

    #[error("Error getting absolute path for {path}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

impl DiscoveryError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PathNotFound { .. } => 2,
            Self::NoSpecifications { .. } => 3,
            Self::NoSuchFileOrDirectory { .. } => 4,
            Self::ProjectRootNotSet => 5,
            Self::ConfigParse { .. } => 6,
            _ => 1,
        }
    }
}
