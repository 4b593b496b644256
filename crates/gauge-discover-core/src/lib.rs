pub mod config;
pub mod dedup;
pub mod discovery;
pub mod env;
pub mod error;
pub mod exclusion;
pub mod extension;
pub mod paths;
pub mod text;
pub mod walker;

pub use config::{Config, DiscoverySettings};
pub use dedup::deduplicate;
pub use discovery::{
    collect_project_files, FileDiscoverer, ProjectFileSet, ProjectFiles, DEFAULT_SPECS_DIR,
};
pub use env::{Environment, ProcessEnv};
pub use error::{DiscoveryError, Result};
pub use exclusion::{ExclusionSet, DEFAULT_EXCLUDED_DIRS, ENV_DIRECTORY_NAME};
pub use extension::{ExtensionClassifier, CONCEPT_EXTENSION, DEFAULT_SPEC_EXTENSIONS};
pub use paths::{find_all_nested_dirs, is_dir, relative_to_project_root, resolve_data_file_path};
pub use walker::find_files;
