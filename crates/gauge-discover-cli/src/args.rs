use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gauge-discover")]
#[command(about = "Find Gauge spec and concept files in a project")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print paths relative to the project root
    #[arg(short, long, global = true)]
    pub relative: bool,

    /// Project root (default: $GAUGE_PROJECT_ROOT, then current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List spec files
    Specs {
        /// Spec files or directories (default: configured spec dirs, else specs/)
        paths: Vec<PathBuf>,
    },

    /// List concept files
    Concepts {
        /// Files or directories to search (default: whole project)
        paths: Vec<PathBuf>,
    },

    /// List specs and concepts together
    List {
        /// Spec files or directories (default: configured spec dirs, else specs/)
        paths: Vec<PathBuf>,
    },

    /// List every directory nested under DIR
    Dirs {
        /// Directory to enumerate (default: project root)
        dir: Option<PathBuf>,
    },

    /// Report whether each path is a spec, a concept, or neither
    Classify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show the directories skipped by concept discovery
    Excluded,

    /// Show recognized Gauge file extensions
    Extensions,

    /// Resolve a data file path against the data directory
    Data {
        /// Data file referenced from a spec
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Create gauge-discover.toml with defaults
    Init,
    /// Show config file path
    Path,
    /// Show effective settings (file + environment)
    Show,
}
