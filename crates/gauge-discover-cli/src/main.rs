use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gauge_discover_core::paths::absolutize;
use gauge_discover_core::{
    collect_project_files, deduplicate, find_all_nested_dirs, Config, ProcessEnv, ProjectFileSet,
    ProjectFiles, Result,
};

mod args;
use args::{Cli, Commands, ConfigAction};

const PROJECT_ROOT_ENV: &str = "GAUGE_PROJECT_ROOT";
const VERBOSE_LOG_FILTER: &str = "gauge_discover=debug,gauge_discover_core=debug";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_project_root(cli_root: Option<PathBuf>) -> PathBuf {
    let root = cli_root
        .or_else(|| std::env::var(PROJECT_ROOT_ENV).ok().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok());

    match root {
        Some(root) => absolutize(&root).unwrap_or(root),
        None => PathBuf::new(),
    }
}

/// How results are printed
struct Output {
    json: bool,
    relative: bool,
}

impl Output {
    fn paths(&self, files: &ProjectFiles, paths: &[PathBuf]) -> Result<()> {
        let shown = self.display_paths(files, paths);
        if self.json {
            return print_json(&shown);
        }
        for path in shown {
            println!("{}", path);
        }
        Ok(())
    }

    fn display_paths(&self, files: &ProjectFiles, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                if self.relative {
                    files.relative_to_project_root(p)
                } else {
                    p.clone()
                }
            })
            .map(|p| p.display().to_string())
            .collect()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{}", rendered);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let project_root = resolve_project_root(cli.project_root);
    let output = Output {
        json: cli.json,
        relative: cli.relative,
    };

    match cli.command {
        Commands::Config { action } => handle_config(&action, &project_root),
        command => {
            let config = Config::load(&project_root, &ProcessEnv)?;
            handle_command(command, &ProjectFiles::new(config), &output)
        }
    }
}

fn handle_command(command: Commands, files: &ProjectFiles, output: &Output) -> Result<()> {
    match command {
        Commands::Specs { paths } => {
            let paths = spec_paths_or_default(files, paths);
            let specs = files.spec_files(&paths)?;
            output.paths(files, &specs)
        }
        Commands::Concepts { paths } => {
            let concepts = if paths.is_empty() {
                files.concept_files()?
            } else {
                deduplicate(files.find_concept_files(&paths)?)
            };
            output.paths(files, &concepts)
        }
        Commands::List { paths } => {
            let paths = spec_paths_or_default(files, paths);
            let set = collect_project_files(files, &paths)?;
            handle_list(output, files, &set)
        }
        Commands::Dirs { dir } => {
            let dir = dir.unwrap_or_else(|| files.project_root().to_path_buf());
            let nested = find_all_nested_dirs(&dir);
            output.paths(files, &nested)
        }
        Commands::Classify { paths } => handle_classify(output, files, &paths),
        Commands::Excluded => {
            let excluded: Vec<PathBuf> = files.exclusions().iter().cloned().collect();
            output.paths(files, &excluded)
        }
        Commands::Extensions => {
            let extensions = files.classifier().gauge_file_extensions();
            if output.json {
                return print_json(&extensions);
            }
            for ext in extensions {
                println!("{}", ext);
            }
            Ok(())
        }
        Commands::Data { path } => {
            let resolved = files.data_file_path(&path);
            output.paths(files, &[resolved])
        }
        Commands::Config { action } => handle_config(&action, files.project_root()),
    }
}

fn spec_paths_or_default(files: &ProjectFiles, paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        files.default_spec_paths()
    } else {
        paths
    }
}

fn handle_list(output: &Output, files: &ProjectFiles, set: &ProjectFileSet) -> Result<()> {
    if output.json {
        let shown = ProjectFileSet {
            specs: output
                .display_paths(files, &set.specs)
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            concepts: output
                .display_paths(files, &set.concepts)
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        };
        return print_json(&shown);
    }

    println!("{} ({})", "Specs".green().bold(), set.specs.len());
    for path in output.display_paths(files, &set.specs) {
        println!("  {}", path);
    }
    println!();
    println!("{} ({})", "Concepts".cyan().bold(), set.concepts.len());
    for path in output.display_paths(files, &set.concepts) {
        println!("  {}", path);
    }
    Ok(())
}

#[derive(Serialize)]
struct Classification {
    path: String,
    kind: &'static str,
}

fn handle_classify(output: &Output, files: &ProjectFiles, paths: &[PathBuf]) -> Result<()> {
    let classifier = files.classifier();
    let results: Vec<Classification> = paths
        .iter()
        .map(|p| Classification {
            path: p.display().to_string(),
            kind: if classifier.is_spec(p) {
                "spec"
            } else if classifier.is_concept(p) {
                "concept"
            } else {
                "none"
            },
        })
        .collect();

    if output.json {
        return print_json(&results);
    }

    for result in results {
        let padded = format!("{:<8}", result.kind);
        let padded = padded.as_str();
        let kind = match result.kind {
            "spec" => padded.green(),
            "concept" => padded.cyan(),
            _ => padded.dimmed(),
        };
        println!("{} {}", kind, result.path);
    }
    Ok(())
}

fn handle_config(action: &ConfigAction, project_root: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = Config::init(project_root)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path(project_root).display());
        }
        ConfigAction::Show => {
            let config = Config::load(project_root, &ProcessEnv)?;
            println!("{} {}", "# project_root =".dimmed(), project_root.display());
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
