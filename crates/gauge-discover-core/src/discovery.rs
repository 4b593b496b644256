//! Spec and concept discovery for a project.
//!
//! Spec discovery walks every directory it is given. Concept discovery prunes
//! hidden directories and the [`ExclusionSet`] rebuilt for each call, so build
//! output, reports and logs never contribute concepts.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::dedup::deduplicate;
use crate::error::{DiscoveryError, Result};
use crate::exclusion::ExclusionSet;
use crate::extension::ExtensionClassifier;
use crate::paths::{absolutize, relative_to_project_root, resolve_against, resolve_data_file_path};
use crate::walker::find_files;

/// Spec directory used when none is configured
pub const DEFAULT_SPECS_DIR: &str = "specs";

/// Source of the spec and concept files a run works on
pub trait FileDiscoverer {
    /// Spec files under `paths`, in input order
    fn spec_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>>;

    /// Every concept file of the project, deduplicated
    fn concept_files(&self) -> Result<Vec<PathBuf>>;
}

/// Specs and concepts collected for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectFileSet {
    pub specs: Vec<PathBuf>,
    pub concepts: Vec<PathBuf>,
}

/// Gather specs from `spec_paths` and the project's concepts
pub fn collect_project_files(
    discoverer: &dyn FileDiscoverer,
    spec_paths: &[PathBuf],
) -> Result<ProjectFileSet> {
    let specs = discoverer.spec_files(spec_paths)?;
    let concepts = discoverer.concept_files()?;
    Ok(ProjectFileSet { specs, concepts })
}

/// Filesystem-backed discovery for one project
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    config: Config,
    classifier: ExtensionClassifier,
}

impl ProjectFiles {
    pub fn new(config: Config) -> Self {
        let classifier = config.classifier();
        Self { config, classifier }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classifier(&self) -> &ExtensionClassifier {
        &self.classifier
    }

    pub fn project_root(&self) -> &Path {
        &self.config.project_root
    }

    /// Exclusions for the current configuration
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::build(&self.config)
    }

    /// Configured spec directories, or `specs` under the project root
    pub fn default_spec_paths(&self) -> Vec<PathBuf> {
        let dirs = &self.config.discovery.specs_dirs;
        if dirs.is_empty() {
            return vec![self.config.project_root.join(DEFAULT_SPECS_DIR)];
        }
        dirs.iter()
            .map(|d| self.config.project_root.join(d))
            .collect()
    }

    /// All spec files under `dir`. No directory is pruned.
    pub fn find_spec_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        find_files(dir, |p| self.classifier.is_spec(p), |_, _| false)
    }

    /// Spec files under each of `paths`.
    ///
    /// A directory must contain at least one spec; a file is taken as-is when
    /// it has a spec extension and ignored otherwise. Overlapping inputs are
    /// not deduplicated.
    pub fn spec_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut spec_files = Vec::new();
        for path in paths {
            if !path.exists() {
                return Err(DiscoveryError::PathNotFound { path: path.clone() });
            }
            if path.is_dir() {
                let found = self.find_spec_files_in(path)?;
                if found.is_empty() {
                    return Err(DiscoveryError::NoSpecifications { path: path.clone() });
                }
                spec_files.extend(found);
            } else if self.classifier.is_spec(path) {
                spec_files.push(absolutize(path)?);
            }
        }
        Ok(spec_files)
    }

    /// Concept files under `dir`, skipping hidden and excluded directories
    pub fn find_concept_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let exclusions = self.exclusions();
        find_files(
            dir,
            |p| self.classifier.is_concept(p),
            |p, is_dir| exclusions.should_skip(p, is_dir),
        )
    }

    /// Concept files under each of `paths`; relative paths are taken from
    /// the project root
    pub fn find_concept_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut concept_files = Vec::new();
        for path in paths {
            let path = resolve_against(&self.config.project_root, path)?;
            if !path.exists() {
                return Err(DiscoveryError::NoSuchFileOrDirectory { path });
            }
            concept_files.extend(self.find_concept_files_in(&path)?);
        }
        Ok(concept_files)
    }

    /// Every concept file of the project.
    ///
    /// Explicit concept paths win. Otherwise the whole project root is
    /// searched, followed by the configured spec directories.
    pub fn concept_files(&self) -> Result<Vec<PathBuf>> {
        let settings = &self.config.discovery;
        if !settings.concepts_paths.is_empty() {
            let paths: Vec<PathBuf> = settings.concepts_paths.iter().map(PathBuf::from).collect();
            return Ok(deduplicate(self.find_concept_files(&paths)?));
        }

        if !self.config.has_project_root() {
            return Err(DiscoveryError::ProjectRootNotSet);
        }
        let root = absolutize(&self.config.project_root)?;
        let mut files = self.find_concept_files(&[root])?;

        if !settings.specs_dirs.is_empty() {
            let dirs: Vec<PathBuf> = settings.specs_dirs.iter().map(PathBuf::from).collect();
            files.extend(self.find_concept_files(&dirs)?);
        }

        Ok(deduplicate(files))
    }

    pub fn relative_to_project_root(&self, path: &Path) -> PathBuf {
        relative_to_project_root(&self.config.project_root, path)
    }

    pub fn data_file_path(&self, path: &Path) -> PathBuf {
        resolve_data_file_path(
            &self.config.project_root,
            &self.config.discovery.data_dir,
            path,
        )
    }
}

impl FileDiscoverer for ProjectFiles {
    fn spec_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        ProjectFiles::spec_files(self, paths)
    }

    fn concept_files(&self) -> Result<Vec<PathBuf>> {
        ProjectFiles::concept_files(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GAUGE_REPORTS_DIR, LOGS_DIRECTORY};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    fn project_dir() -> TempDir {
        tempfile::Builder::new().prefix("proj").tempdir().unwrap()
    }

    fn project(root: &Path) -> ProjectFiles {
        ProjectFiles::new(Config::new(root))
    }

    #[test]
    fn test_spec_and_concept_pruning_differ() {
        let tmp = project_dir();
        let root = tmp.path();
        let a = touch(root, "a.spec");
        let b = touch(root, "reports/b.spec");
        let c = touch(root, "concepts/c.cpt");
        touch(root, "reports/r.cpt");

        let files = project(root);
        assert_eq!(files.find_spec_files_in(root).unwrap(), vec![a, b]);
        assert_eq!(files.find_concept_files_in(root).unwrap(), vec![c]);
    }

    #[test]
    fn test_concepts_skip_default_and_hidden_dirs() {
        let tmp = project_dir();
        let root = tmp.path();
        for dir in ["gauge_bin", "reports", "logs", "env", ".git", "specs/.cache"] {
            touch(root, &format!("{}/x.cpt", dir));
        }
        let kept = touch(root, "specs/logs/kept.cpt");
        let upper = touch(root, "specs/UPPER.CPT");

        let found = project(root).find_concept_files_in(root).unwrap();
        assert_eq!(found, vec![upper, kept]);
    }

    #[test]
    fn test_concepts_skip_configured_dirs() {
        let tmp = project_dir();
        let root = tmp.path();
        touch(root, "build/a.cpt");
        touch(root, "out/reports/b.cpt");
        touch(root, "vendor/c.cpt");
        let kept = touch(root, "concepts/d.cpt");

        let mut config = Config::new(root);
        config.discovery.exclude_dirs = vec!["build".to_string(), " vendor".to_string()];
        config.discovery.reports_dir = Some("out/reports".to_string());

        let found = ProjectFiles::new(config).find_concept_files_in(root).unwrap();
        assert_eq!(found, vec![kept]);
    }

    #[test]
    fn test_spec_files_missing_path_fails() {
        let tmp = project_dir();
        let missing = tmp.path().join("missing/path");

        let err = project(tmp.path()).spec_files(&[missing.clone()]).unwrap_err();
        match err {
            DiscoveryError::PathNotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_spec_files_empty_dir_fails() {
        let tmp = project_dir();
        let root = tmp.path();
        touch(root, "specs/notes.txt");
        let a = touch(root, "other/a.spec");

        let err = project(root)
            .spec_files(&[root.join("other"), root.join("specs")])
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::NoSpecifications { ref path } if path == &root.join("specs")));
        assert!(a.exists());
    }

    #[test]
    fn test_spec_files_mixes_dirs_and_files() {
        let tmp = project_dir();
        let root = tmp.path();
        let a = touch(root, "specs/a.spec");
        let b = touch(root, "specs/nested/b.md");
        let single = touch(root, "single.SPEC");
        let other = touch(root, "notes.txt");

        let specs = project(root)
            .spec_files(&[root.join("specs"), single.clone(), other, root.join("specs")])
            .unwrap();
        assert_eq!(specs, vec![a.clone(), b.clone(), single, a, b]);
    }

    #[test]
    fn test_find_concept_files_resolves_relative_to_root() {
        let tmp = project_dir();
        let root = tmp.path();
        let c = touch(root, "concepts/c.cpt");

        let files = project(root);
        let found = files
            .find_concept_files(&[PathBuf::from("concepts")])
            .unwrap();
        assert_eq!(found, vec![c]);

        let err = files
            .find_concept_files(&[PathBuf::from("nowhere")])
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::NoSuchFileOrDirectory { .. }));
    }

    #[test]
    fn test_concept_files_prefers_configured_paths() {
        let tmp = project_dir();
        let root = tmp.path();
        touch(root, "elsewhere/skip.cpt");
        let c = touch(root, "concepts/c.cpt");

        let mut config = Config::new(root);
        config.discovery.concepts_paths = vec!["concepts".to_string(), "concepts".to_string()];

        let found = ProjectFiles::new(config).concept_files().unwrap();
        assert_eq!(found, vec![c]);
    }

    #[test]
    fn test_concept_files_adds_spec_dirs_and_dedups() {
        let tmp = project_dir();
        let root = tmp.path();
        let a = touch(root, "concepts/a.cpt");
        let b = touch(root, "specs/b.cpt");
        touch(root, "reports/r.cpt");

        let mut config = Config::new(root);
        config.discovery.specs_dirs = vec!["specs".to_string(), "reports".to_string()];

        let found = ProjectFiles::new(config).concept_files().unwrap();
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn test_excluded_or_hidden_root_yields_no_concepts() {
        let tmp = project_dir();
        let root = tmp.path();
        touch(root, "reports/r.cpt");
        touch(root, "gauge_bin/g.cpt");
        touch(root, ".hidden/h.cpt");

        let files = project(root);
        for dir in ["reports", "gauge_bin", ".hidden"] {
            let found = files.find_concept_files_in(&root.join(dir)).unwrap();
            assert!(found.is_empty(), "{} yielded {:?}", dir, found);
        }
        assert!(files
            .find_concept_files(&[PathBuf::from("reports")])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_env_reports_and_logs_dirs_are_pruned() {
        let tmp = project_dir();
        let root = tmp.path();
        let logs_tmp = project_dir();
        let logs = logs_tmp.path();
        touch(root, "out/reports/r.cpt");
        let kept = touch(root, "concepts/c.cpt");
        touch(logs, "l.cpt");

        let env: HashMap<String, String> = [
            (GAUGE_REPORTS_DIR, "out/reports".to_string()),
            (LOGS_DIRECTORY, logs.display().to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let config = Config::load(root, &env).unwrap();

        let exclusions = ExclusionSet::build(&config);
        assert!(exclusions.contains(&root.join("out/reports")));
        assert!(exclusions.contains(logs));

        let files = ProjectFiles::new(config);
        assert_eq!(files.find_concept_files_in(root).unwrap(), vec![kept]);
        assert!(files.find_concept_files_in(logs).unwrap().is_empty());
    }

    #[test]
    fn test_concept_files_requires_project_root() {
        let files = ProjectFiles::new(Config::new(PathBuf::new()));
        assert!(matches!(
            files.concept_files().unwrap_err(),
            DiscoveryError::ProjectRootNotSet
        ));
    }

    #[test]
    fn test_default_spec_paths() {
        let files = project(Path::new("/p"));
        assert_eq!(files.default_spec_paths(), vec![PathBuf::from("/p/specs")]);

        let mut config = Config::new("/p");
        config.discovery.specs_dirs = vec!["a".to_string(), "/abs".to_string()];
        let files = ProjectFiles::new(config);
        assert_eq!(
            files.default_spec_paths(),
            vec![PathBuf::from("/p/a"), PathBuf::from("/abs")]
        );
    }

    struct StubDiscoverer;

    impl FileDiscoverer for StubDiscoverer {
        fn spec_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
            Ok(paths.iter().map(|p| p.join("stub.spec")).collect())
        }

        fn concept_files(&self) -> Result<Vec<PathBuf>> {
            Ok(vec![PathBuf::from("/stub/c.cpt")])
        }
    }

    #[test]
    fn test_collect_project_files_uses_discoverer() {
        let set = collect_project_files(&StubDiscoverer, &[PathBuf::from("/s")]).unwrap();
        assert_eq!(set.specs, vec![PathBuf::from("/s/stub.spec")]);
        assert_eq!(set.concepts, vec![PathBuf::from("/stub/c.cpt")]);
    }

    #[test]
    fn test_collect_project_files_propagates_errors() {
        let tmp = project_dir();
        let files = project(tmp.path());
        let err = collect_project_files(&files, &[tmp.path().join("missing")]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
