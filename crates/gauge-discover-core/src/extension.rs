use std::path::Path;

/// Extension of concept files
pub const CONCEPT_EXTENSION: &str = ".cpt";

/// Spec extensions recognized when nothing else is configured
pub const DEFAULT_SPEC_EXTENSIONS: &[&str] = &[".spec", ".md"];

/// Decides whether a path is a spec, a concept, or neither.
///
/// Extensions are stored lowercase with a leading dot and compared
/// case-insensitively. A path without an extension is neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionClassifier {
    spec_extensions: Vec<String>,
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SPEC_EXTENSIONS.iter().copied())
    }
}

impl ExtensionClassifier {
    pub fn new<I, S>(spec_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in spec_extensions {
            let ext = normalize_extension(ext.as_ref());
            if !ext.is_empty() && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            spec_extensions: normalized,
        }
    }

    pub fn spec_extensions(&self) -> &[String] {
        &self.spec_extensions
    }

    pub fn is_spec(&self, path: &Path) -> bool {
        match extension_of(path) {
            Some(ext) => self.spec_extensions.iter().any(|e| *e == ext),
            None => false,
        }
    }

    pub fn is_concept(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| ext == CONCEPT_EXTENSION)
    }

    /// Spec or concept
    pub fn is_gauge_file(&self, path: &Path) -> bool {
        self.is_concept(path) || self.is_spec(path)
    }

    /// Spec extensions followed by the concept extension
    pub fn gauge_file_extensions(&self) -> Vec<String> {
        let mut all = self.spec_extensions.clone();
        all.push(CONCEPT_EXTENSION.to_string());
        all
    }
}

/// `"SPEC"`, `".Spec"` and `" .spec "` all become `".spec"`
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Lowercased extension of `path` with its leading dot
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}
