//! Named fragment registry.

use std::collections::HashMap;
use std::path::Path;

use crate::error::TemplateError;

/// Fragment file extension looked up by [`TemplateRegistry::load_dir`].
const FRAGMENT_EXTENSION: &str = "html";

/// Fixed set of named, reusable page fragments.
///
/// # Example
///
/// ```
/// use portico_template::TemplateRegistry;
///
/// let registry = TemplateRegistry::new()
///     .with_template("title-with-icon", "<{heading}>{title}</{heading}>");
/// assert!(registry.contains("title-with-icon"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment, replacing any fragment with the same name.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    /// Add a fragment, returning the source it replaced.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) -> Option<String> {
        self.templates.insert(name.into(), source.into())
    }

    /// Get a fragment's source by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Check if a fragment is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered fragment names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load every `*.html` file in `dir` as a fragment named after its file stem.
    ///
    /// Subdirectories are not searched. A missing directory yields an empty
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Load`] if a fragment file cannot be read.
    pub fn load_dir(dir: &Path) -> Result<Self, TemplateError> {
        let mut registry = Self::new();
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "Templates directory not found");
            return Ok(registry);
        }

        let pattern = format!(
            "{}/*.{FRAGMENT_EXTENSION}",
            glob::Pattern::escape(&dir.to_string_lossy())
        );
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| TemplateError::Load {
                path: e.path().to_path_buf(),
                source: std::io::Error::from(e),
            })?;
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Load {
                path: path.clone(),
                source,
            })?;
            registry.insert(name, source);
        }

        tracing::debug!(
            dir = %dir.display(),
            count = registry.len(),
            "Loaded template fragments"
        );
        Ok(registry)
    }
}
