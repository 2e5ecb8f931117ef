//! File-based declaration discovery.
//!
//! Finds and loads the project declaration from conventional
//! locations. This is primarily for CLI use; library users can build
//! a [`ProjectDeclaration`] directly.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::declaration::ProjectDeclaration;
use crate::error::{ConfigError, Result};

/// Searches a directory for a project declaration and loads it.
///
/// # Example
///
/// ```no_run
/// use packplan_config::DeclarationDiscovery;
///
/// let discovery = DeclarationDiscovery::new(".");
/// let declaration = discovery.load().unwrap();
/// ```
pub struct DeclarationDiscovery {
    root: PathBuf,
}

impl DeclarationDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a declaration file in the root directory.
    ///
    /// Searches in this order:
    /// 1. TOML declaration: packplan.toml
    /// 2. package.json (packplan field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("packplan.toml");
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("packplan").is_some() && !parsed["packplan"].is_null() {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load the declaration from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no declaration file exists.
    pub fn load(&self) -> Result<ProjectDeclaration> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load the declaration from a specific file path.
    pub fn load_from(&self, path: &Path) -> Result<ProjectDeclaration> {
        tracing::debug!(path = %path.display(), "loading project declaration");

        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;

        toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "packplan.toml".to_string(),
            hint: format!("invalid TOML declaration: {}", e),
        })
    }

    fn load_from_package_json(&self, path: &Path) -> Result<ProjectDeclaration> {
        let content = fs::read_to_string(path)?;

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: format!("invalid JSON: {}", e),
            })?;

        let declared = parsed
            .get("packplan")
            .filter(|v| !v.is_null())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "packplan".to_string(),
                hint: "add a 'packplan' field to your package.json".to_string(),
            })?;

        serde_json::from_value(declared.clone()).map_err(|e| ConfigError::InvalidValue {
            field: "packplan".to_string(),
            hint: e.to_string(),
        })
    }
}

/// Discover and load the declaration from a directory (convenience).
pub fn discover(root: impl AsRef<Path>) -> Result<ProjectDeclaration> {
    DeclarationDiscovery::new(root).load()
}
