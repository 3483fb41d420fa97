//! @ai:module:intent Configuration for file and directory checks
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, DEFAULT_CONFIG_FILE
//! @ai:module:depends_on dialect, error
//! @ai:module:stateless true

use crate::dialect::{detect_dialect, lookup, Dialect};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "apidoc-check.toml";

/// @ai:intent Settings loaded from apidoc-check.toml
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dialect forced on every checked file; walks still select files by extension.
    pub dialect: Option<String>,
    /// Cleared dialect files are left empty rather than deleted.
    pub skip_empty: bool,
    /// Directory names never descended into.
    pub exclude: Vec<String>,
    /// Extension (without dot) to dialect id or alias.
    pub extensions: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: None,
            skip_empty: true,
            exclude: default_exclude(),
            extensions: BTreeMap::new(),
        }
    }
}

fn default_exclude() -> Vec<String> {
    ["node_modules", "target", ".git"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Load an explicit config, else apidoc-check.toml if present, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// @ai:intent Resolve the dialect to validate a file with
    /// @ai:post Ok(None) when the file is not an annotation source
    /// @ai:edge_cases configured id is unknown -> UnsupportedDialect error
    /// @ai:effects pure
    pub fn dialect_for(&self, path: &Path) -> Result<Option<Dialect>> {
        if let Some(id) = &self.dialect {
            return lookup(id).map(Some);
        }

        let ext = path.extension().and_then(|e| e.to_str());
        if let Some(id) = ext.and_then(|e| self.extensions.get(e)) {
            return lookup(id).map(Some);
        }

        Ok(detect_dialect(path))
    }

    /// @ai:intent Decide from the extension alone whether a walked file is an annotation source
    /// @ai:context the forced dialect changes how a file is read, never which files are read
    /// @ai:effects pure
    pub fn is_annotation_file(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str());
        ext.is_some_and(|e| self.extensions.contains_key(e)) || detect_dialect(path).is_some()
    }

    /// @ai:intent Apply a command-line dialect over the configured one
    pub fn with_dialect(self, dialect: Option<String>) -> Self {
        Self {
            dialect: dialect.or(self.dialect),
            ..self
        }
    }

    /// @ai:intent Check whether a directory name is excluded from walking
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }
}
