//! Crate configuration.
//!
//! Two groups of fallback defaults, loaded from TOML:
//!
//! ```toml
//! [pagination]
//! per_page = 15
//! page_name = "page"
//!
//! [crud]
//! default_sort = "id"
//! default_direction = "asc"
//! ```
//!
//! Missing keys take their defaults. [`CrudConfig::publish`] writes the
//! commented default file into an application's config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::filtering::SortDirection;

/// Commented default configuration file shipped with the crate.
pub const DEFAULT_CONFIG: &str = include_str!("../config/aiods-core.toml");

pub const DEFAULT_PER_PAGE: u64 = 15;
pub const DEFAULT_PAGE_NAME: &str = "page";
pub const DEFAULT_SORT_COLUMN: &str = "id";
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub per_page: u64,
    pub page_name: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page_name: DEFAULT_PAGE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudDefaults {
    pub default_sort: String,
    pub default_direction: String,
}

impl Default for CrudDefaults {
    fn default() -> Self {
        Self {
            default_sort: DEFAULT_SORT_COLUMN.to_string(),
            default_direction: DEFAULT_SORT_DIRECTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    pub pagination: PaginationConfig,
    pub crud: CrudDefaults,
}

impl CrudConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or mistyped values.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded CRUD configuration");
        Ok(config)
    }

    /// Write the default configuration file to `path`.
    ///
    /// An existing file is left alone unless `force` is set. Returns whether
    /// the file was written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the directory or file cannot be written.
    pub fn publish(path: impl AsRef<Path>, force: bool) -> Result<bool, ConfigError> {
        let path = path.as_ref();
        if path.exists() && !force {
            tracing::info!(path = %path.display(), "Configuration already published, skipping");
            return Ok(false);
        }

        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_CONFIG).map_err(io_err)?;

        tracing::info!(path = %path.display(), "Published CRUD configuration");
        Ok(true)
    }

    #[must_use]
    pub fn default_direction(&self) -> SortDirection {
        SortDirection::parse(&self.crud.default_direction)
    }
}
