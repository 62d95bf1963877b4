//! TOML configuration parser for rescat.toml.

use std::path::{Path, PathBuf};

use rescat::{AccessLevel, Identifier, WalkRules};
use serde::Deserialize;
use thiserror::Error;

/// Parsed generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescatConfig {
    /// Name of the generated top-level module
    pub module_name: String,
    /// Visibility of generated items
    pub access: AccessLevel,
    /// Catalog roots, resolved against the config file's directory when read
    /// with [`RescatConfig::from_file`]
    pub catalogs: Vec<PathBuf>,
    /// Walk rules (defaults to [`WalkRules::image_catalog`])
    pub rules: WalkRules,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
struct RawConfig {
    /// Optional module name (defaults to "images")
    module_name: Option<String>,
    /// "pub" (default), "crate" or "private"
    access: Option<String>,
    /// Catalog directories
    catalogs: Vec<String>,
    /// Optional extension overrides
    #[serde(default)]
    rules: RawRules,
}

#[derive(Debug, Default, Deserialize)]
struct RawRules {
    catalog_extensions: Option<Vec<String>>,
    leaf_extensions: Option<Vec<String>>,
    opaque_extensions: Option<Vec<String>>,
}

impl RescatConfig {
    /// Parse from a TOML file. Relative catalog paths are resolved against
    /// the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_str(&content)?;

        if let Some(base) = path.parent() {
            config.catalogs = config
                .catalogs
                .into_iter()
                .map(|catalog| base.join(catalog))
                .collect();
        }
        Ok(config)
    }

    /// Parse from a TOML string. Catalog paths are kept as written.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let module_name = raw.module_name.unwrap_or_else(|| "images".to_string());
        let normalized = Identifier::new(&module_name);
        if normalized.is_empty() || normalized.as_str() != module_name {
            return Err(ConfigError::Validation(format!(
                "Invalid module_name '{}': expected a lowercase identifier such as '{}'",
                module_name,
                if normalized.is_empty() { "images" } else { normalized.as_str() }
            )));
        }

        let access = match raw.access.as_deref() {
            None | Some("pub") | Some("public") => AccessLevel::Public,
            Some("crate") => AccessLevel::Crate,
            Some("private") => AccessLevel::Private,
            Some(other) => {
                return Err(ConfigError::Validation(format!(
                    "Invalid access value '{}': expected 'pub', 'crate' or 'private'",
                    other
                )));
            }
        };

        if raw.catalogs.is_empty() {
            return Err(ConfigError::Validation(
                "At least one catalog is required".into(),
            ));
        }
        if raw.catalogs.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation("Empty catalog path not allowed".into()));
        }

        let mut rules = WalkRules::image_catalog();
        if let Some(exts) = raw.rules.catalog_extensions {
            rules.catalog_extensions = exts.into_iter().collect();
        }
        if let Some(exts) = raw.rules.leaf_extensions {
            rules.leaf_extensions = exts.into_iter().collect();
        }
        if let Some(exts) = raw.rules.opaque_extensions {
            rules.opaque_extensions = exts.into_iter().collect();
        }

        Ok(Self {
            module_name,
            access,
            catalogs: raw.catalogs.into_iter().map(PathBuf::from).collect(),
            rules,
        })
    }
}

/// Errors during config parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
