//! Optional YAML configuration (`.unitlint.yml`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::LintError;
use crate::output::Format;
use crate::schema::SchemaRegistry;

/// File picked up from the working directory when no config is given
pub const DEFAULT_CONFIG_FILE: &str = ".unitlint.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Additional directive names accepted per section type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_directives: BTreeMap<String, Vec<String>>,

    /// Exit with a failure status when any warning is reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl LintConfig {
    pub fn load(path: &Path) -> Result<Self, LintError> {
        let content = std::fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| LintError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, empty config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load the explicit config if given, otherwise `.unitlint.yml` in `dir`
    /// when present, otherwise the defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, LintError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(LintError::ConfigNotFound(path.to_path_buf()));
            }
            debug!("Loading config from {}", path.display());
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            debug!("Loading config from {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// The schema registry this config validates against
    pub fn registry(&self) -> Arc<SchemaRegistry> {
        let builtin = SchemaRegistry::builtin();
        if self.extra_directives.is_empty() {
            builtin
        } else {
            Arc::new(builtin.with_extra_directives(&self.extra_directives))
        }
    }
}
