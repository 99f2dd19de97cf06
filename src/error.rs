use std::path::PathBuf;
use thiserror::Error;

/// Failures of the tool around the core: reading inputs and configuration.
///
/// Findings inside a unit file are never errors; they are diagnostics.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to parse config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Unknown section type '{0}'")]
    UnknownSection(String),
}
