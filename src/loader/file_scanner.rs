//! File scanning utilities for discovering unit files

use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

use crate::error::LintError;

/// Extensions of unit types systemd loads
const UNIT_EXTENSIONS: &[&str] = &[
    "service",
    "socket",
    "device",
    "mount",
    "automount",
    "swap",
    "target",
    "path",
    "timer",
    "slice",
    "scope",
];

pub struct FileScanner;

impl FileScanner {
    /// Check if a file looks like a unit file or a drop-in (`foo.service.d/bar.conf`)
    pub fn is_unit_file(path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };

        if UNIT_EXTENSIONS.contains(&ext) {
            return true;
        }

        ext == "conf"
            && path
                .parent()
                .and_then(|parent| parent.file_name())
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(".d"))
                .unwrap_or(false)
    }

    /// Recursively scan a directory for unit files, sorted by path.
    ///
    /// Symlinks are followed, since installed units are commonly links.
    /// Unreadable entries below `dir` (dangling links, link loops) are
    /// skipped with a warning; failing to read `dir` itself is an error.
    pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, LintError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    return Err(LintError::Walk {
                        path: dir.to_path_buf(),
                        source,
                    });
                }
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_file() && Self::is_unit_file(path) {
                files.push(path.to_path_buf());
            } else {
                trace!("Skipping {}", path.display());
            }
        }

        Ok(files)
    }
}
