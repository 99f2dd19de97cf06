//! Resolving command line inputs into unit file sources

mod file_scanner;

pub use file_scanner::FileScanner;

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::LintError;

/// Name shown for text read from standard input
pub const STDIN_NAME: &str = "<stdin>";

/// One thing to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitInput {
    Stdin,
    File(PathBuf),
}

/// The text of one unit file and where it came from
#[derive(Debug, Clone)]
pub struct UnitSource {
    pub path: PathBuf,
    pub content: String,
}

impl UnitInput {
    pub fn read(&self) -> Result<UnitSource, LintError> {
        match self {
            UnitInput::Stdin => {
                let path = PathBuf::from(STDIN_NAME);
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(|source| LintError::Io {
                        path: path.clone(),
                        source,
                    })?;
                let content = decode_lossy(&path, bytes);
                Ok(UnitSource { path, content })
            }
            UnitInput::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| LintError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(UnitSource {
                    path: path.clone(),
                    content: decode_lossy(path, bytes),
                })
            }
        }
    }
}

/// Decode file contents, replacing invalid UTF-8 rather than rejecting the file.
///
/// Spans then address the decoded text, which is also what gets displayed.
fn decode_lossy(path: &Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                "{} is not valid UTF-8; invalid bytes were replaced",
                path.display()
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

/// Expand command line paths into inputs.
///
/// Files are taken as given whatever their extension, directories are
/// scanned for unit files and `-` means standard input.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<UnitInput>, LintError> {
    let mut inputs = Vec::new();

    for path in paths {
        if path == Path::new("-") {
            inputs.push(UnitInput::Stdin);
        } else if path.is_dir() {
            let files = FileScanner::scan_directory(path)?;
            debug!("Found {} unit files in {}", files.len(), path.display());
            inputs.extend(files.into_iter().map(UnitInput::File));
        } else {
            inputs.push(UnitInput::File(path.clone()));
        }
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_inputs_mixes_files_dirs_and_stdin() {
        let temp_dir = TempDir::new().unwrap();
        let units = temp_dir.path().join("units");
        fs::create_dir(&units).unwrap();
        fs::write(units.join("a.service"), "[Service]\n").unwrap();
        let explicit = temp_dir.path().join("custom.unit.txt");
        fs::write(&explicit, "[Unit]\n").unwrap();

        let inputs =
            collect_inputs(&[explicit.clone(), units.clone(), PathBuf::from("-")]).unwrap();

        assert_eq!(
            inputs,
            vec![
                UnitInput::File(explicit),
                UnitInput::File(units.join("a.service")),
                UnitInput::Stdin,
            ]
        );
    }

    #[test]
    fn test_read_invalid_utf8_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.service");
        fs::write(&path, b"# caf\xe9\n[Unit]\nBadKey=x\n").unwrap();

        let source = UnitInput::File(path).read().unwrap();
        assert_eq!(source.content, "# caf\u{fffd}\n[Unit]\nBadKey=x\n");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.service");

        let err = UnitInput::File(missing).read().unwrap_err();
        assert!(err.to_string().contains("missing.service"));
    }
}
