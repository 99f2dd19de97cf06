//! Output formatting for check results

mod report;

pub use report::UnitFileReport;

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::models::{LineIndex, Span};
use crate::validation::{Diagnostic, Severity};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Annotated source snippets
    #[default]
    Stylish,
    /// One `path:line:column` line per finding
    Compact,
    Json,
}

/// A checked unit file together with its findings
#[derive(Debug, Clone)]
pub struct CheckedFile {
    pub path: PathBuf,
    pub content: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub trait OutputFormatter {
    fn write(&self, files: &[CheckedFile], out: &mut dyn Write) -> io::Result<()>;
}

pub fn get_formatter(format: Format) -> Box<dyn OutputFormatter> {
    match format {
        Format::Stylish => Box::new(StylishFormatter),
        Format::Compact => Box::new(CompactFormatter),
        Format::Json => Box::new(JsonFormatter),
    }
}

fn total_diagnostics(files: &[CheckedFile]) -> usize {
    files.iter().map(|file| file.diagnostics.len()).sum()
}

struct StylishFormatter;

impl OutputFormatter for StylishFormatter {
    fn write(&self, files: &[CheckedFile], out: &mut dyn Write) -> io::Result<()> {
        let total = total_diagnostics(files);

        if total == 0 {
            writeln!(
                out,
                "{}",
                format!("✓ No issues found in {} file(s)", files.len()).green()
            )?;
            return Ok(());
        }

        for file in files.iter().filter(|file| !file.diagnostics.is_empty()) {
            write!(out, "{}", UnitFileReport::new(file).render())?;
        }

        let affected = files
            .iter()
            .filter(|file| !file.diagnostics.is_empty())
            .count();
        writeln!(
            out,
            "{}",
            format!("Found {total} warning(s) in {affected} file(s)")
                .yellow()
                .bold()
        )?;
        Ok(())
    }
}

struct CompactFormatter;

impl OutputFormatter for CompactFormatter {
    fn write(&self, files: &[CheckedFile], out: &mut dyn Write) -> io::Result<()> {
        for file in files {
            let index = LineIndex::new(&file.content);
            for diagnostic in &file.diagnostics {
                let position = index.position(diagnostic.span.start);
                writeln!(
                    out,
                    "{}:{}:{}: {}: {} [{}]",
                    file.path.display(),
                    position.line,
                    position.column,
                    diagnostic.severity,
                    diagnostic.message,
                    diagnostic.text(&file.content)
                )?;
            }
        }
        Ok(())
    }
}

struct JsonFormatter;

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    key: &'a str,
    #[serde(flatten)]
    span: Span,
    line: usize,
    column: usize,
    severity: Severity,
    message: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn write(&self, files: &[CheckedFile], out: &mut dyn Write) -> io::Result<()> {
        let report: Vec<JsonFile> = files
            .iter()
            .map(|file| {
                let index = LineIndex::new(&file.content);
                JsonFile {
                    path: file.path.display().to_string(),
                    diagnostics: file
                        .diagnostics
                        .iter()
                        .map(|diagnostic| {
                            let position = index.position(diagnostic.span.start);
                            JsonDiagnostic {
                                key: diagnostic.text(&file.content),
                                span: diagnostic.span,
                                line: position.line,
                                column: position.column,
                                severity: diagnostic.severity,
                                message: diagnostic.message,
                            }
                        })
                        .collect(),
                }
            })
            .collect();

        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }
}
