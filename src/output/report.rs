//! miette report for one unit file

use miette::{Diagnostic, GraphicalReportHandler, LabeledSpan, NamedSource};
use thiserror::Error;

use super::CheckedFile;

#[derive(Error, Debug, Diagnostic)]
#[error("{count} unrecognized directive(s)")]
#[diagnostic(code(unitlint::unknown_directive), severity(Warning))]
pub struct UnitFileReport {
    #[source_code]
    src: NamedSource<String>,

    #[label(collection)]
    labels: Vec<LabeledSpan>,

    count: usize,

    #[help]
    help: Option<String>,
}

impl UnitFileReport {
    pub fn new(file: &CheckedFile) -> Self {
        let labels = file
            .diagnostics
            .iter()
            .map(|diagnostic| {
                LabeledSpan::new_with_span(Some(diagnostic.message.to_string()), diagnostic.span)
            })
            .collect();

        Self {
            src: crate::error_utils::create_named_source(&file.path, file.content.clone()),
            labels,
            count: file.diagnostics.len(),
            help: Some(
                "Check the spelling and the section, or prefix vendor directives with `X-`"
                    .to_string(),
            ),
        }
    }

    /// Render with miette's graphical handler
    pub fn render(&self) -> String {
        let mut out = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut out, self)
            .is_err()
        {
            // Rendering into a String only fails on a formatter bug; fall back to the headline
            out = self.to_string();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use std::path::PathBuf;

    #[test]
    fn test_report_labels_each_diagnostic() {
        let content = "[Unit]\nBadKey=1\nAlias=2\n".to_string();
        let diagnostics = Validator::new().validate_str(&content);
        let file = CheckedFile {
            path: PathBuf::from("foo.service"),
            content,
            diagnostics,
        };

        let report = UnitFileReport::new(&file);
        assert_eq!(report.labels.len(), 2);
        assert_eq!(report.labels[0].offset(), 7);
        assert_eq!(report.labels[0].len(), 6);
        assert_eq!(report.to_string(), "2 unrecognized directive(s)");

        let rendered = report.render();
        assert!(rendered.contains("foo.service"));
        assert!(rendered.contains("Unrecognized directive for this section"));
    }
}
