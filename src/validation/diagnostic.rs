use serde::Serialize;
use std::fmt;

use crate::models::Span;

/// Message attached to every unrecognized directive
pub const UNKNOWN_DIRECTIVE_MESSAGE: &str = "Unrecognized directive for this section";

/// Findings are advisory: a directive may be valid in a systemd release the
/// schema does not model yet, so nothing is reported above `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    pub message: &'static str,
}

impl Diagnostic {
    pub fn unknown_directive(key_span: Span) -> Self {
        Self {
            span: key_span,
            severity: Severity::Warning,
            message: UNKNOWN_DIRECTIVE_MESSAGE,
        }
    }

    /// The flagged text in the source this diagnostic was produced from
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}
