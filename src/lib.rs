pub mod config;
pub mod error;
pub mod error_utils;
pub mod loader;
pub mod models;
pub mod output;
pub mod parser;
pub mod schema;
pub mod validation;

pub use error::LintError;
pub use models::{Directive, Document, Section, Span};
pub use parser::parse;
pub use validation::{Diagnostic, Severity, Validator};
