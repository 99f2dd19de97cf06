mod diagnostic;
mod validator;


// Re-export the main Validator
pub use diagnostic::{Diagnostic, Severity, UNKNOWN_DIRECTIVE_MESSAGE};
pub use validator::Validator;
