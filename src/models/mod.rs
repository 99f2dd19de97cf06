pub mod document;
pub mod span;

// Re-export commonly used types
pub use document::{Directive, Document, Section};
pub use span::{LineIndex, Position, Span};
