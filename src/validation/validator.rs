use std::sync::Arc;
use tracing::{debug, trace};

use super::diagnostic::Diagnostic;
use crate::models::Document;
use crate::parser;
use crate::schema::{SchemaRegistry, SectionClass, VENDOR_EXTENSION_PREFIX};

/// Flags directives that are not valid in the section containing them.
///
/// Cloning is cheap: clones share the same read-only registry, so one
/// validator can be handed to many worker threads.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<SchemaRegistry>,
}

impl Validator {
    pub fn new() -> Self {
        Self::with_registry(SchemaRegistry::builtin())
    }

    pub fn with_registry(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Diagnostics for every unrecognized directive, in document order
    pub fn validate(&self, document: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for section in &document.sections {
            let allowed = match self.registry.classify(&section.name) {
                SectionClass::Known { allowed, .. } => allowed,
                SectionClass::Exempt => {
                    trace!("Skipping vendor section [{}]", section.name);
                    continue;
                }
                SectionClass::Unknown => {
                    debug!("Skipping unrecognized section [{}]", section.name);
                    continue;
                }
            };

            for directive in &section.directives {
                if directive.key.starts_with(VENDOR_EXTENSION_PREFIX)
                    || allowed.contains(&directive.key)
                {
                    continue;
                }

                trace!(
                    "Unknown directive {} in [{}] at byte {}",
                    directive.key, section.name, directive.key_span.start
                );
                diagnostics.push(Diagnostic::unknown_directive(directive.key_span));
            }
        }

        diagnostics
    }

    /// Parse `text` and validate the result
    pub fn validate_str(&self, text: &str) -> Vec<Diagnostic> {
        self.validate(&parser::parse(text))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
