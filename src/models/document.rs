use super::span::Span;

/// A parsed unit file: its sections in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

/// A `[Name]` block and the directives that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Literal text between the brackets
    pub name: String,
    /// Span of the `[Name]` header token
    pub span: Span,
    pub directives: Vec<Directive>,
}

/// A single `Key=Value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    /// Span of the key token only, never the `=Value` suffix
    pub key_span: Span,
    pub value: String,
}

impl Document {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections with the given name, in source order (names may repeat)
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections.iter().filter(move |section| section.name == name)
    }

    pub fn directive_count(&self) -> usize {
        self.sections.iter().map(|section| section.directives.len()).sum()
    }
}

impl Section {
    pub fn directive(&self, key: &str) -> Option<&Directive> {
        self.directives.iter().find(|directive| directive.key == key)
    }
}
