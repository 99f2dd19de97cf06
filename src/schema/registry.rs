use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use thiserror::Error;

use once_cell::sync::Lazy;

/// Prefix reserved for vendor extensions, on both section names and directive keys
pub const VENDOR_EXTENSION_PREFIX: &str = "X-";

// Embed the directive table at compile time
const DIRECTIVES_YAML: &str = include_str!("directives.yaml");

// Parse the built-in table once at startup
static BUILTIN_REGISTRY: Lazy<Arc<SchemaRegistry>> = Lazy::new(|| {
    let table: SchemaTable = serde_yaml::from_str(DIRECTIVES_YAML)
        .expect("Failed to parse built-in directive table - this is a bug");
    let registry = SchemaRegistry::from_table(table)
        .expect("Built-in directive table is inconsistent - this is a bug");
    Arc::new(registry)
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaTable {
    groups: BTreeMap<String, Vec<String>>,
    sections: BTreeMap<String, SectionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectionEntry {
    #[serde(default)]
    directives: Vec<String>,
    #[serde(default)]
    groups: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("directive '{directive}' is listed twice in '{list}'")]
    DuplicateDirective { list: String, directive: String },

    #[error("section type '{section}' includes undefined group '{group}'")]
    UndefinedGroup { section: String, group: String },
}

/// How a section name is treated by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionClass<'a> {
    /// `X-` prefixed section, never validated
    Exempt,
    /// Canonical section type with its effective allowed set
    Known {
        section_type: &'a str,
        allowed: &'a HashSet<String>,
    },
    /// Not modeled by the registry, not validated
    Unknown,
}

/// Schema of one canonical section type
#[derive(Debug, Clone)]
pub struct SectionSchema {
    directives: BTreeSet<String>,
    groups: Vec<String>,
    allowed: HashSet<String>,
}

impl SectionSchema {
    /// Directives valid directly in this section type
    pub fn directives(&self) -> &BTreeSet<String> {
        &self.directives
    }

    /// Names of the shared groups this section type includes
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Direct directives plus every directive from the included groups
    pub fn allowed(&self) -> &HashSet<String> {
        &self.allowed
    }

    pub fn allows(&self, key: &str) -> bool {
        self.allowed.contains(key)
    }
}

/// Read-only knowledge base of which directives belong to which section type.
///
/// Effective sets are resolved once when the registry is built. The registry
/// is shared across threads behind an `Arc` and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    sections: BTreeMap<String, SectionSchema>,
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaRegistry {
    /// The registry built from the embedded directive table
    pub fn builtin() -> Arc<SchemaRegistry> {
        Arc::clone(&BUILTIN_REGISTRY)
    }

    fn from_table(table: SchemaTable) -> Result<Self, SchemaError> {
        let mut groups = BTreeMap::new();
        for (name, directives) in table.groups {
            let set = unique_set(&name, directives)?;
            groups.insert(name, set);
        }

        let mut sections = BTreeMap::new();
        for (name, entry) in table.sections {
            let directives = unique_set(&name, entry.directives)?;
            let mut allowed: HashSet<String> = directives.iter().cloned().collect();

            for group in &entry.groups {
                let members = groups.get(group).ok_or_else(|| SchemaError::UndefinedGroup {
                    section: name.clone(),
                    group: group.clone(),
                })?;
                allowed.extend(members.iter().cloned());
            }

            sections.insert(
                name,
                SectionSchema {
                    directives,
                    groups: entry.groups,
                    allowed,
                },
            );
        }

        Ok(Self { sections, groups })
    }

    /// Copy of this registry with additional directives accepted per section type.
    ///
    /// A section type missing from the registry becomes known with only the
    /// extra directives.
    pub fn with_extra_directives(&self, extra: &BTreeMap<String, Vec<String>>) -> SchemaRegistry {
        let mut registry = self.clone();

        for (section, directives) in extra {
            let schema = registry
                .sections
                .entry(section.clone())
                .or_insert_with(|| SectionSchema {
                    directives: BTreeSet::new(),
                    groups: Vec::new(),
                    allowed: HashSet::new(),
                });

            for directive in directives {
                schema.directives.insert(directive.clone());
                schema.allowed.insert(directive.clone());
            }
        }

        registry
    }

    /// Classify a section by its declared name
    pub fn classify<'a>(&'a self, section_name: &str) -> SectionClass<'a> {
        if section_name.starts_with(VENDOR_EXTENSION_PREFIX) {
            return SectionClass::Exempt;
        }

        match self.sections.get_key_value(section_name) {
            Some((section_type, schema)) => SectionClass::Known {
                section_type,
                allowed: &schema.allowed,
            },
            None => SectionClass::Unknown,
        }
    }

    pub fn section(&self, section_type: &str) -> Option<&SectionSchema> {
        self.sections.get(section_type)
    }

    /// Canonical section types in name order
    pub fn section_types(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn group(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(name)
    }
}

fn unique_set(list: &str, directives: Vec<String>) -> Result<BTreeSet<String>, SchemaError> {
    let mut set = BTreeSet::new();
    for directive in directives {
        if set.contains(&directive) {
            return Err(SchemaError::DuplicateDirective {
                list: list.to_string(),
                directive,
            });
        }
        set.insert(directive);
    }
    Ok(set)
}
