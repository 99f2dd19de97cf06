use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use unitlint::LintError;
use unitlint::config::LintConfig;
use unitlint::schema::SchemaRegistry;

/// Arguments for the `unitlint schema` subcommand.
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Section type to list directives for (lists section types when omitted)
    pub section: Option<String>,

    /// Path to a config file (defaults to .unitlint.yml when present)
    #[arg(short, long, env = "UNITLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn schema_command(args: SchemaArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = LintConfig::discover(args.config.as_deref(), &cwd)?;
    let registry = config.registry();

    match args.section {
        None => list_section_types(&registry),
        Some(section) => list_directives(&registry, &section)?,
    }

    Ok(())
}

fn list_section_types(registry: &SchemaRegistry) {
    println!("Section types:");

    for section_type in registry.section_types() {
        let Some(schema) = registry.section(section_type) else {
            continue;
        };
        if schema.groups().is_empty() {
            println!("  {section_type}");
        } else {
            println!("  {section_type} (+ {})", schema.groups().join(", "));
        }
    }
}

fn list_directives(registry: &SchemaRegistry, section_type: &str) -> Result<()> {
    let schema = registry
        .section(section_type)
        .ok_or_else(|| LintError::UnknownSection(section_type.to_string()))?;

    println!("[{section_type}]");
    for directive in schema.directives() {
        println!("  {directive}");
    }

    for group_name in schema.groups() {
        println!("\nFrom {group_name}:");
        if let Some(group) = registry.group(group_name) {
            for directive in group {
                println!("  {directive}");
            }
        }
    }

    Ok(())
}
