//! Template catalog, rendering, and materialization
//!
//! This module provides:
//! - The static template catalog ([`Catalog`]) with its test framework branch
//! - Placeholder substitution ([`render::render`])
//! - Template root resolution and glob expansion ([`TemplateRoot`])
//! - Writing a project to disk ([`Materializer`])
//! - An authoring check over the template assets ([`check_templates`])

pub mod catalog;
pub mod materializer;
pub mod render;
pub mod source;

use crate::error::Result;
use colored::Colorize;
use std::path::PathBuf;

pub use catalog::{Catalog, CatalogStep, EntrySource, Mode, TemplateEntry};
pub use materializer::{MaterializeReport, Materializer};
pub use render::{render, Placeholder};
pub use source::{TemplateRoot, TEMPLATE_DIR_ENV};

/// Result of checking template assets against a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCheck {
    /// Catalog sources missing from the template root
    pub missing: Vec<PathBuf>,
    /// Rendered files containing placeholders outside the documented set
    pub unknown_placeholders: Vec<(PathBuf, Vec<String>)>,
    /// Number of template files inspected
    pub checked: usize,
}

impl TemplateCheck {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Verify every catalog source exists and list unrecognized placeholders.
///
/// Unknown placeholders are reported, not rejected: they are rendered as
/// literal text, which is what Angular interpolations in the playground rely on.
pub fn check_templates(root: &TemplateRoot, entries: &[&TemplateEntry]) -> Result<TemplateCheck> {
    let mut check = TemplateCheck::default();

    for entry in entries {
        for file in root.resolve_entry(&entry.source)? {
            let path = root.path().join(&file.source);
            if !path.is_file() {
                check.missing.push(file.source);
                continue;
            }
            check.checked += 1;

            if entry.mode == Mode::Render {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| crate::error::Error::io(&path, e))?;
                let unknown = render::unknown_placeholders(&content);
                if !unknown.is_empty() {
                    check.unknown_placeholders.push((file.source, unknown));
                }
            }
        }
    }

    Ok(check)
}

/// Check the catalog and playground assets under `template_dir`, printing a summary
pub fn print_template_check(template_dir: Option<PathBuf>) -> Result<TemplateCheck> {
    let root = TemplateRoot::resolve(template_dir.as_deref())?;
    let catalog = Catalog::standard();
    let playground = crate::hooks::PlaygroundHook::new();

    let mut entries = catalog.all_entries();
    entries.push(playground.entry());

    println!(
        "{}",
        format!("Checking templates in {}...", root.path().display())
            .cyan()
            .bold()
    );
    println!();

    let check = check_templates(&root, &entries)?;

    for missing in &check.missing {
        println!("  {} missing {}", "x".red(), missing.display());
    }
    for (file, keys) in &check.unknown_placeholders {
        println!(
            "  {} {} keeps literal {}",
            "!".yellow(),
            file.display(),
            keys.iter()
                .map(|k| format!("{{{{ {} }}}}", k))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    println!();
    if check.is_ok() {
        println!("{} {} template file(s)", "Checked".green().bold(), check.checked);
    } else {
        println!(
            "{} {} missing template file(s)",
            "Failed:".red().bold(),
            check.missing.len()
        );
    }

    Ok(check)
}
