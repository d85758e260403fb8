//! Writes the catalog into a destination directory

use super::catalog::{Catalog, Mode, TemplateEntry};
use super::render;
use super::source::{ResolvedFile, TemplateRoot};
use crate::answers::ConfigurationRecord;
use crate::error::{Error, Result};
use crate::hooks::{GenerationContext, PostHook};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files written by one materialization, relative to the destination, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub files: Vec<PathBuf>,
}

/// Renders the template catalog for a configuration record, then runs the post hooks
pub struct Materializer {
    root: TemplateRoot,
    catalog: Catalog,
    hooks: Vec<Box<dyn PostHook>>,
}

impl Materializer {
    pub fn new(root: TemplateRoot) -> Self {
        Self {
            root,
            catalog: Catalog::standard(),
            hooks: Vec::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Append a hook; hooks run in registration order after the catalog
    pub fn with_hook(mut self, hook: impl PostHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Write every entry for the record's test framework, then run the hooks.
    ///
    /// Filesystem errors abort immediately; files flushed before the failure
    /// are left in place.
    pub async fn materialize(
        &self,
        config: &ConfigurationRecord,
        destination: &Path,
    ) -> Result<MaterializeReport> {
        fs::create_dir_all(destination)
            .await
            .map_err(|e| Error::io(destination, e))?;

        let mut written = Vec::new();
        for entry in self.catalog.entries_for(config.test_framework) {
            tracing::info!(source = ?entry.source, mode = ?entry.mode, "writing template entry");
            let files = write_entry(&self.root, entry, config, destination).await?;
            written.extend(files);
        }

        let mut ctx = GenerationContext::new(config, &self.root, destination, written);
        for hook in &self.hooks {
            tracing::info!(hook = hook.name(), "running post hook");
            hook.run(&mut ctx).await?;
        }

        Ok(MaterializeReport {
            files: ctx.into_written(),
        })
    }
}

/// Write one catalog entry, returning the destination-relative paths written
pub async fn write_entry(
    root: &TemplateRoot,
    entry: &TemplateEntry,
    config: &ConfigurationRecord,
    destination: &Path,
) -> Result<Vec<PathBuf>> {
    let files = root.resolve_entry(&entry.source)?;
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        write_file(root, &file, entry.mode, config, destination).await?;
        written.push(file.destination);
    }

    Ok(written)
}

async fn write_file(
    root: &TemplateRoot,
    file: &ResolvedFile,
    mode: Mode,
    config: &ConfigurationRecord,
    destination: &Path,
) -> Result<()> {
    let target_path = destination.join(&file.destination);

    // Ensure parent directories exist
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    let content = match mode {
        Mode::Copy => root.read_bytes(&file.source).await?,
        Mode::Render => {
            let template = root.read_to_string(&file.source).await?;
            render::render(&template, config).into_bytes()
        }
    };

    fs::write(&target_path, &content)
        .await
        .map_err(|e| Error::io(&target_path, e))?;

    tracing::debug!(
        source = %file.source.display(),
        destination = %target_path.display(),
        bytes = content.len(),
        "wrote file"
    );
    Ok(())
}
