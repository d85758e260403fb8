//! Post-processing hooks run after the catalog has been written
//!
//! The materializer knows nothing about demo apps or dependency installation;
//! both are hooks registered by the caller, in order.

use crate::answers::ConfigurationRecord;
use crate::error::Result;
use crate::runtime::{self, PackageManager};
use crate::templates::catalog::TemplateEntry;
use crate::templates::materializer::write_entry;
use crate::templates::source::TemplateRoot;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a hook can see about the current generation
pub struct GenerationContext<'a> {
    pub config: &'a ConfigurationRecord,
    pub template_root: &'a TemplateRoot,
    pub destination: &'a Path,
    written: Vec<PathBuf>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        config: &'a ConfigurationRecord,
        template_root: &'a TemplateRoot,
        destination: &'a Path,
        written: Vec<PathBuf>,
    ) -> Self {
        Self {
            config,
            template_root,
            destination,
            written,
        }
    }

    /// Destination-relative paths written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Record a file written by a hook
    pub fn record(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

/// A step run once after core materialization
#[async_trait]
pub trait PostHook: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()>;
}

/// Renders the demo application under `playground/`
#[derive(Debug, Clone)]
pub struct PlaygroundHook {
    entry: TemplateEntry,
}

impl PlaygroundHook {
    pub fn new() -> Self {
        Self {
            entry: TemplateEntry::render_glob("playground", "**/*", "playground"),
        }
    }

    /// The catalog entry this hook writes
    pub fn entry(&self) -> &TemplateEntry {
        &self.entry
    }
}

impl Default for PlaygroundHook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostHook for PlaygroundHook {
    fn name(&self) -> &'static str {
        "playground"
    }

    async fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let files = write_entry(ctx.template_root, &self.entry, ctx.config, ctx.destination).await?;
        tracing::debug!(files = files.len(), "playground written");
        for file in files {
            ctx.record(file);
        }
        Ok(())
    }
}

/// Which package manager backends the install step drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    pub npm: bool,
    pub bower: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            npm: true,
            bower: true,
        }
    }
}

impl InstallOptions {
    /// Default backends minus bower; the generated project has no bower.json
    pub fn without_bower() -> Self {
        Self {
            bower: false,
            ..Self::default()
        }
    }

    pub fn managers(&self) -> Vec<PackageManager> {
        PackageManager::ALL
            .into_iter()
            .filter(|m| match m {
                PackageManager::Npm => self.npm,
                PackageManager::Bower => self.bower,
            })
            .collect()
    }

    /// Commands a user would run by hand
    pub fn commands(&self) -> Vec<String> {
        self.managers()
            .iter()
            .map(PackageManager::install_command)
            .collect()
    }
}

/// Installs the generated project's dependencies
#[derive(Debug, Clone)]
pub struct InstallHook {
    options: InstallOptions,
    timeout: Duration,
}

impl InstallHook {
    pub fn new(options: InstallOptions) -> Self {
        Self {
            options,
            timeout: runtime::INSTALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn options(&self) -> InstallOptions {
        self.options
    }
}

#[async_trait]
impl PostHook for InstallHook {
    fn name(&self) -> &'static str {
        "install"
    }

    async fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        for manager in self.options.managers() {
            let info = runtime::check_package_manager(manager);
            if !info.available {
                tracing::warn!(manager = %manager, "package manager not found, skipping install");
                continue;
            }
            runtime::install_dependencies(manager, ctx.destination, self.timeout).await?;
        }
        Ok(())
    }
}
