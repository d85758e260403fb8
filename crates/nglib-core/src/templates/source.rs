//! Template root resolution and file access
//!
//! Templates are read from a local directory: an explicit `--template-dir`,
//! the `NGLIB_TEMPLATE_DIR` environment variable, or the directory bundled
//! with this crate.

use super::catalog::EntrySource;
use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "NGLIB_TEMPLATE_DIR";

/// Templates shipped with the crate
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// One concrete file resolved from a catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Path relative to the template root
    pub source: PathBuf,
    /// Path relative to the destination root
    pub destination: PathBuf,
}

/// Read-only directory holding the template assets
#[derive(Debug, Clone)]
pub struct TemplateRoot {
    path: PathBuf,
}

impl TemplateRoot {
    /// Use `path` as the template root; it must exist
    pub fn local(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(Error::TemplateRootMissing(path));
        }
        Ok(Self { path })
    }

    /// Explicit directory, else `$NGLIB_TEMPLATE_DIR`, else the bundled templates
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::local(path);
        }
        match std::env::var(TEMPLATE_DIR_ENV) {
            Ok(path) if !path.is_empty() => Self::local(path),
            _ => Self::bundled(),
        }
    }

    pub fn bundled() -> Result<Self> {
        Self::local(BUNDLED_TEMPLATE_DIR)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expand an entry source into concrete files, in a stable order
    pub fn resolve_entry(&self, source: &EntrySource) -> Result<Vec<ResolvedFile>> {
        match source {
            EntrySource::File { from, to } => Ok(vec![ResolvedFile {
                source: PathBuf::from(from),
                destination: PathBuf::from(to),
            }]),
            EntrySource::Glob { base, pattern, to } => self.expand_glob(base, pattern, to),
        }
    }

    fn expand_glob(&self, base: &str, pattern: &str, to: &str) -> Result<Vec<ResolvedFile>> {
        let pattern = Pattern::new(pattern)?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let base_dir = self.path.join(base);
        if !base_dir.is_dir() {
            tracing::warn!(base = %base_dir.display(), "glob base directory does not exist");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&base_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&base_dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            if !pattern.matches_path_with(&relative, options) {
                continue;
            }

            files.push(ResolvedFile {
                source: Path::new(base).join(&relative),
                destination: Path::new(to).join(&relative),
            });
        }

        Ok(files)
    }

    /// Read a template file as bytes
    pub async fn read_bytes(&self, relative: &Path) -> Result<Vec<u8>> {
        let path = self.path.join(relative);
        fs::read(&path).await.map_err(|e| Error::io(&path, e))
    }

    /// Read a template file as UTF-8 text
    pub async fn read_to_string(&self, relative: &Path) -> Result<String> {
        let path = self.path.join(relative);
        fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io(&path, e))
    }
}
