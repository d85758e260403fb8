//! Remembered answers that survive across runs

use super::prompt::Field;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the store location
pub const STATE_FILE_ENV: &str = "NGLIB_STATE_FILE";

/// On-disk layout of the store
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

/// Last-entered values for remembered fields, persisted as YAML under `answers:` keyed by field name
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl AnswerStore {
    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Default location: `$NGLIB_STATE_FILE`, else `<config dir>/nglib/answers.yaml`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(STATE_FILE_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("nglib").join("answers.yaml"))
    }

    /// Load the store at `path`; a missing file is an empty store
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str::<StateFile>(&content)
                .map_err(|source| Error::State {
                    path: path.clone(),
                    source,
                })?
                .answers,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(&path, e)),
        };

        tracing::debug!(path = %path.display(), entries = values.len(), "loaded answer store");

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    /// Record an answer; fields that are not remembered are ignored
    pub fn remember(&mut self, field: Field, value: &str) {
        if field.is_remembered() {
            self.values.insert(field.key().to_string(), value.to_string());
        }
    }

    /// Write the store back to its file, creating parent directories
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let state = StateFile {
            answers: self.values.clone(),
        };
        let content = serde_yaml::to_string(&state).map_err(|source| Error::State {
            path: path.clone(),
            source,
        })?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))?;

        tracing::debug!(path = %path.display(), "saved answer store");
        Ok(())
    }
}
