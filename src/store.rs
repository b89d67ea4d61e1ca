//! Durable local store: one JSON document under one fixed key.
//!
//! Every save fully replaces the prior payload via an atomic
//! write-then-rename, so a crash mid-write leaves either the old or the
//! new document, never a torn mix.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::core::State;
use crate::paths;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("state document at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The single-record persistence primitive.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default XDG location.
    pub fn open_default() -> Self {
        Self::new(paths::state_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previously saved raw payload, `None` on first run. A
    /// document that no longer parses is reported as `Corrupt`; the caller
    /// decides whether to fall back to defaults.
    pub fn load(&self) -> Result<Option<Value>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Persist the full state. Synchronous: when this returns `Ok`, the
    /// document is durable as far as the local device is concerned.
    pub fn save(&self, state: &State) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(state)?;
        self.atomic_write(&payload)
    }

    fn atomic_write(&self, data: &[u8]) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        let temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(temp.path(), data).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        temp.persist(&self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}
