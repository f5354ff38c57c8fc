//! Run scope - the working directory owned by one pipeline run

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

/// Errors establishing, using, or releasing the run scope
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("cannot create run directory: {0}")]
    Create(std::io::Error),

    #[error("cannot serialize {name}: {source}")]
    Serialize {
        name: String,
        source: serde_json::Error,
    },

    #[error("cannot write {name} into run directory: {source}")]
    SideFile {
        name: String,
        source: std::io::Error,
    },

    #[error("cannot release run directory: {0}")]
    Release(std::io::Error),
}

/// Run-duration working directory
///
/// Created when a run starts and removed when it ends, on the success and
/// failure paths alike. `close` is idempotent; if it is never called the
/// directory is still removed on drop.
#[derive(Debug)]
pub struct RunScope {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl RunScope {
    /// Create the working directory for a new run
    pub fn enter() -> Result<Self, ScopeError> {
        let dir = TempDir::new().map_err(ScopeError::Create)?;
        let path = dir.path().to_path_buf();
        debug!("run scope at {}", path.display());
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the working directory; safe to call more than once
    pub fn close(&mut self) -> Result<(), ScopeError> {
        match self.dir.take() {
            Some(dir) => {
                debug!("releasing run scope at {}", self.path.display());
                dir.close().map_err(ScopeError::Release)
            }
            None => Ok(()),
        }
    }
}

/// Write a side file into a run directory, returning its absolute path
///
/// Side files live for the run's duration and are removed with the scope.
pub fn write_side_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, ScopeError> {
    let path = dir.join(name);
    std::fs::write(&path, contents).map_err(|e| ScopeError::SideFile {
        name: name.to_string(),
        source: e,
    })?;
    Ok(path)
}
