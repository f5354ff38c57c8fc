//! Run context - identity and working directory for one pipeline run

use crate::core::config::RunConfig;
use std::path::{Path, PathBuf};

/// Per-run bindings handed to the step runner
///
/// Project and experiment group are consumed by the tracking backend. The
/// runner applies them to each child process it spawns instead of mutating
/// the driver's own environment, so repeated runs inside one process cannot
/// leak identity into each other.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Tracking project identity
    pub project: String,

    /// Experiment group the run's tracking entries share
    pub experiment_group: String,

    /// The run scope's working directory
    pub work_dir: PathBuf,
}

impl RunContext {
    pub fn new(config: &RunConfig, work_dir: &Path) -> Self {
        Self {
            project: config.main.project_name.clone(),
            experiment_group: config.main.experiment_name.clone(),
            work_dir: work_dir.to_path_buf(),
        }
    }
}
