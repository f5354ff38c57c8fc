//! mlpipe - driver for a multi-step ML training pipeline
//!
//! Orchestration only: which steps run, in what order, with what
//! parameters. The steps themselves are opaque, independently packaged
//! executables; all inter-step data flows through an external artifact
//! store as `name:version` references.

pub mod cli;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use crate::core::{
    ArtifactRef, ArtifactVersion, ConfigError, ParamMap, ParamValue, RunConfig, RunContext,
    RunScope, ScopeError, StepInvocation, StepName, StepSelection, REGISTRY,
};
pub use crate::execution::{
    DriverEvent, MlflowRunner, MlflowRunnerConfig, PipelineDriver, PipelineError, RunReport,
    RunStatus, RunnerError, StepOutcome, StepRunner,
};
