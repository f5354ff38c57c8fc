//! Execution layer: the driver and the step runner implementations

pub mod driver;
pub mod mlflow;
pub mod runner;

pub use driver::{DriverEvent, PipelineDriver, PipelineError, RunReport, RunStatus};
pub use mlflow::{MlflowRunner, MlflowRunnerConfig};
pub use runner::{RunnerError, StepOutcome, StepRunner};
