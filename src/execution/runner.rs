//! Step runner seam - the contract the driver delegates execution to

use crate::core::{RunContext, StepInvocation};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from the runner itself, as opposed to a step reporting failure
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to launch step: {0}")]
    Spawn(String),

    #[error("step timed out after {0} seconds")]
    Timeout(u64),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Outcome reported by the external step executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failure { reason: String },
}

/// Executes one packaged step
///
/// Implementations own environment isolation and artifact resolution; the
/// driver only hands over the invocation and the run context. The call
/// blocks until the step finishes.
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(
        &self,
        invocation: &StepInvocation,
        ctx: &RunContext,
    ) -> Result<StepOutcome, RunnerError>;
}
