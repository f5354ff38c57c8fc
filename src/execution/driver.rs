//! Pipeline driver - resolves the active set and runs it in order

use crate::core::config::ConfigError;
use crate::core::scope::ScopeError;
use crate::core::{RunConfig, RunContext, RunScope, StepName};
use crate::execution::runner::{StepOutcome, StepRunner};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Everything that can end a run early
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("run scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("step '{step}' failed: {reason}")]
    Step { step: StepName, reason: String },
}

/// Final status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Events emitted while a run progresses
#[derive(Debug, Clone)]
pub enum DriverEvent {
    RunStarted {
        run_id: Uuid,
        steps: Vec<StepName>,
    },
    StepStarted {
        step: StepName,
        position: usize,
        total: usize,
    },
    StepCompleted {
        step: StepName,
    },
    StepFailed {
        step: StepName,
        reason: String,
    },
    RunFinished {
        run_id: Uuid,
        status: RunStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&DriverEvent) + Send + Sync>;

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub executed: Vec<StepName>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives one pipeline run: subset resolution, run scope, per-step
/// parameter wiring, and delegated execution with fail-fast semantics
pub struct PipelineDriver<R> {
    runner: R,
    handlers: Vec<EventHandler>,
}

impl<R: StepRunner> PipelineDriver<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&DriverEvent) + Send + Sync + 'static,
    {
        self.handlers.push(Arc::new(handler));
    }

    fn emit(&self, event: DriverEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }

    /// Run the steps selected by the configuration
    ///
    /// The active set executes strictly in catalog order and the run stops
    /// at the first failing step; earlier steps' artifacts stand, since each
    /// is independently versioned in the artifact store. The run scope is
    /// released before either terminal state is reported.
    pub async fn run(&self, config: &RunConfig) -> Result<RunReport, PipelineError> {
        let active = config.selection()?.resolve();
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        let mut scope = RunScope::enter()?;
        let ctx = RunContext::new(config, scope.path());

        info!(
            "starting run {} with {} steps: [{}]",
            run_id,
            active.len(),
            active
                .iter()
                .map(|s| s.token())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.emit(DriverEvent::RunStarted {
            run_id,
            steps: active.clone(),
        });

        let result = self.run_steps(&active, config, &ctx).await;
        let released = scope.close();

        match result {
            Ok(executed) => {
                released?;
                info!("run {} completed", run_id);
                self.emit(DriverEvent::RunFinished {
                    run_id,
                    status: RunStatus::Completed,
                });
                Ok(RunReport {
                    run_id,
                    executed,
                    started_at,
                    finished_at: Utc::now(),
                })
            }
            Err(err) => {
                // A release failure after a step failure is logged; the
                // step failure is what propagates.
                if let Err(scope_err) = released {
                    error!("failed to release run scope: {}", scope_err);
                }
                self.emit(DriverEvent::RunFinished {
                    run_id,
                    status: RunStatus::Failed,
                });
                Err(err)
            }
        }
    }

    async fn run_steps(
        &self,
        active: &[StepName],
        config: &RunConfig,
        ctx: &RunContext,
    ) -> Result<Vec<StepName>, PipelineError> {
        let mut executed = Vec::with_capacity(active.len());

        for (index, &step) in active.iter().enumerate() {
            self.emit(DriverEvent::StepStarted {
                step,
                position: index + 1,
                total: active.len(),
            });
            info!("running step {} [{}/{}]", step, index + 1, active.len());

            let invocation = crate::core::plan::build_invocation(step, config, ctx)?;
            let outcome = match self.runner.run(&invocation, ctx).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let reason = e.to_string();
                    self.emit(DriverEvent::StepFailed {
                        step,
                        reason: reason.clone(),
                    });
                    return Err(PipelineError::Step { step, reason });
                }
            };

            match outcome {
                StepOutcome::Success => {
                    executed.push(step);
                    self.emit(DriverEvent::StepCompleted { step });
                }
                StepOutcome::Failure { reason } => {
                    self.emit(DriverEvent::StepFailed {
                        step,
                        reason: reason.clone(),
                    });
                    return Err(PipelineError::Step { step, reason });
                }
            }
        }

        Ok(executed)
    }
}
