//! MLflow runner - executes packaged steps as `mlflow run` subprocesses

use crate::core::{ParamMap, RunContext, StepInvocation};
use crate::execution::runner::{RunnerError, StepOutcome, StepRunner};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Configuration for the MLflow runner
#[derive(Debug, Clone)]
pub struct MlflowRunnerConfig {
    /// Path to the mlflow executable
    ///
    /// If not provided, defaults to "mlflow" (assumes it's on PATH).
    pub mlflow_path: Option<String>,

    /// Environment manager handed to `mlflow run`
    pub env_manager: String,

    /// Timeout for one step in seconds
    pub timeout_secs: u64,
}

impl Default for MlflowRunnerConfig {
    fn default() -> Self {
        Self {
            mlflow_path: None,
            env_manager: "conda".to_string(),
            timeout_secs: 10800,
        }
    }
}

/// Runs each step via the MLflow CLI
///
/// Tracking-backend identity (project, experiment group) is applied to the
/// child process environment only, never to the driver's own.
#[derive(Debug, Clone)]
pub struct MlflowRunner {
    mlflow_path: String,
    env_manager: String,
    timeout_secs: u64,
}

impl MlflowRunner {
    pub fn new(config: MlflowRunnerConfig) -> Self {
        Self {
            mlflow_path: config.mlflow_path.unwrap_or_else(|| "mlflow".to_string()),
            env_manager: config.env_manager,
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Render a parameter mapping as `-P name=value` argument pairs
fn param_args(parameters: &ParamMap) -> Vec<String> {
    parameters
        .iter()
        .flat_map(|(name, value)| ["-P".to_string(), format!("{}={}", name, value)])
        .collect()
}

#[async_trait]
impl StepRunner for MlflowRunner {
    async fn run(
        &self,
        invocation: &StepInvocation,
        ctx: &RunContext,
    ) -> Result<StepOutcome, RunnerError> {
        debug!(
            "spawning mlflow run for step {} at {}",
            invocation.step, invocation.location
        );

        let mut command = Command::new(&self.mlflow_path);
        command
            .arg("run")
            .arg(&invocation.location)
            .args(["-e", &invocation.entry_point])
            .args(["--env-manager", &self.env_manager])
            .args(param_args(&invocation.parameters))
            .env("WANDB_PROJECT", &ctx.project)
            .env("WANDB_RUN_GROUP", &ctx.experiment_group)
            .current_dir(&ctx.work_dir)
            .kill_on_drop(true);

        let result = timeout(Duration::from_secs(self.timeout_secs), command.output())
            .await
            .map_err(|_| RunnerError::Timeout(self.timeout_secs))?;

        let output = result
            .map_err(|e| RunnerError::Spawn(format!("cannot execute {}: {}", self.mlflow_path, e)))?;

        if output.status.success() {
            debug!("step {} finished successfully", invocation.step);
            Ok(StepOutcome::Success)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(
                "mlflow exited with code {} for step {}: {}",
                exit_code,
                invocation.step,
                stderr.trim()
            );
            Ok(StepOutcome::Failure {
                reason: format!("mlflow exited with code {}: {}", exit_code, stderr.trim()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArtifactRef, ParamValue};

    #[test]
    fn test_default_config() {
        let runner = MlflowRunner::new(MlflowRunnerConfig::default());
        assert_eq!(runner.mlflow_path, "mlflow");
        assert_eq!(runner.env_manager, "conda");
    }

    #[test]
    fn test_custom_mlflow_path() {
        let runner = MlflowRunner::new(MlflowRunnerConfig {
            mlflow_path: Some("/opt/conda/bin/mlflow".to_string()),
            ..MlflowRunnerConfig::default()
        });
        assert_eq!(runner.mlflow_path, "/opt/conda/bin/mlflow");
    }

    #[test]
    fn test_param_args_rendering() {
        let mut params = ParamMap::new();
        params.insert(
            "csv".to_string(),
            ParamValue::Artifact(ArtifactRef::latest("clean_sample.csv")),
        );
        params.insert("kl_threshold".to_string(), ParamValue::Float(0.2));

        assert_eq!(
            param_args(&params),
            vec!["-P", "csv=clean_sample.csv:latest", "-P", "kl_threshold=0.2"]
        );
    }

    #[tokio::test]
    #[ignore] // Requires mlflow to be installed
    async fn test_spawn_missing_project_fails() {
        use crate::core::{RunConfig, StepName};

        let yaml = r#"
main:
  project_name: "nyc_airbnb"
  experiment_name: "development"
  steps: "download"
  components_repository: "nonexistent-repo"
etl:
  sample: "sample1.csv"
  min_price: 10
  max_price: 350
data:
  raw_artifact: "sample.csv:latest"
data_check:
  kl_threshold: 0.2
modeling:
  test_size: 0.2
  val_size: 0.2
  random_seed: 42
  stratify_by: "neighbourhood_group"
  max_tfidf_features: 5
  random_forest:
    n_estimators: 100
    max_depth: 15
    min_samples_split: 4
    min_samples_leaf: 3
    n_jobs: -1
    criterion: "absolute_error"
    max_features: 0.5
    oob_score: true
"#;
        let config = RunConfig::from_yaml(yaml).unwrap();
        let work_dir = tempfile::TempDir::new().unwrap();
        let ctx = RunContext::new(&config, work_dir.path());
        let invocation =
            crate::core::plan::build_invocation(StepName::Download, &config, &ctx).unwrap();

        let runner = MlflowRunner::new(MlflowRunnerConfig::default());
        let outcome = runner.run(&invocation, &ctx).await.unwrap();
        assert!(matches!(outcome, StepOutcome::Failure { .. }));
    }
}
