//! CLI command definitions

use clap::Args;

/// Run the selected pipeline steps
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the run configuration YAML file
    #[arg(short, long)]
    pub config: String,

    /// Step selection override: "all" or a comma-delimited step list
    #[arg(long)]
    pub steps: Option<String>,

    /// Path to the mlflow executable
    #[arg(long)]
    pub mlflow_path: Option<String>,

    /// Timeout per step in seconds
    #[arg(long, default_value_t = 10800)]
    pub step_timeout_secs: u64,
}

/// Validate a run configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to the run configuration YAML file
    #[arg(short, long)]
    pub config: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List the pipeline steps in execution order
#[derive(Debug, Args, Clone)]
pub struct StepsCommand {}
