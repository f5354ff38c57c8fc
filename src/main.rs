use anyhow::{Context, Result};
use mlpipe::cli::commands::{RunCommand, StepsCommand, ValidateCommand};
use mlpipe::cli::output::*;
use mlpipe::cli::{Cli, Command};
use mlpipe::{
    MlflowRunner, MlflowRunnerConfig, PipelineDriver, RunConfig, StepName, REGISTRY,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd).await?,
        Command::Validate(cmd) => validate_config(cmd)?,
        Command::Steps(cmd) => list_steps(cmd),
    }

    Ok(())
}

async fn run_pipeline(cmd: &RunCommand) -> Result<()> {
    let mut config = RunConfig::from_file(&cmd.config).context("Failed to load run config")?;

    println!(
        "{} Loaded config for project {}",
        INFO,
        style(&config.main.project_name).bold()
    );

    // Apply the step selection override
    if let Some(steps) = &cmd.steps {
        config.main.steps = steps.clone();
        config.validate().context("Invalid step selection")?;
        println!(
            "{} Step selection override: {}",
            INFO,
            style(steps).cyan()
        );
    }

    let runner = MlflowRunner::new(MlflowRunnerConfig {
        mlflow_path: cmd.mlflow_path.clone(),
        timeout_secs: cmd.step_timeout_secs,
        ..MlflowRunnerConfig::default()
    });

    let mut driver = PipelineDriver::new(runner);
    driver.add_event_handler(|event| {
        println!("{}", format_driver_event(event));
    });

    println!();
    match driver.run(&config).await {
        Ok(report) => {
            println!(
                "\n{} {} completed {} ({} steps)",
                CHECK,
                style(&config.main.project_name).bold(),
                style("successfully").green(),
                report.executed.len()
            );
            Ok(())
        }
        Err(e) => {
            println!(
                "\n{} {} {}",
                CROSS,
                style(&config.main.project_name).bold(),
                style("failed").red()
            );
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn validate_config(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating run configuration...", INFO);

    match RunConfig::from_file(&cmd.config) {
        Ok(config) => {
            let active = config.selection()?.resolve();
            println!("{} Configuration is valid!", CHECK);
            println!("  Project: {}", style(&config.main.project_name).bold());
            println!("  Experiment: {}", style(&config.main.experiment_name).bold());
            println!(
                "  Steps: {} ({})",
                style(active.len()).cyan(),
                active
                    .iter()
                    .map(|s| s.token())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn list_steps(_cmd: &StepsCommand) {
    println!("{} Pipeline steps (execution order):", INFO);
    for step in REGISTRY {
        if step.in_default_all() {
            println!("  {}", style(step).bold());
        } else {
            println!(
                "  {} {}",
                style(step).bold(),
                style("(explicit selection only; needs a prod-promoted model)").dim()
            );
        }
    }
    println!(
        "\n{} \"all\" runs {} of {} steps",
        INFO,
        StepName::default_all().len(),
        REGISTRY.len()
    );
}
