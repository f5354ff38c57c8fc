//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{RunCommand, StepsCommand, ValidateCommand};

/// Pipeline driver for versioned-artifact ML training runs
#[derive(Debug, Parser, Clone)]
#[command(name = "mlpipe")]
#[command(version = "0.1.0")]
#[command(about = "Runs the packaged ML pipeline steps in order", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the selected pipeline steps
    Run(RunCommand),

    /// Validate a run configuration
    Validate(ValidateCommand),

    /// List the pipeline steps in execution order
    Steps(StepsCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "mlpipe",
            "run",
            "--config",
            "config.yaml",
            "--steps",
            "download,data_check",
        ])
        .unwrap();

        match cli.command {
            Command::Run(cmd) => {
                assert_eq!(cmd.config, "config.yaml");
                assert_eq!(cmd.steps.as_deref(), Some("download,data_check"));
            }
            other => panic!("Expected run command, got {:?}", other),
        }
    }

    #[test]
    fn test_run_requires_config() {
        assert!(Cli::try_parse_from(["mlpipe", "run"]).is_err());
    }
}
