//! Run configuration - typed view of the pipeline config file

use crate::core::artifact::ArtifactRef;
use crate::core::selection::StepSelection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a run configuration
///
/// All of these surface before any step executes, so a bad configuration
/// never leaves partial side effects behind.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown step '{0}' in selection")]
    UnknownStep(String),

    #[error("step selection is empty")]
    EmptySelection,

    #[error("malformed artifact reference '{0}' (expected name:version)")]
    MalformedArtifact(String),

    #[error("{0}")]
    Invalid(String),
}

/// Top-level run configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub main: MainConfig,
    pub etl: EtlConfig,
    pub data: DataConfig,
    pub data_check: DataCheckConfig,
    pub modeling: ModelingConfig,
}

/// Project identity and step selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainConfig {
    /// Tracking project all runs are filed under
    pub project_name: String,

    /// Experiment group the run's tracking entries share
    pub experiment_name: String,

    /// Selection expression: `all` or a comma-delimited step list
    #[serde(default = "default_steps")]
    pub steps: String,

    /// Shared repository holding the packaged pipeline components
    pub components_repository: String,
}

fn default_steps() -> String {
    "all".to_string()
}

/// Download and price-bound tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Name of the sample file the download step fetches
    pub sample: String,

    pub min_price: f64,
    pub max_price: f64,
}

/// Artifacts fed into the pipeline from outside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Raw dataset reference consumed by the cleaning step
    pub raw_artifact: ArtifactRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCheckConfig {
    /// KL-divergence threshold for the distribution drift test
    pub kl_threshold: f64,
}

/// Split and training tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelingConfig {
    pub test_size: f64,
    pub val_size: f64,
    pub random_seed: i64,
    pub stratify_by: String,
    pub max_tfidf_features: i64,
    pub random_forest: RandomForestConfig,
}

/// Hyperparameters serialized to the training step's side file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestConfig {
    pub n_estimators: u32,
    pub max_depth: u32,
    pub min_samples_split: u32,
    pub min_samples_leaf: u32,
    pub n_jobs: i32,
    pub criterion: String,
    pub max_features: f64,
    pub oob_score: bool,
}

impl RunConfig {
    /// Load a run configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a run configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field contents beyond what deserialization enforces
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.main.project_name.trim().is_empty() {
            return Err(ConfigError::Invalid("main.project_name is empty".to_string()));
        }
        if self.main.experiment_name.trim().is_empty() {
            return Err(ConfigError::Invalid("main.experiment_name is empty".to_string()));
        }
        if self.main.components_repository.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "main.components_repository is empty".to_string(),
            ));
        }

        // Reject bad selections at load time, not at dispatch time
        StepSelection::parse(&self.main.steps)?;

        if self.etl.min_price >= self.etl.max_price {
            return Err(ConfigError::Invalid(format!(
                "etl.min_price ({}) must be below etl.max_price ({})",
                self.etl.min_price, self.etl.max_price
            )));
        }

        for (field, value) in [
            ("modeling.test_size", self.modeling.test_size),
            ("modeling.val_size", self.modeling.val_size),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be strictly between 0 and 1, got {}",
                    field, value
                )));
            }
        }

        Ok(())
    }

    /// The parsed step selection
    pub fn selection(&self) -> Result<StepSelection, ConfigError> {
        StepSelection::parse(&self.main.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::StepName;

    const VALID_YAML: &str = r#"
main:
  project_name: "nyc_airbnb"
  experiment_name: "development"
  steps: "all"
  components_repository: "https://github.com/example/components#components"
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

    #[test]
    fn test_parse_valid_config() {
        let config = RunConfig::from_yaml(VALID_YAML).unwrap();
        assert_eq!(config.main.project_name, "nyc_airbnb");
        assert_eq!(config.data.raw_artifact, ArtifactRef::latest("sample.csv"));
        assert_eq!(config.modeling.random_forest.n_estimators, 100);
        assert_eq!(
            config.selection().unwrap().resolve(),
            StepName::default_all()
        );
    }

    #[test]
    fn test_missing_section_fails() {
        let yaml = VALID_YAML.replace("data_check:\n  kl_threshold: 0.2\n", "");
        assert!(matches!(
            RunConfig::from_yaml(&yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_step_fails_at_load() {
        let yaml = VALID_YAML.replace("steps: \"all\"", "steps: \"download,deploy\"");
        match RunConfig::from_yaml(&yaml) {
            Err(ConfigError::UnknownStep(token)) => assert_eq!(token, "deploy"),
            other => panic!("Expected UnknownStep, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_artifact_fails_at_load() {
        let yaml = VALID_YAML.replace("\"sample.csv:latest\"", "\"sample.csv\"");
        assert!(matches!(
            RunConfig::from_yaml(&yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_inverted_price_bounds_fail() {
        let yaml = VALID_YAML.replace("max_price: 350", "max_price: 5");
        assert!(matches!(
            RunConfig::from_yaml(&yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_split_fraction_out_of_range_fails() {
        let yaml = VALID_YAML.replace("test_size: 0.2", "test_size: 1.5");
        assert!(matches!(
            RunConfig::from_yaml(&yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_steps_defaults_to_all() {
        let yaml = VALID_YAML.replace("  steps: \"all\"\n", "");
        let config = RunConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.main.steps, "all");
    }
}
