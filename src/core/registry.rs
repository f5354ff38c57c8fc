//! Step catalog - the fixed, ordered set of pipeline steps

use crate::core::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pipeline step
///
/// The variant order is the canonical execution order: every step's input
/// artifacts are produced by strictly earlier steps, except
/// `test_regression_model`, which consumes a model promoted to `prod` by a
/// human outside the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    Download,
    BasicCleaning,
    DataCheck,
    TrainValTestSplit,
    TrainRandomForest,
    TestRegressionModel,
}

/// All steps, in execution order
pub const REGISTRY: [StepName; 6] = [
    StepName::Download,
    StepName::BasicCleaning,
    StepName::DataCheck,
    StepName::TrainValTestSplit,
    StepName::TrainRandomForest,
    StepName::TestRegressionModel,
];

impl StepName {
    /// The token used on the configuration surface
    pub fn token(self) -> &'static str {
        match self {
            StepName::Download => "download",
            StepName::BasicCleaning => "basic_cleaning",
            StepName::DataCheck => "data_check",
            StepName::TrainValTestSplit => "train_val_test_split",
            StepName::TrainRandomForest => "train_random_forest",
            StepName::TestRegressionModel => "test_regression_model",
        }
    }

    /// Whether the step is part of the `all` selection
    ///
    /// `test_regression_model` needs a model export promoted to `prod`
    /// first, a precondition the driver cannot check, so it only runs when
    /// requested by name.
    pub fn in_default_all(self) -> bool {
        self != StepName::TestRegressionModel
    }

    /// The steps an `all` selection resolves to, in execution order
    pub fn default_all() -> Vec<StepName> {
        REGISTRY
            .iter()
            .copied()
            .filter(|step| step.in_default_all())
            .collect()
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for StepName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .copied()
            .find(|step| step.token() == s)
            .ok_or_else(|| ConfigError::UnknownStep(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        assert_eq!(REGISTRY[0], StepName::Download);
        assert_eq!(REGISTRY[5], StepName::TestRegressionModel);

        // Derived ordering matches the registry ordering
        let mut sorted = REGISTRY.to_vec();
        sorted.sort();
        assert_eq!(sorted, REGISTRY.to_vec());
    }

    #[test]
    fn test_default_all_excludes_gated_step() {
        let default = StepName::default_all();
        assert_eq!(default.len(), REGISTRY.len() - 1);
        assert!(!default.contains(&StepName::TestRegressionModel));
        assert_eq!(default[0], StepName::Download);
    }

    #[test]
    fn test_token_round_trip() {
        for step in REGISTRY {
            assert_eq!(step.token().parse::<StepName>().unwrap(), step);
            assert_eq!(step.to_string(), step.token());
        }
    }

    #[test]
    fn test_unknown_token_fails() {
        let result = "train_xgboost".parse::<StepName>();
        assert!(matches!(result, Err(ConfigError::UnknownStep(_))));
    }
}
