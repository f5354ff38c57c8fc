//! Per-step parameter wiring
//!
//! One rule per step: where the packaged step lives, its entry point, and
//! how its parameter mapping is built from the run configuration. Adding or
//! removing a step is a change to this table, not to the driver's control
//! flow.

use crate::core::artifact::ArtifactRef;
use crate::core::config::RunConfig;
use crate::core::context::RunContext;
use crate::core::params::{ParamMap, ParamValue, StepInvocation, StepLocation};
use crate::core::registry::StepName;
use crate::core::scope::{write_side_file, ScopeError};

/// Artifact names that thread between steps by convention
pub const RAW_SAMPLE: &str = "sample.csv";
pub const CLEAN_SAMPLE: &str = "clean_sample.csv";
pub const TRAINVAL_DATA: &str = "trainval_data.csv";
pub const TEST_DATA: &str = "test_data.csv";
pub const MODEL_EXPORT: &str = "random_forest_export";

/// Tag applied out-of-band to the dataset the drift check compares against
const REFERENCE_TAG: &str = "reference";

/// Name of the hyperparameter side file written into the run scope
const RF_CONFIG_FILE: &str = "rf_config.json";

type ParamBuilder = fn(&RunConfig, &RunContext) -> Result<ParamMap, ScopeError>;

struct StepRule {
    location: StepLocation,
    entry_point: &'static str,
    build: ParamBuilder,
}

fn rule(step: StepName) -> StepRule {
    match step {
        StepName::Download => StepRule {
            location: StepLocation::Component("get_data"),
            entry_point: "main",
            build: download_params,
        },
        StepName::BasicCleaning => StepRule {
            location: StepLocation::Component("basic_cleaning"),
            entry_point: "main",
            build: basic_cleaning_params,
        },
        StepName::DataCheck => StepRule {
            location: StepLocation::Component("data_check"),
            entry_point: "main",
            build: data_check_params,
        },
        StepName::TrainValTestSplit => StepRule {
            location: StepLocation::Component("train_val_test_split"),
            entry_point: "main",
            build: train_val_test_split_params,
        },
        StepName::TrainRandomForest => StepRule {
            location: StepLocation::Local("src/train_random_forest"),
            entry_point: "main",
            build: train_random_forest_params,
        },
        StepName::TestRegressionModel => StepRule {
            location: StepLocation::Local("components/test_regression_model"),
            entry_point: "main",
            build: test_regression_model_params,
        },
    }
}

/// Build the invocation for one step of the active set
pub fn build_invocation(
    step: StepName,
    config: &RunConfig,
    ctx: &RunContext,
) -> Result<StepInvocation, ScopeError> {
    let rule = rule(step);
    let parameters = (rule.build)(config, ctx)?;
    Ok(StepInvocation {
        step,
        location: rule.location.resolve(&config.main.components_repository),
        entry_point: rule.entry_point.to_string(),
        parameters,
    })
}

fn download_params(config: &RunConfig, _ctx: &RunContext) -> Result<ParamMap, ScopeError> {
    let mut params = ParamMap::new();
    params.insert("sample".to_string(), ParamValue::str(&config.etl.sample));
    params.insert("artifact_name".to_string(), ParamValue::str(RAW_SAMPLE));
    params.insert("artifact_type".to_string(), ParamValue::str("raw_data"));
    params.insert(
        "artifact_description".to_string(),
        ParamValue::str("Raw file as downloaded"),
    );
    Ok(params)
}

fn basic_cleaning_params(config: &RunConfig, _ctx: &RunContext) -> Result<ParamMap, ScopeError> {
    let mut params = ParamMap::new();
    params.insert(
        "input_artifact".to_string(),
        ParamValue::Artifact(config.data.raw_artifact.clone()),
    );
    params.insert("output_artifact".to_string(), ParamValue::str(CLEAN_SAMPLE));
    params.insert("output_type".to_string(), ParamValue::str("clean_sample"));
    params.insert(
        "output_description".to_string(),
        ParamValue::str("Cleaned dataset after basic preprocessing"),
    );
    Ok(params)
}

fn data_check_params(config: &RunConfig, _ctx: &RunContext) -> Result<ParamMap, ScopeError> {
    let mut params = ParamMap::new();
    params.insert(
        "csv".to_string(),
        ParamValue::Artifact(ArtifactRef::latest(CLEAN_SAMPLE)),
    );
    params.insert(
        "ref".to_string(),
        ParamValue::Artifact(ArtifactRef::tagged(CLEAN_SAMPLE, REFERENCE_TAG)),
    );
    params.insert(
        "kl_threshold".to_string(),
        ParamValue::Float(config.data_check.kl_threshold),
    );
    params.insert("min_price".to_string(), ParamValue::Float(config.etl.min_price));
    params.insert("max_price".to_string(), ParamValue::Float(config.etl.max_price));
    Ok(params)
}

fn train_val_test_split_params(
    config: &RunConfig,
    _ctx: &RunContext,
) -> Result<ParamMap, ScopeError> {
    let mut params = ParamMap::new();
    params.insert(
        "input".to_string(),
        ParamValue::Artifact(ArtifactRef::latest(CLEAN_SAMPLE)),
    );
    params.insert("test_size".to_string(), ParamValue::Float(config.modeling.test_size));
    params.insert("random_seed".to_string(), ParamValue::Int(config.modeling.random_seed));
    params.insert(
        "stratify_by".to_string(),
        ParamValue::str(&config.modeling.stratify_by),
    );
    Ok(params)
}

fn train_random_forest_params(
    config: &RunConfig,
    ctx: &RunContext,
) -> Result<ParamMap, ScopeError> {
    // The hyperparameter bundle goes through a side file in the run scope;
    // it lives for the run's duration and is cleaned up with the scope.
    let bundle = serde_json::to_string_pretty(&config.modeling.random_forest).map_err(|e| {
        ScopeError::Serialize {
            name: RF_CONFIG_FILE.to_string(),
            source: e,
        }
    })?;
    let rf_config = write_side_file(&ctx.work_dir, RF_CONFIG_FILE, &bundle)?;

    let mut params = ParamMap::new();
    params.insert(
        "trainval_artifact".to_string(),
        ParamValue::Artifact(ArtifactRef::latest(TRAINVAL_DATA)),
    );
    params.insert("val_size".to_string(), ParamValue::Float(config.modeling.val_size));
    params.insert("random_seed".to_string(), ParamValue::Int(config.modeling.random_seed));
    params.insert(
        "stratify_by".to_string(),
        ParamValue::str(&config.modeling.stratify_by),
    );
    params.insert(
        "max_tfidf_features".to_string(),
        ParamValue::Int(config.modeling.max_tfidf_features),
    );
    params.insert("rf_config".to_string(), ParamValue::Path(rf_config));
    params.insert("output_artifact".to_string(), ParamValue::str(MODEL_EXPORT));
    Ok(params)
}

fn test_regression_model_params(
    _config: &RunConfig,
    _ctx: &RunContext,
) -> Result<ParamMap, ScopeError> {
    let mut params = ParamMap::new();
    params.insert(
        "mlflow_model".to_string(),
        ParamValue::Artifact(ArtifactRef::prod(MODEL_EXPORT)),
    );
    params.insert(
        "test_dataset".to_string(),
        ParamValue::Artifact(ArtifactRef::latest(TEST_DATA)),
    );
    Ok(params)
}
