//! Step invocation model - what the driver hands to the step runner

use crate::core::artifact::ArtifactRef;
use crate::core::registry::StepName;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Path(PathBuf),
    Artifact(ArtifactRef),
}

impl ParamValue {
    pub fn str(value: impl Into<String>) -> Self {
        ParamValue::Str(value.into())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Path(p) => write!(f, "{}", p.display()),
            ParamValue::Artifact(a) => write!(f, "{}", a),
        }
    }
}

/// Parameter mapping for one step call
///
/// Ordered, so identical configurations produce identical mappings run
/// after run.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Where a packaged step lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepLocation {
    /// Subdirectory of the shared components repository
    Component(&'static str),
    /// Path inside the pipeline checkout itself
    Local(&'static str),
}

impl StepLocation {
    /// The location string handed to the executor
    pub fn resolve(&self, components_repository: &str) -> String {
        match self {
            StepLocation::Component(subdir) => {
                format!("{}/{}", components_repository.trim_end_matches('/'), subdir)
            }
            StepLocation::Local(path) => (*path).to_string(),
        }
    }
}

/// Everything the runner needs to execute one step
///
/// Built fresh per step per run and discarded once the call returns; no
/// data flows between steps through the driver itself.
#[derive(Debug, Clone)]
pub struct StepInvocation {
    pub step: StepName,
    pub location: String,
    pub entry_point: String,
    pub parameters: ParamMap,
}
