//! Core domain model: step catalog, configuration, and parameter wiring

pub mod artifact;
pub mod config;
pub mod context;
pub mod params;
pub mod plan;
pub mod registry;
pub mod scope;
pub mod selection;

pub use artifact::{ArtifactRef, ArtifactVersion};
pub use config::{ConfigError, RunConfig};
pub use context::RunContext;
pub use params::{ParamMap, ParamValue, StepInvocation, StepLocation};
pub use registry::{StepName, REGISTRY};
pub use scope::{RunScope, ScopeError};
pub use selection::StepSelection;
