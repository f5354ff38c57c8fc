//! Step selection - resolving which steps a run executes

use crate::core::config::ConfigError;
use crate::core::registry::{StepName, REGISTRY};

/// Sentinel meaning "every default step"
pub const ALL: &str = "all";

/// A parsed selection expression
///
/// Either the `all` sentinel or an explicit list of step tokens. Parsing
/// rejects unknown tokens up front, before any step has a chance to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSelection {
    All,
    Explicit(Vec<StepName>),
}

impl StepSelection {
    /// Parse a selection expression: `all` or a comma-delimited token list
    pub fn parse(expr: &str) -> Result<Self, ConfigError> {
        let expr = expr.trim();
        if expr == ALL {
            return Ok(StepSelection::All);
        }
        if expr.is_empty() {
            return Err(ConfigError::EmptySelection);
        }

        let mut steps = Vec::new();
        for token in expr.split(',') {
            let step: StepName = token.trim().parse()?;
            if !steps.contains(&step) {
                steps.push(step);
            }
        }
        Ok(StepSelection::Explicit(steps))
    }

    /// Resolve to the ordered active set
    ///
    /// Registry order always governs execution order, never the order the
    /// tokens were listed in: a later step's parameters may reference an
    /// earlier step's output artifacts.
    pub fn resolve(&self) -> Vec<StepName> {
        match self {
            StepSelection::All => StepName::default_all(),
            StepSelection::Explicit(steps) => REGISTRY
                .iter()
                .copied()
                .filter(|step| steps.contains(step))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentinel() {
        assert_eq!(StepSelection::parse("all").unwrap(), StepSelection::All);
        assert_eq!(StepSelection::parse(" all ").unwrap(), StepSelection::All);
    }

    #[test]
    fn test_parse_explicit_list() {
        let selection = StepSelection::parse("download,data_check").unwrap();
        assert_eq!(
            selection,
            StepSelection::Explicit(vec![StepName::Download, StepName::DataCheck])
        );
    }

    #[test]
    fn test_parse_trims_tokens() {
        let selection = StepSelection::parse(" download , basic_cleaning ").unwrap();
        assert_eq!(
            selection,
            StepSelection::Explicit(vec![StepName::Download, StepName::BasicCleaning])
        );
    }

    #[test]
    fn test_parse_collapses_duplicates() {
        let selection = StepSelection::parse("download,download").unwrap();
        assert_eq!(selection.resolve(), vec![StepName::Download]);
    }

    #[test]
    fn test_parse_unknown_token_fails() {
        let result = StepSelection::parse("download,deploy");
        match result {
            Err(ConfigError::UnknownStep(token)) => assert_eq!(token, "deploy"),
            other => panic!("Expected UnknownStep, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(matches!(
            StepSelection::parse(""),
            Err(ConfigError::EmptySelection)
        ));
    }

    #[test]
    fn test_resolve_all_is_default_subset() {
        let active = StepSelection::All.resolve();
        assert_eq!(active, StepName::default_all());
        assert!(!active.contains(&StepName::TestRegressionModel));
    }

    #[test]
    fn test_resolve_normalizes_to_registry_order() {
        // Listed out of order: execution order must still follow the registry
        let selection = StepSelection::parse("data_check,download").unwrap();
        assert_eq!(
            selection.resolve(),
            vec![StepName::Download, StepName::DataCheck]
        );
    }

    #[test]
    fn test_gated_step_selectable_explicitly() {
        let selection = StepSelection::parse("test_regression_model").unwrap();
        assert_eq!(selection.resolve(), vec![StepName::TestRegressionModel]);
    }
}
