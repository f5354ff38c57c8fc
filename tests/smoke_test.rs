//! Basic sanity checks for the public API

use mlpipe::{RunConfig, StepName, StepSelection, REGISTRY};

#[test]
fn test_registry_and_selection_sanity() {
    assert_eq!(REGISTRY.len(), 6);
    assert_eq!(StepName::default_all().len(), 5);

    let selection = StepSelection::parse("all").unwrap();
    assert_eq!(selection.resolve(), StepName::default_all());
}

#[test]
fn test_bundled_config_is_valid() {
    let config = RunConfig::from_file("config.yaml").unwrap();
    assert_eq!(
        config.selection().unwrap().resolve(),
        StepName::default_all()
    );
}
