use std::path::Path;

use cover_letter::core::ConfigManager;
use cover_letter::wizard::{configured_steps, default_steps, load_steps};

#[test]
fn bundled_steps_file_matches_built_in_form() {
    let steps = load_steps(Path::new("form_steps.toml")).unwrap();
    assert_eq!(steps, default_steps());
}

#[test]
fn missing_steps_file_is_an_error() {
    assert!(configured_steps(Some(Path::new("does/not/exist.toml"))).is_err());
    assert_eq!(configured_steps(None).unwrap().len(), 4);
}

#[test]
fn bundled_config_loads_both_environments() {
    let local = ConfigManager::load_from_file(Path::new("config.yaml"), "local").unwrap();
    assert_eq!(local.server.port, 8000);
    assert_eq!(local.frontend.api_base_url, "http://127.0.0.1:8000");
    assert_eq!(
        local.wizard.steps_file.as_deref(),
        Some(Path::new("./form_steps.toml"))
    );

    let production = ConfigManager::load_from_file(Path::new("config.yaml"), "production").unwrap();
    assert_eq!(production.server.address.to_string(), "0.0.0.0");
    assert_eq!(production.scraper.extra_boilerplate, vec!["Apply now", "Save job"]);
    assert!(production.wizard.steps_file.is_none());
}
