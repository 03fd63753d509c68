use std::env;

use jobboard_backend::{
    config::{Config, StoreKind},
    AppState,
};

// Environment variables are process-wide, so every scenario lives in one test.
#[test]
fn store_selection_from_env() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::remove_var("BACKEND_TIMEOUT_SECS");
    env::remove_var("APPER_BASE_URL");
    env::remove_var("APPER_PROJECT_ID");
    env::remove_var("APPER_PUBLIC_KEY");

    env::set_var("RECORD_STORE", "memory");
    let config = Config::from_env().expect("memory config");
    assert_eq!(config.record_store, StoreKind::Memory);
    assert_eq!(config.backend_timeout_secs, 60);
    assert_eq!(config.notification_capacity, 100);
    assert!(AppState::from_config(&config).unwrap().has_record_store());

    env::set_var("RECORD_STORE", "apper");
    let config = Config::from_env().expect("apper config without credentials");
    assert!(config.apper.is_none());
    assert!(!AppState::from_config(&config).unwrap().has_record_store());

    env::set_var("APPER_BASE_URL", "https://api.example.com/v1");
    env::set_var("APPER_PROJECT_ID", "proj-1");
    env::set_var("APPER_PUBLIC_KEY", "pk-1");
    env::set_var("BACKEND_TIMEOUT_SECS", "5");
    let config = Config::from_env().expect("apper config");
    assert_eq!(config.backend_timeout_secs, 5);
    assert_eq!(
        config.apper.as_ref().map(|c| c.project_id.as_str()),
        Some("proj-1")
    );
    assert!(AppState::from_config(&config).unwrap().has_record_store());

    env::set_var("RECORD_STORE", "sqlite");
    assert!(Config::from_env().is_err());

    env::set_var("RECORD_STORE", "memory");
    env::set_var("BACKEND_TIMEOUT_SECS", "soon");
    assert!(Config::from_env().is_err());
}
