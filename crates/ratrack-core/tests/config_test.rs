//! Tests for the RA Track configuration system.

use std::sync::Mutex;

use ratrack_core::config::{CliOverrides, RatrackConfig};
use ratrack_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all RATRACK_ env vars and point HOME at an empty directory so a
/// developer's own config cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "RATRACK_BACKEND_URL",
        "RATRACK_BACKEND_TIMEOUT_SECS",
        "RATRACK_BACKEND_MAX_RETRIES",
        "RATRACK_DB_PATH",
        "RATRACK_LAB_COLLECTIONS",
        "RATRACK_LOG_LEVEL",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn empty_toml_yields_all_defaults() {
    let config = RatrackConfig::from_toml("").unwrap();

    assert_eq!(config.backend.base_url, "http://localhost:5000");
    assert_eq!(config.backend.compare_path, "/api/compare-ra-risk");
    assert_eq!(config.backend.timeout_secs, 30);
    assert_eq!(config.backend.max_retries, 2);
    assert_eq!(config.storage.db_path, "ratrack.db");
    assert_eq!(
        config.labs.collections,
        vec!["LabInformation", "labInformation", "userLabs", "labResults"]
    );
    assert_eq!(config.labs.user_field, "userId");
    assert_eq!(config.labs.created_at_field, "createdAt");
    assert_eq!(config.session.user_key, "currentUser");
    assert_eq!(config.session.admin_collection, "adminUsers");
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = RatrackConfig::from_toml(
        r#"
[backend]
base_url = "https://scoring.example"

[labs]
collections = ["labResults"]
"#,
    )
    .unwrap();
    assert_eq!(config.backend.base_url, "https://scoring.example");
    assert_eq!(config.backend.timeout_secs, 30);
    assert_eq!(config.labs.collections, vec!["labResults"]);
    assert_eq!(config.labs.user_field, "userId");
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = RatrackConfig::from_toml("[backend\nbase_url = 1").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_bad_values() {
    let mut config = RatrackConfig::default();
    config.backend.base_url = "ftp://nope".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "backend.base_url"
    ));

    let mut config = RatrackConfig::default();
    config.backend.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = RatrackConfig::default();
    config.labs.collections = vec![" ".to_string()];
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "labs.collections"
    ));
}

#[test]
fn layered_resolution_cli_over_env_over_project_over_user() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".ratrack")).unwrap();
    std::fs::write(
        home.path().join(".ratrack").join("config.toml"),
        r#"
[backend]
base_url = "http://user-level:1"
timeout_secs = 11

[storage]
db_path = "user.db"
"#,
    )
    .unwrap();

    let project = tempfile::TempDir::new().unwrap();
    std::fs::write(
        project.path().join("ratrack.toml"),
        r#"
[backend]
base_url = "http://project-level:2"
"#,
    )
    .unwrap();

    // Project beats user, untouched user keys survive.
    let config = RatrackConfig::load(project.path(), None).unwrap();
    assert_eq!(config.backend.base_url, "http://project-level:2");
    assert_eq!(config.backend.timeout_secs, 11);
    assert_eq!(config.storage.db_path, "user.db");

    // Env beats project.
    std::env::set_var("RATRACK_BACKEND_URL", "http://env-level:3");
    std::env::set_var("RATRACK_LAB_COLLECTIONS", "a, b,,");
    let config = RatrackConfig::load(project.path(), None).unwrap();
    assert_eq!(config.backend.base_url, "http://env-level:3");
    assert_eq!(config.labs.collections, vec!["a", "b"]);

    // CLI beats env.
    let cli = CliOverrides {
        backend_url: Some("http://cli-level:4".to_string()),
        db_path: Some("cli.db".to_string()),
        ..Default::default()
    };
    let config = RatrackConfig::load(project.path(), Some(&cli)).unwrap();
    assert_eq!(config.backend.base_url, "http://cli-level:4");
    assert_eq!(config.storage.db_path, "cli.db");

    isolate_env(home.path());
}

#[test]
fn explicit_config_path_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let cli = CliOverrides {
        config_path: Some(home.path().join("missing.toml")),
        ..Default::default()
    };
    let err = RatrackConfig::load(home.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn load_validates_the_final_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    std::fs::write(
        home.path().join("ratrack.toml"),
        "[backend]\ntimeout_secs = 0\n",
    )
    .unwrap();
    let err = RatrackConfig::load(home.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn to_toml_round_trips_through_from_toml() {
    let mut config = RatrackConfig::default();
    config.backend.max_retries = 7;
    config.labs.collections = vec!["userLabs".to_string()];
    let text = config.to_toml().unwrap();
    assert_eq!(RatrackConfig::from_toml(&text).unwrap(), config);
}
