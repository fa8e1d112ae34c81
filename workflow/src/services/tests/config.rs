//! Tests for environment-driven service configuration

use std::collections::HashMap;
use std::time::Duration;

use crate::error::WorkflowError;
use crate::services::config::{
    ServiceConfig, API_URL_VAR, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, REFRESH_INTERVAL_VAR,
    REQUEST_TIMEOUT_VAR,
};

fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, WorkflowError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    ServiceConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = load(&[]).unwrap();

    assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/api/v1/");
    assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    assert_eq!(config.refresh_interval, Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS));
}

#[test]
fn test_values_from_environment() {
    let config = load(&[
        (API_URL_VAR, "https://pm.example.com/api/v2"),
        (REQUEST_TIMEOUT_VAR, "15"),
        (REFRESH_INTERVAL_VAR, " 5 "),
    ])
    .unwrap();

    assert_eq!(config.api_base_url.as_str(), "https://pm.example.com/api/v2/");
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.refresh_interval, Duration::from_secs(5));
}

#[test]
fn test_invalid_values_are_configuration_errors() {
    let cases: &[(&str, &str)] = &[
        (API_URL_VAR, "not a url"),
        (API_URL_VAR, "ftp://files.example.com/"),
        (REQUEST_TIMEOUT_VAR, "soon"),
        (REQUEST_TIMEOUT_VAR, "0"),
        (REFRESH_INTERVAL_VAR, "-3"),
    ];

    for case in cases {
        let result = load(&[*case]);
        assert!(
            matches!(result, Err(WorkflowError::ConfigurationError { .. })),
            "{}={} should be rejected",
            case.0,
            case.1
        );
    }
}

#[test]
fn test_cli_overrides() {
    let config = load(&[(REQUEST_TIMEOUT_VAR, "15")])
        .unwrap()
        .with_api_url("http://10.0.0.5:9000/api/v1/")
        .unwrap()
        .with_request_timeout(Duration::from_secs(3))
        .with_refresh_interval(Duration::from_secs(1));

    assert_eq!(config.api_base_url.as_str(), "http://10.0.0.5:9000/api/v1/");
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!(config.refresh_interval, Duration::from_secs(1));
}

#[test]
fn test_env_file_loading() {
    let temp_dir = tempfile::tempdir().unwrap();
    let env_path = temp_dir.path().join(".env");
    std::fs::write(&env_path, "WORKFLOW_TEST_ONLY_URL=http://envfile.local:8123/api/v1\n").unwrap();

    dotenv::from_path(&env_path).unwrap();
    let config = ServiceConfig::from_lookup(|key| {
        let key = if key == API_URL_VAR { "WORKFLOW_TEST_ONLY_URL" } else { key };
        std::env::var(key).ok().filter(|_| key.starts_with("WORKFLOW_TEST_ONLY"))
    })
    .unwrap();

    assert_eq!(config.api_base_url.as_str(), "http://envfile.local:8123/api/v1/");
}
