//! Integration tests for configuration loading
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building clients from it.

use std::io::Write;

use coinfolio_infra::{config, ApiClient, InfraError};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_toml_file_builds_client() {
    let path = write_config(
        r#"
base_url = "https://pro-api.coingecko.com/api/v3/"
timeout_secs = 12
user_agent = "coinfolio-integration"

[retry]
max_attempts = 2
initial_delay_ms = 500
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");
    assert_eq!(config.timeout_secs, 12);
    assert_eq!(config.user_agent, "coinfolio-integration");
    assert_eq!(config.retry.max_attempts, 2);

    let client = ApiClient::new(&config).expect("client from loaded config");
    assert_eq!(client.base_url(), "https://pro-api.coingecko.com/api/v3");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_json_file_with_defaults() {
    let path = write_config(r#"{ "base_url": "http://localhost:4000" }"#, "json");

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load JSON config");
    assert_eq!(config.base_url, "http://localhost:4000");
    assert_eq!(config.timeout_secs, coinfolio_domain::DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.connect_timeout_secs, coinfolio_domain::DEFAULT_CONNECT_TIMEOUT_SECS);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_zero_timeout_is_rejected() {
    let path = write_config(r#"{ "base_url": "http://localhost:4000", "timeout_secs": 0 }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(InfraError::Config(_))));

    std::fs::remove_file(path).ok();
}
