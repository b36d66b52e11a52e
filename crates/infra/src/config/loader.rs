//! Configuration loader
//!
//! Loads the network configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `COINFOLIO_API_BASE_URL` is missing, falls back to loading from file
//! 3. Searches multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `COINFOLIO_API_BASE_URL`: Base URL of the remote API (required)
//! - `COINFOLIO_API_TIMEOUT_SECS`: Whole-request timeout in seconds
//! - `COINFOLIO_API_CONNECT_TIMEOUT_SECS`: Connect timeout in seconds
//! - `COINFOLIO_API_USER_AGENT`: User-Agent header value
//! - `COINFOLIO_RETRY_MAX_ATTEMPTS`: Attempts per retried call
//! - `COINFOLIO_RETRY_INITIAL_DELAY_MS`: First backoff delay in milliseconds
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./coinfolio.json` or `./coinfolio.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use coinfolio_domain::NetworkConfig;
use url::Url;

use crate::errors::{InfraError, InfraResult};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "coinfolio.json", "coinfolio.toml"];
const PARENT_FILE_NAMES: [&str; 4] =
    ["../config.json", "../config.toml", "../../config.json", "../../config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If that fails, falls
/// back to loading from a config file.
///
/// # Errors
/// Returns `InfraError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Validation fails
pub fn load() -> InfraResult<NetworkConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `COINFOLIO_API_BASE_URL` is required; unset optional variables keep
/// their defaults.
///
/// # Errors
/// Returns `InfraError::Config` if the base URL is missing or a variable has
/// an invalid value.
pub fn load_from_env() -> InfraResult<NetworkConfig> {
    let defaults = NetworkConfig::default();

    let mut config = NetworkConfig {
        base_url: env_var("COINFOLIO_API_BASE_URL")?,
        timeout_secs: env_parse("COINFOLIO_API_TIMEOUT_SECS", defaults.timeout_secs)?,
        connect_timeout_secs: env_parse(
            "COINFOLIO_API_CONNECT_TIMEOUT_SECS",
            defaults.connect_timeout_secs,
        )?,
        user_agent: std::env::var("COINFOLIO_API_USER_AGENT").unwrap_or(defaults.user_agent),
        retry: defaults.retry,
    };
    config.retry.max_attempts =
        env_parse("COINFOLIO_RETRY_MAX_ATTEMPTS", config.retry.max_attempts)?;
    config.retry.initial_delay_ms =
        env_parse("COINFOLIO_RETRY_INITIAL_DELAY_MS", config.retry.initial_delay_ms)?;

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `InfraError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> InfraResult<NetworkConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(InfraError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => find_config_path().ok_or_else(|| {
            InfraError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| InfraError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Check a configuration before it is used to build clients
///
/// # Errors
/// Returns `InfraError::Config` if the base URL is not an http(s) URL or a
/// timeout is zero.
pub fn validate(config: &NetworkConfig) -> InfraResult<()> {
    validate_base_url(&config.base_url)?;

    if config.timeout_secs == 0 {
        return Err(InfraError::Config("timeout_secs must be greater than zero".into()));
    }
    if config.connect_timeout_secs == 0 {
        return Err(InfraError::Config("connect_timeout_secs must be greater than zero".into()));
    }
    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), InfraError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| InfraError::Config(format!("Invalid base URL '{base_url}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(InfraError::Config(format!("Unsupported base URL scheme: {other}"))),
    }
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> InfraResult<NetworkConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| InfraError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| InfraError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(InfraError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Search multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_path() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_paths(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_paths(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_paths(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    FILE_NAMES.iter().chain(PARENT_FILE_NAMES.iter()).map(move |name| dir.join(name))
}

/// Get required environment variable
///
/// # Errors
/// Returns `InfraError::Config` if the variable is not set.
fn env_var(key: &str) -> InfraResult<String> {
    std::env::var(key)
        .map_err(|_| InfraError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse an optional environment variable, keeping `default` when unset
fn env_parse<T>(key: &str, default: T) -> InfraResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| InfraError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
