//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. The loader probes for a config file (JSON or TOML); with none found,
//!    built-in defaults apply
//! 2. Every `HOUSEWATCH_*` variable that is set overrides the matching field
//!
//! ## Environment Variables
//! - `HOUSEWATCH_API_URL`: Base URL of the houses API (default `DEFAULT_API_BASE_URL`)
//! - `HOUSEWATCH_ANALYTICS_ENABLED`: Whether analytics are enabled (true/false)
//! - `HOUSEWATCH_ANALYTICS_PROVIDER`: `noop`, `console` or `remote`
//! - `HOUSEWATCH_ENV`: `development` or `production`
//! - `HOUSEWATCH_ANALYTICS_API_KEY`: Ingestion key for the remote provider
//! - `HOUSEWATCH_ANALYTICS_SERVER_URL`: Ingestion endpoint
//! - `HOUSEWATCH_ANALYTICS_FLUSH_SIZE`: Queue length that triggers a flush
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./housewatch.json` or `./housewatch.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use housewatch_domain::{AppConfig, Environment, HouseWatchError, ProviderKind, Result};

use crate::errors::InfraError;

pub const ENV_API_URL: &str = "HOUSEWATCH_API_URL";
pub const ENV_ANALYTICS_ENABLED: &str = "HOUSEWATCH_ANALYTICS_ENABLED";
pub const ENV_ANALYTICS_PROVIDER: &str = "HOUSEWATCH_ANALYTICS_PROVIDER";
pub const ENV_ENVIRONMENT: &str = "HOUSEWATCH_ENV";
pub const ENV_ANALYTICS_API_KEY: &str = "HOUSEWATCH_ANALYTICS_API_KEY";
pub const ENV_ANALYTICS_SERVER_URL: &str = "HOUSEWATCH_ANALYTICS_SERVER_URL";
pub const ENV_ANALYTICS_FLUSH_SIZE: &str = "HOUSEWATCH_ANALYTICS_FLUSH_SIZE";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["housewatch.json", "housewatch.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `HouseWatchError::Config` if an environment value is invalid or
/// a config file exists but cannot be parsed.
pub fn load() -> Result<AppConfig> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No configuration file found, using defaults");
            AppConfig::default()
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from environment variables alone
///
/// Unset variables keep their defaults.
///
/// # Errors
/// Returns `HouseWatchError::Config` if a value does not parse.
pub fn load_from_env() -> Result<AppConfig> {
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Overwrite every field whose environment variable is set.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    let mut applied = 0usize;

    if let Some(url) = optional_env(ENV_API_URL) {
        applied += 1;
        config.api_base_url = url;
    }
    if let Some(enabled) = env_bool(ENV_ANALYTICS_ENABLED)? {
        applied += 1;
        config.enable_analytics = enabled;
    }

    let analytics = &mut config.analytics;
    if let Some(value) = optional_env(ENV_ANALYTICS_PROVIDER) {
        applied += 1;
        analytics.provider = Some(value.parse::<ProviderKind>().map_err(|e| {
            HouseWatchError::Config(format!("Invalid {ENV_ANALYTICS_PROVIDER}: {e}"))
        })?);
    }
    if let Some(value) = optional_env(ENV_ENVIRONMENT) {
        applied += 1;
        analytics.environment = value
            .parse::<Environment>()
            .map_err(|e| HouseWatchError::Config(format!("Invalid {ENV_ENVIRONMENT}: {e}")))?;
    }
    if let Some(key) = optional_env(ENV_ANALYTICS_API_KEY) {
        applied += 1;
        analytics.api_key = Some(key);
    }
    if let Some(url) = optional_env(ENV_ANALYTICS_SERVER_URL) {
        applied += 1;
        analytics.server_url = url;
    }
    if let Some(value) = optional_env(ENV_ANALYTICS_FLUSH_SIZE) {
        applied += 1;
        analytics.flush_queue_size =
            value.parse::<usize>().ok().filter(|size| *size > 0).ok_or_else(|| {
                HouseWatchError::Config(format!(
                    "Invalid {ENV_ANALYTICS_FLUSH_SIZE}: expected a positive integer, got {value:?}"
                ))
            })?;
    }

    if applied > 0 {
        tracing::info!(count = applied, "Applied configuration from environment variables");
    }
    Ok(())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// from the extension; missing fields take their defaults.
///
/// # Errors
/// Returns `HouseWatchError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HouseWatchError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HouseWatchError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HouseWatchError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(HouseWatchError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Non-empty environment variable, trimmed.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset or blank yields `None`; anything else is a config error.
fn env_bool(key: &str) -> Result<Option<bool>> {
    let Some(value) = optional_env(key) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(HouseWatchError::Config(format!(
            "Invalid {key}: expected a boolean, got {value:?}"
        ))),
    }
}
