//! Multi-source config loading.
//!
//! Priority, highest first: CLI flags (applied by the caller), environment
//! overrides, the file named by `--config` or `BIBLIOTOOL_CONFIG`, the
//! platform config file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use super::schema::BiblioConfig;
use crate::error::{BiblioError, Result};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BIBLIOTOOL_CONFIG";
/// Env override for `selection.max_tools_per_request`.
pub const MAX_TOOLS_ENV: &str = "BIBLIOTOOL_MAX_TOOLS";
/// Env override for `read_only`.
pub const READ_ONLY_ENV: &str = "BIBLIOTOOL_READ_ONLY";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "bibliotool.yaml";

/// Platform config file location, e.g. `~/.config/bibliotool/bibliotool.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bibliotool")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read and parse a single YAML config file.
pub fn load_config_file(path: &Path) -> Result<BiblioConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        BiblioError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    let config: BiblioConfig = serde_yaml::from_str(&contents)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the effective config from file and process environment.
///
/// An explicit path (argument or `BIBLIOTOOL_CONFIG`) must exist; the
/// platform default file is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<BiblioConfig> {
    load_config_with(explicit, default_config_path(), |key| std::env::var(key).ok())
}

/// Inner implementation with injectable default path and env lookup (for testing).
fn load_config_with(
    explicit: Option<&Path>,
    default_path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<BiblioConfig> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));

    let mut config = match (explicit, default_path) {
        (Some(path), _) => load_config_file(&path)?,
        (None, Some(path)) if path.is_file() => load_config_file(&path)?,
        _ => {
            tracing::debug!("No config file found, using defaults");
            BiblioConfig::default()
        }
    };

    apply_env_overrides(&mut config, env)?;
    Ok(config)
}

/// Apply `BIBLIOTOOL_*` overrides on top of a loaded config.
pub fn apply_env_overrides(
    config: &mut BiblioConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(raw) = env(MAX_TOOLS_ENV) {
        config.selection.max_tools_per_request = raw.trim().parse().map_err(|_| {
            BiblioError::Config(format!(
                "{MAX_TOOLS_ENV} must be a non-negative integer, got {raw:?}"
            ))
        })?;
    }
    if let Some(raw) = env(READ_ONLY_ENV) {
        config.read_only = parse_bool(&raw).ok_or_else(|| {
            BiblioError::Config(format!("{READ_ONLY_ENV} must be a boolean, got {raw:?}"))
        })?;
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
