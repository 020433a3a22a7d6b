//! Dashboard configuration resolution from flags, environment, and `waffle.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::configuration::{parse_base_url, parse_config_content};
use crate::domain::{AppError, DashboardConfig, DataSource};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "WAFFLE_CONFIG";
/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "WAFFLE_API_URL";
/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "waffle.toml";

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub offline: bool,
}

/// Which file to read, if any: the flag, then the environment, then `./waffle.toml`.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let local = cwd.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Load the effective configuration for this invocation.
pub fn load_config(overrides: &ConfigOverrides, cwd: &Path) -> Result<DashboardConfig, AppError> {
    let mut config = match resolve_config_path(overrides.config_path.as_deref(), cwd) {
        Some(path) => {
            debug!(path = %path.display(), "reading config");
            let content = fs::read_to_string(&path).map_err(|err| {
                AppError::Configuration(format!("Failed to read {}: {}", path.display(), err))
            })?;
            parse_config_content(&content)?
        }
        None => DashboardConfig::default(),
    };

    let api_url = overrides
        .api_url
        .clone()
        .or_else(|| env::var(API_URL_ENV).ok().filter(|value| !value.trim().is_empty()));
    if let Some(value) = api_url {
        config.api.base_url = parse_base_url(&value)?;
    }
    if overrides.offline {
        config.ui.source = DataSource::Memory;
    }

    config.validate()?;
    Ok(config)
}
