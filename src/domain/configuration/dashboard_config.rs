//! Dashboard configuration domain models.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `waffle.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// REST API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Dashboard behavior.
    #[serde(default)]
    pub ui: UiConfig,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.api.validate()?;
        Ok(())
    }
}

/// REST API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL the `/roles/` and `/users/` paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: default_timeout() }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(AppError::InvalidConfig(format!(
                "base_url must use http or https, got '{}'",
                self.base_url.scheme()
            )));
        }
        if self.base_url.cannot_be_a_base() {
            return Err(AppError::InvalidConfig(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the dashboard reads and writes records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// The REST API at `api.base_url`.
    #[default]
    Http,
    /// Seeded in-process collection; nothing leaves the machine.
    Memory,
}

/// Dashboard behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Delay before the form's role resources appear.
    #[serde(default = "default_resource_lookup_delay_ms")]
    pub resource_lookup_delay_ms: u64,
    /// Record source.
    #[serde(default)]
    pub source: DataSource,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            resource_lookup_delay_ms: default_resource_lookup_delay_ms(),
            source: DataSource::default(),
        }
    }
}

impl UiConfig {
    pub fn resource_lookup_delay(&self) -> Duration {
        Duration::from_millis(self.resource_lookup_delay_ms)
    }
}

fn default_base_url() -> Url {
    Url::parse("http://127.0.0.1:8000/").expect("Default base URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_resource_lookup_delay_ms() -> u64 {
    200
}
