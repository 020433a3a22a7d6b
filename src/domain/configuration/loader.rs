//! Dashboard configuration parsing.

use url::Url;

use crate::domain::{AppError, DashboardConfig};

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<DashboardConfig, AppError> {
    let config: DashboardConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Parse a base URL given on the command line or in the environment.
pub fn parse_base_url(value: &str) -> Result<Url, AppError> {
    Url::parse(value.trim()).map_err(|err| AppError::ParseError {
        what: format!("API URL '{}'", value.trim()),
        details: err.to_string(),
    })
}
