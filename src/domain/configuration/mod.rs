pub mod dashboard_config;
pub mod loader;

pub use dashboard_config::{ApiConfig, DashboardConfig, DataSource, UiConfig};
pub use loader::{parse_base_url, parse_config_content};
