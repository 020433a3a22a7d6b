use std::sync::Arc;

use tracing::info;

use crate::app::controller::DashboardController;
use crate::app::runtime::Runtime;
use crate::domain::{AppError, DashboardConfig, DataSource, RoleContentCatalog};
use crate::ports::UserRepository;
use crate::services::{HttpUserRepository, MemoryUserRepository, load_role_content_catalog};

/// Application context holding dependencies for a dashboard session.
#[derive(Clone)]
pub struct AppContext {
    config: DashboardConfig,
    repository: Arc<dyn UserRepository>,
    content: RoleContentCatalog,
}

impl AppContext {
    /// Create a context from explicit parts.
    pub fn new(
        config: DashboardConfig,
        repository: Arc<dyn UserRepository>,
        content: RoleContentCatalog,
    ) -> Self {
        Self { config, repository, content }
    }

    /// Wire the repository selected by `config.ui.source` and the embedded content.
    pub fn from_config(config: DashboardConfig) -> Result<Self, AppError> {
        let repository: Arc<dyn UserRepository> = match config.ui.source {
            DataSource::Http => {
                info!(base_url = %config.api.base_url, "using HTTP repository");
                Arc::new(HttpUserRepository::new(&config.api)?)
            }
            DataSource::Memory => {
                info!("using offline repository");
                Arc::new(MemoryUserRepository::seeded()?)
            }
        };
        let content = load_role_content_catalog()?;
        Ok(Self::new(config, repository, content))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn repository(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.repository)
    }

    pub fn content(&self) -> &RoleContentCatalog {
        &self.content
    }

    /// A fresh, unmounted controller.
    pub fn controller(&self) -> DashboardController {
        DashboardController::new(self.content.clone())
    }

    pub fn runtime(&self) -> Runtime {
        Runtime::new(self.repository(), self.config.ui.resource_lookup_delay())
    }
}
