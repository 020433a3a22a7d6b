//! waffle: terminal onboarding dashboard for the Waffle Suite roles/users API.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{UserFields, add_user, content, delete_user, edit_user, roles, users};
pub use app::config::ConfigOverrides;
pub use app::{AppContext, DashboardController, Runtime, Session};
pub use domain::{ApiError, AppError};
