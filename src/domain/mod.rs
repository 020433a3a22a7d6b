pub mod configuration;
pub mod content;
pub mod error;
pub mod form;
pub mod identities;
pub mod role;
pub mod user;
pub mod validation;

pub use configuration::{ApiConfig, DashboardConfig, DataSource, UiConfig};
pub use content::{Resource, RoleContent, RoleContentCatalog, form_resources};
pub use error::{ApiError, AppError};
pub use form::{FormField, FormMode, FormState, FormStateStore};
pub use identities::{RoleId, UserId};
pub use role::{NewRole, Role, RoleCatalog};
pub use user::{NewUser, User, UserList, UserPatch};
pub use validation::{ValidationErrors, validate};
