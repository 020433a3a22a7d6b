//! Roles and users collection port.

use crate::domain::{ApiError, NewRole, NewUser, Role, User, UserId, UserPatch};

/// Remote roles/users collection.
///
/// Every call is a single round trip: no retries, no caching.
pub trait UserRepository: Send + Sync {
    /// `GET /roles/`.
    fn list_roles(&self) -> Result<Vec<Role>, ApiError>;

    /// `POST /roles/`.
    fn create_role(&self, role: &NewRole) -> Result<Role, ApiError>;

    /// `GET /users/`.
    fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `POST /users/`.
    fn create_user(&self, user: &NewUser) -> Result<User, ApiError>;

    /// `PATCH /users/{id}` with only the fields present in `patch`.
    fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError>;

    /// `DELETE /users/{id}`. Returns `true` once the server confirmed removal.
    fn delete_user(&self, id: UserId) -> Result<bool, ApiError>;
}
