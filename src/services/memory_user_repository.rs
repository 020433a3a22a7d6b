use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::{
    ApiError, AppError, NewRole, NewUser, Role, RoleId, User, UserId, UserPatch,
};
use crate::ports::UserRepository;
use crate::services::embedded_assets::{SeedData, load_seed_data};

/// In-process roles/users collection used for offline sessions and tests.
///
/// Applies the same checks the server does: unique emails, existing roles,
/// and `max(id) + 1` id assignment.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    // Shared so clones handed to worker threads see the same records.
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    roles: Vec<Role>,
    users: Vec<User>,
}

impl MemoryUserRepository {
    pub fn new(roles: Vec<Role>, users: Vec<User>) -> Self {
        Self { state: Arc::new(Mutex::new(MemoryState { roles, users })) }
    }

    /// Start from the embedded seed data.
    pub fn seeded() -> Result<Self, AppError> {
        let SeedData { roles, users } = load_seed_data()?;
        debug!(roles = roles.len(), users = users.len(), "seeded offline repository");
        Ok(Self::new(roles, users))
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn next_user_id(&self) -> UserId {
        self.users.iter().map(|user| user.user_id).max().map_or(UserId::new(1), UserId::next)
    }

    fn next_role_id(&self) -> RoleId {
        self.roles.iter().map(|role| role.role_id).max().map_or(RoleId::new(1), RoleId::next)
    }

    fn ensure_role(&self, role_id: RoleId) -> Result<(), ApiError> {
        if self.roles.iter().any(|role| role.role_id == role_id) {
            Ok(())
        } else {
            Err(ApiError::rejected(400, "Invalid role_id"))
        }
    }

    fn ensure_email_free(&self, email: &str, owner: Option<UserId>) -> Result<(), ApiError> {
        let taken = self
            .users
            .iter()
            .any(|user| user.email == email && Some(user.user_id) != owner);
        if taken { Err(ApiError::rejected(400, "Email already registered")) } else { Ok(()) }
    }
}

fn user_not_found() -> ApiError {
    ApiError::rejected(404, "User not found")
}

impl UserRepository for MemoryUserRepository {
    fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        Ok(self.lock().roles.clone())
    }

    fn create_role(&self, role: &NewRole) -> Result<Role, ApiError> {
        let mut state = self.lock();
        if state.roles.iter().any(|existing| existing.role_name == role.role_name) {
            return Err(ApiError::rejected(400, "Role with this name already exists"));
        }
        let created = Role::new(state.next_role_id(), role.role_name.clone());
        state.roles.push(created.clone());
        Ok(created)
    }

    fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.lock().users.clone())
    }

    fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let mut state = self.lock();
        state.ensure_email_free(&user.email, None)?;
        state.ensure_role(user.role_id)?;

        let created = user.clone().into_user(state.next_user_id());
        state.users.push(created.clone());
        Ok(created)
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let mut state = self.lock();
        if !state.users.iter().any(|user| user.user_id == id) {
            return Err(user_not_found());
        }
        if let Some(email) = &patch.email {
            state.ensure_email_free(email, Some(id))?;
        }
        if let Some(role_id) = patch.role_id {
            state.ensure_role(role_id)?;
        }

        let user = state
            .users
            .iter_mut()
            .find(|user| user.user_id == id)
            .ok_or_else(user_not_found)?;
        user.apply(patch);
        Ok(user.clone())
    }

    fn delete_user(&self, id: UserId) -> Result<bool, ApiError> {
        let mut state = self.lock();
        let before = state.users.len();
        state.users.retain(|user| user.user_id != id);
        if state.users.len() == before {
            return Err(user_not_found());
        }
        Ok(true)
    }
}
