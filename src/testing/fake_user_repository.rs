use crate::domain::{ApiError, NewRole, NewUser, Role, User, UserId, UserPatch};
use crate::ports::UserRepository;
use crate::services::MemoryUserRepository;
use std::sync::{Arc, Mutex};

/// Memory-backed repository that records every call and can be told to fail.
#[derive(Clone)]
pub struct FakeUserRepository {
    inner: MemoryUserRepository,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub failure: Arc<Mutex<Option<ApiError>>>,
}

impl FakeUserRepository {
    pub fn new(roles: Vec<Role>, users: Vec<User>) -> Self {
        Self {
            inner: MemoryUserRepository::new(roles, users),
            calls: Arc::new(Mutex::new(vec![])),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Every following call returns `error`.
    pub fn fail_with(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl UserRepository for FakeUserRepository {
    fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.record("list_roles".into())?;
        self.inner.list_roles()
    }

    fn create_role(&self, role: &NewRole) -> Result<Role, ApiError> {
        self.record(format!("create_role {}", role.role_name))?;
        self.inner.create_role(role)
    }

    fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.record("list_users".into())?;
        self.inner.list_users()
    }

    fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.record(format!("create_user {}", user.email))?;
        self.inner.create_user(user)
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        self.record(format!("update_user {}", id))?;
        self.inner.update_user(id, patch)
    }

    fn delete_user(&self, id: UserId) -> Result<bool, ApiError> {
        self.record(format!("delete_user {}", id))?;
        self.inner.delete_user(id)
    }
}
