//! REST roles/users client implementation using reqwest.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ApiConfig, ApiError, AppError, NewRole, NewUser, Role, User, UserId, UserPatch,
};
use crate::ports::UserRepository;

/// HTTP client for the roles/users API.
#[derive(Debug, Clone)]
pub struct HttpUserRepository {
    base_url: Url,
    client: Client,
}

impl HttpUserRepository {
    /// Create a new client against `config.base_url`.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        // `Url::join` replaces the last segment unless the base ends in a slash.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, call: Call, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::fetch(call.action(), format!("invalid endpoint '{path}': {e}")))
    }

    fn send(&self, call: Call, request: RequestBuilder) -> Result<reqwest::blocking::Response, ApiError> {
        debug!(action = call.action(), "sending request");
        let response = request.send().map_err(|e| {
            warn!(action = call.action(), error = %e, "request failed");
            ApiError::fetch(call.action(), e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(action = call.action(), status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let error = failure_from_body(call, status, &body);
        warn!(action = call.action(), status = status.as_u16(), error = %error, "request rejected");
        Err(error)
    }

    fn execute<T: DeserializeOwned>(&self, call: Call, request: RequestBuilder) -> Result<T, ApiError> {
        self.send(call, request)?
            .json::<T>()
            .map_err(|e| ApiError::Decode(format!("{}: {}", call.action(), e)))
    }
}

impl UserRepository for HttpUserRepository {
    fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        let url = self.endpoint(Call::ListRoles, "roles/")?;
        self.execute(Call::ListRoles, self.client.get(url))
    }

    fn create_role(&self, role: &NewRole) -> Result<Role, ApiError> {
        let url = self.endpoint(Call::CreateRole, "roles/")?;
        self.execute(Call::CreateRole, self.client.post(url).json(role))
    }

    fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint(Call::ListUsers, "users/")?;
        self.execute(Call::ListUsers, self.client.get(url))
    }

    fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let url = self.endpoint(Call::CreateUser, "users/")?;
        self.execute(Call::CreateUser, self.client.post(url).json(user))
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let url = self.endpoint(Call::UpdateUser, &format!("users/{id}"))?;
        self.execute(Call::UpdateUser, self.client.patch(url).json(patch))
    }

    fn delete_user(&self, id: UserId) -> Result<bool, ApiError> {
        let url = self.endpoint(Call::DeleteUser, &format!("users/{id}"))?;
        // 200 carries a confirmation message, 204 nothing; neither is read.
        self.send(Call::DeleteUser, self.client.delete(url)).map(|_| true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    ListRoles,
    CreateRole,
    ListUsers,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

/// How much of an error body is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailPolicy {
    /// Any failure is a generic fetch error.
    Ignore,
    /// Surface `detail` when present.
    Detail,
    /// Surface `detail`, or the whole body when it has none.
    DetailOrBody,
}

impl Call {
    fn action(self) -> &'static str {
        match self {
            Call::ListRoles => "load roles",
            Call::CreateRole => "create role",
            Call::ListUsers => "load users",
            Call::CreateUser => "create user",
            Call::UpdateUser => "update user",
            Call::DeleteUser => "delete user",
        }
    }

    fn detail_policy(self) -> DetailPolicy {
        match self {
            Call::ListRoles | Call::ListUsers => DetailPolicy::Ignore,
            Call::CreateRole | Call::DeleteUser => DetailPolicy::Detail,
            Call::CreateUser | Call::UpdateUser => DetailPolicy::DetailOrBody,
        }
    }
}

fn failure_from_body(call: Call, status: StatusCode, body: &str) -> ApiError {
    let generic = || ApiError::fetch(call.action(), format!("HTTP {}", status.as_u16()));
    let policy = call.detail_policy();
    if policy == DetailPolicy::Ignore {
        return generic();
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return generic();
    };

    match value.get("detail") {
        Some(Value::String(detail)) => ApiError::rejected(status.as_u16(), detail.clone()),
        Some(Value::Null) | None => {
            if policy == DetailPolicy::DetailOrBody && !value.is_null() {
                ApiError::rejected(status.as_u16(), value.to_string())
            } else {
                generic()
            }
        }
        // Structured detail (e.g. a list of field errors) is shown serialized.
        Some(detail) => ApiError::rejected(status.as_u16(), detail.to_string()),
    }
}
