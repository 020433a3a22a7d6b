use serde::{Deserialize, Serialize};

use crate::domain::RoleId;

/// A job function used to tailor onboarding content and categorize users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: RoleId,
    pub role_name: String,
}

impl Role {
    pub fn new(role_id: RoleId, role_name: impl Into<String>) -> Self {
        Self { role_id, role_name: role_name.into() }
    }
}

/// Payload for `POST /roles/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub role_name: String,
}

/// Roles as fetched for the session, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn as_slice(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.role_id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Role> {
        let name = name.trim();
        self.roles.iter().find(|role| role.role_name.eq_ignore_ascii_case(name))
    }

    /// Match the raw value of the form's role field, which holds the id as text.
    pub fn find_by_form_value(&self, value: &str) -> Option<&Role> {
        value.parse::<RoleId>().ok().and_then(|id| self.get(id))
    }

    /// Role after `current` in catalog order, wrapping around. Starts at the
    /// first role when nothing (or an unknown role) is selected.
    pub fn next_after(&self, current: Option<RoleId>) -> Option<&Role> {
        if self.roles.is_empty() {
            return None;
        }
        let next_index = current
            .and_then(|id| self.roles.iter().position(|role| role.role_id == id))
            .map_or(0, |index| (index + 1) % self.roles.len());
        self.roles.get(next_index)
    }

    /// Display name for a role id, or `None` for a dangling reference.
    pub fn name_of(&self, id: RoleId) -> Option<&str> {
        self.get(id).map(|role| role.role_name.as_str())
    }
}
