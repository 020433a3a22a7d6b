use serde::{Deserialize, Serialize};

use crate::domain::{RoleId, UserId};

/// A user record as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `YYYY-MM-DD`, stored as text.
    pub hire_date: String,
    pub role_id: RoleId,
    #[serde(default)]
    pub bio: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(value) = &patch.first_name {
            self.first_name = value.clone();
        }
        if let Some(value) = &patch.last_name {
            self.last_name = value.clone();
        }
        if let Some(value) = &patch.email {
            self.email = value.clone();
        }
        if let Some(value) = &patch.hire_date {
            self.hire_date = value.clone();
        }
        if let Some(value) = patch.role_id {
            self.role_id = value;
        }
        if let Some(value) = &patch.bio {
            self.bio = value.clone();
        }
    }
}

/// Payload for `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: String,
    pub role_id: RoleId,
    pub bio: Option<String>,
}

impl NewUser {
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            hire_date: self.hire_date,
            role_id: self.role_id,
            bio: self.bio,
        }
    }
}

/// Payload for `PATCH /users/{id}`. Absent fields are left untouched by the server;
/// `bio: Some(None)` is sent as an explicit `null` to clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub bio: Option<Option<String>>,
}

impl UserPatch {
    /// Only the fields where `draft` differs from `current`.
    pub fn between(current: &User, draft: &NewUser) -> Self {
        fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
            (old != new).then(|| new.clone())
        }

        Self {
            first_name: changed(&current.first_name, &draft.first_name),
            last_name: changed(&current.last_name, &draft.last_name),
            email: changed(&current.email, &draft.email),
            hire_date: changed(&current.hire_date, &draft.hire_date),
            role_id: changed(&current.role_id, &draft.role_id),
            bio: changed(&current.bio, &draft.bio),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.hire_date.is_none()
            && self.role_id.is_none()
            && self.bio.is_none()
    }
}

impl From<NewUser> for UserPatch {
    fn from(draft: NewUser) -> Self {
        Self {
            first_name: Some(draft.first_name),
            last_name: Some(draft.last_name),
            email: Some(draft.email),
            hire_date: Some(draft.hire_date),
            role_id: Some(draft.role_id),
            bio: Some(draft.bio),
        }
    }
}

mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

/// Client-side user list. Order is arrival order; every mutation is keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserList {
    users: Vec<User>,
}

impl UserList {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.user_id == id)
    }

    pub fn last(&self) -> Option<&User> {
        self.users.last()
    }

    pub fn append(&mut self, user: User) {
        self.users.push(user);
    }

    /// Replace the entry with the same id. Returns `false` when no entry matched.
    pub fn replace(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|existing| existing.user_id == user.user_id) {
            Some(existing) => {
                *existing = user;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with `id`. Returns `false` when no entry matched.
    pub fn remove(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.user_id != id);
        self.users.len() != before
    }

    pub fn count_with_role(&self, role_id: RoleId) -> usize {
        self.users.iter().filter(|user| user.role_id == role_id).count()
    }
}
