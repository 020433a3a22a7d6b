//! Draft state for the create/edit user form.

use std::fmt;

use crate::domain::validation::{self, ValidationErrors};
use crate::domain::{NewUser, RoleId, User, UserId};

/// Fields of the onboarding form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    HireDate,
    Bio,
    RoleId,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::HireDate,
        FormField::Bio,
        FormField::RoleId,
    ];

    /// Wire/field name, matching the user record keys.
    pub fn key(self) -> &'static str {
        match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::HireDate => "hire_date",
            FormField::Bio => "bio",
            FormField::RoleId => "role_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::HireDate => "Hire Date",
            FormField::Bio => "Short Bio",
            FormField::RoleId => "Role",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Bio)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw text of every form field, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: String,
    pub role_id: String,
    pub bio: String,
}

impl FormState {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            hire_date: user.hire_date.clone(),
            role_id: user.role_id.to_string(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::HireDate => &self.hire_date,
            FormField::RoleId => &self.role_id,
            FormField::Bio => &self.bio,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::HireDate => &mut self.hire_date,
            FormField::RoleId => &mut self.role_id,
            FormField::Bio => &mut self.bio,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self) -> bool {
        FormField::ALL.into_iter().all(|field| self.get(field).is_empty())
    }

    /// Build the request payload: names trimmed, email trimmed and lower-cased,
    /// role id parsed, blank bio dropped.
    ///
    /// Expects a draft that already passed [`validation::validate`]; the only
    /// failure left is a role value that is not a number.
    pub fn normalize(&self) -> Result<NewUser, ValidationErrors> {
        let role_id = self.role_id.parse::<RoleId>().map_err(|_| {
            let mut errors = ValidationErrors::default();
            errors.insert(FormField::RoleId, "Role must be selected from the list.");
            errors
        })?;
        let bio = self.bio.trim();

        Ok(NewUser {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            hire_date: self.hire_date.trim().to_string(),
            role_id,
            bio: (!bio.is_empty()).then(|| bio.to_string()),
        })
    }
}

/// Whether the form creates a new user or edits an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(UserId),
}

impl FormMode {
    pub fn editing_id(self) -> Option<UserId> {
        match self {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }
}

/// The in-progress draft, its mode, and the errors of the last submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStateStore {
    state: FormState,
    mode: FormMode,
    errors: ValidationErrors,
}

impl FormStateStore {
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        self.state.set(field, value);
    }

    /// Copy `user` into the draft verbatim and switch to editing it.
    pub fn load_user(&mut self, user: &User) {
        self.state = FormState::from_user(user);
        self.mode = FormMode::Editing(user.user_id);
        self.errors = ValidationErrors::default();
    }

    /// Recompute the error map from scratch and keep it for display.
    pub fn validate(&mut self) -> &ValidationErrors {
        self.errors = validation::validate(&self.state);
        &self.errors
    }

    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ValidationErrors::default();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
