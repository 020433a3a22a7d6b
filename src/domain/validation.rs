use std::collections::BTreeMap;

use crate::domain::{FormField, FormState};

const MIN_NAME_CHARS: usize = 2;
const MIN_EMAIL_CHARS: usize = 6;
const MAX_BIO_CHARS: usize = 500;

/// Field-level messages from the last validation pass. Empty means submittable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub(crate) fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// One line per failing field, for non-interactive output.
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, message)| format!("{}: {}", field.key(), message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check every field of `state`. Rules are independent; all of them run.
pub fn validate(state: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if state.first_name.trim().chars().count() < MIN_NAME_CHARS {
        errors.insert(FormField::FirstName, "First name required (min 2 characters).");
    }
    if state.last_name.trim().chars().count() < MIN_NAME_CHARS {
        errors.insert(FormField::LastName, "Last name required (min 2 characters).");
    }

    // Length counts the trimmed value; padding never satisfies the minimum.
    let email = state.email.trim();
    if email.chars().count() < MIN_EMAIL_CHARS {
        errors.insert(FormField::Email, "Email required (min 6 characters).");
    } else if !email.contains('@') {
        errors.insert(FormField::Email, "Invalid email format.");
    }

    let hire_date = state.hire_date.trim();
    if hire_date.is_empty() {
        errors.insert(FormField::HireDate, "Hire date required.");
    } else if !is_iso_date_shape(hire_date) {
        errors.insert(FormField::HireDate, "Hire date must be in YYYY-MM-DD format.");
    }

    if state.role_id.trim().is_empty() {
        errors.insert(FormField::RoleId, "Role required.");
    }

    if state.bio.chars().count() > MAX_BIO_CHARS {
        errors.insert(FormField::Bio, "Bio must be 500 characters or less.");
    }

    errors
}

/// `DDDD-DD-DD` with ASCII digits. Calendar validity is not checked.
fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
