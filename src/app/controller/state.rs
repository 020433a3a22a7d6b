use crate::domain::{
    FormMode, FormStateStore, Resource, Role, RoleCatalog, User, UserList,
};

/// Placeholder for a missing role or bio.
pub const PLACEHOLDER: &str = "—";

/// In-flight request markers. Deletes may overlap, so they are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub roles: bool,
    pub users: bool,
    pub creating: bool,
    pub updating: bool,
    pub deleting: usize,
}

impl LoadingFlags {
    /// A create or update is pending; submitting again is refused.
    pub fn is_saving(&self) -> bool {
        self.creating || self.updating
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting > 0
    }
}

/// Everything the dashboard view renders. Owned and mutated only by
/// [`DashboardController`](super::DashboardController).
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub(super) roles: RoleCatalog,
    pub(super) users: UserList,
    pub(super) selected_role: Option<Role>,
    pub(super) form: FormStateStore,
    pub(super) loading: LoadingFlags,
    pub(super) api_error: Option<String>,
    pub(super) resources: Vec<Resource>,
    pub(super) scroll_to_top: bool,
}

impl DashboardState {
    pub fn roles(&self) -> &RoleCatalog {
        &self.roles
    }

    pub fn users(&self) -> &UserList {
        &self.users
    }

    pub fn selected_role(&self) -> Option<&Role> {
        self.selected_role.as_ref()
    }

    pub fn form(&self) -> &FormStateStore {
        &self.form
    }

    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    /// Banner text of the last failed request, if not yet dismissed.
    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    /// Quick links for the selected role, shown under the form.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn editing_user(&self) -> Option<&User> {
        self.form.mode().editing_id().and_then(|id| self.users.get(id))
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading.creating {
            "Creating User..."
        } else if self.loading.updating {
            "Updating User..."
        } else {
            match self.form.mode() {
                FormMode::Creating => "Add User",
                FormMode::Editing(_) => "Update User",
            }
        }
    }

    /// First name of the most recently listed user.
    pub fn welcome_name(&self) -> Option<&str> {
        self.users.last().map(|user| user.first_name.as_str())
    }

    /// Role name for `user`, or the placeholder for a dangling reference.
    pub fn role_label<'a>(&'a self, user: &User) -> &'a str {
        self.roles.name_of(user.role_id).unwrap_or(PLACEHOLDER)
    }
}
