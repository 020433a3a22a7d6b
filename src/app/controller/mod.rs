//! Dashboard state machine.
//!
//! Intents return immediately with the [`Effect`]s they need performed; each
//! effect's outcome is fed back later through [`DashboardController::apply`].
//! Nothing here blocks or touches the network.

mod effect;
mod state;

pub use effect::{Completion, Effect};
pub use state::{DashboardState, LoadingFlags, PLACEHOLDER};

use tracing::{debug, error, info};

use crate::domain::{
    ApiError, AppError, FormField, FormMode, Role, RoleCatalog, RoleContent, RoleContentCatalog,
    RoleId, UserId, UserList, UserPatch,
};
use crate::ports::ConfirmPrompt;

/// Owns the dashboard state and every transition on it.
#[derive(Debug)]
pub struct DashboardController {
    content: RoleContentCatalog,
    state: DashboardState,
    resource_ticket: u64,
    mounted: bool,
}

impl DashboardController {
    pub fn new(content: RoleContentCatalog) -> Self {
        Self { content, state: DashboardState::default(), resource_ticket: 0, mounted: false }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Onboarding content for the selected role.
    pub fn content(&self) -> RoleContent {
        self.content.resolve(self.state.selected_role.as_ref())
    }

    /// Start the two independent startup loads.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.mounted = true;
        self.state.loading.roles = true;
        self.state.loading.users = true;
        self.state.api_error = None;
        info!("loading roles and users");
        vec![Effect::LoadRoles, Effect::LoadUsers]
    }

    /// Stop accepting completions. Requests already in flight are not aborted.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Waffle button: advance to the next role, wrapping around.
    pub fn cycle_role(&mut self) -> Option<Effect> {
        let current = self.state.selected_role.as_ref().map(|role| role.role_id);
        let next = self.state.roles.next_after(current)?.clone();
        self.select_role(Some(next))
    }

    /// Role menu: select a specific role.
    pub fn choose_role(&mut self, role_id: RoleId) -> Result<Option<Effect>, AppError> {
        let role = self.state.roles.get(role_id).cloned().ok_or(AppError::RoleUnavailable(role_id))?;
        Ok(self.select_role(Some(role)))
    }

    /// Form input. Editing the role field moves the role selection with it.
    pub fn edit_field(&mut self, field: FormField, value: impl Into<String>) -> Option<Effect> {
        let value = value.into();
        if field == FormField::RoleId {
            let role = self.state.roles.find_by_form_value(&value).cloned();
            self.state.form.edit(FormField::RoleId, value);
            return self.sync_selected_role(role);
        }
        self.state.form.edit(field, value);
        None
    }

    /// Validate and, when clean, request a create or update depending on the mode.
    pub fn submit(&mut self) -> Option<Effect> {
        if self.state.loading.is_saving() {
            debug!("submit ignored while a save is in flight");
            return None;
        }

        self.state.api_error = None;
        let errors = self.state.form.validate();
        if !errors.is_empty() {
            debug!(fields = %errors.summary(), "form failed validation");
            return None;
        }

        let draft = match self.state.form.state().normalize() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(fields = %errors.summary(), "form failed normalization");
                self.state.form.set_errors(errors);
                return None;
            }
        };

        match self.state.form.mode() {
            FormMode::Creating => {
                self.state.loading.creating = true;
                info!(email = %draft.email, "creating user");
                Some(Effect::CreateUser(draft))
            }
            FormMode::Editing(id) => {
                let patch = match self.state.users.get(id) {
                    Some(current) => UserPatch::between(current, &draft),
                    None => UserPatch::from(draft),
                };
                self.state.loading.updating = true;
                info!(%id, "updating user");
                Some(Effect::UpdateUser { id, patch })
            }
        }
    }

    /// Load a listed user into the form for editing.
    pub fn begin_edit(&mut self, id: UserId) -> Result<Option<Effect>, AppError> {
        let user = self.state.users.get(id).cloned().ok_or(AppError::UserNotFound(id))?;
        self.state.form.load_user(&user);
        self.state.api_error = None;
        self.state.scroll_to_top = true;

        let role = self.state.roles.get(user.role_id).cloned();
        Ok(self.sync_selected_role(role))
    }

    /// Ask for confirmation, then request the delete. A declined prompt changes nothing.
    pub fn request_delete(
        &mut self,
        id: UserId,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<Option<Effect>, AppError> {
        let user = self.state.users.get(id).ok_or(AppError::UserNotFound(id))?;
        let message = format!("Delete {}?", user.full_name());
        if !prompt.confirm(&message)? {
            debug!(%id, "delete declined");
            return Ok(None);
        }

        self.state.loading.deleting += 1;
        self.state.api_error = None;
        info!(%id, "deleting user");
        Ok(Some(Effect::DeleteUser(id)))
    }

    /// Drop the draft and leave edit mode.
    pub fn cancel(&mut self) {
        self.reset_form();
    }

    pub fn dismiss_error(&mut self) {
        self.state.api_error = None;
    }

    /// Whether the view should scroll back to the form. Cleared by reading.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.state.scroll_to_top)
    }

    /// Fold a finished request into the state. May ask for a follow-up effect.
    pub fn apply(&mut self, completion: Completion) -> Option<Effect> {
        if !self.mounted {
            debug!(completion = completion.name(), "dropping completion after unmount");
            return None;
        }

        match completion {
            Completion::RolesLoaded(result) => {
                self.state.loading.roles = false;
                match result {
                    Ok(roles) => {
                        debug!(count = roles.len(), "roles loaded");
                        self.state.roles = RoleCatalog::new(roles);
                        return self.resync_role_from_form();
                    }
                    Err(err) => self.fail("load roles", &err),
                }
            }
            Completion::UsersLoaded(result) => {
                self.state.loading.users = false;
                match result {
                    Ok(users) => {
                        debug!(count = users.len(), "users loaded");
                        self.state.users = UserList::new(users);
                    }
                    Err(err) => self.fail("load users", &err),
                }
            }
            Completion::UserCreated(result) => {
                self.state.loading.creating = false;
                match result {
                    Ok(user) => {
                        info!(id = %user.user_id, "user created");
                        self.state.users.append(user);
                        self.reset_form();
                    }
                    Err(err) => self.fail("save user", &err),
                }
            }
            Completion::UserUpdated { id, result } => {
                self.state.loading.updating = false;
                match result {
                    Ok(user) => {
                        info!(%id, "user updated");
                        if !self.state.users.replace(user) {
                            debug!(%id, "updated user is no longer listed");
                        }
                        self.reset_form();
                    }
                    Err(err) => self.fail("save user", &err),
                }
            }
            Completion::UserDeleted { id, result } => {
                self.state.loading.deleting = self.state.loading.deleting.saturating_sub(1);
                match result {
                    Ok(_) => {
                        info!(%id, "user deleted");
                        self.state.users.remove(id);
                        if self.state.form.mode() == FormMode::Editing(id) {
                            self.reset_form();
                        }
                    }
                    Err(err) => self.fail("delete user", &err),
                }
            }
            Completion::ResourcesResolved { ticket, resources } => {
                if ticket == self.resource_ticket {
                    self.state.resources = resources;
                } else {
                    debug!(ticket, current = self.resource_ticket, "dropping stale resources");
                }
            }
        }
        None
    }

    fn select_role(&mut self, role: Option<Role>) -> Option<Effect> {
        let value = role.as_ref().map(|role| role.role_id.to_string()).unwrap_or_default();
        self.state.form.edit(FormField::RoleId, value);
        self.sync_selected_role(role)
    }

    fn sync_selected_role(&mut self, role: Option<Role>) -> Option<Effect> {
        self.resource_ticket += 1;
        self.state.resources.clear();
        self.state.selected_role = role;
        self.state.selected_role.as_ref().map(|role| Effect::LookupResources {
            ticket: self.resource_ticket,
            role_name: role.role_name.clone(),
        })
    }

    /// Roles arrived after the form already named one.
    fn resync_role_from_form(&mut self) -> Option<Effect> {
        let role = self.state.roles.find_by_form_value(&self.state.form.state().role_id).cloned();
        if role == self.state.selected_role {
            return None;
        }
        self.sync_selected_role(role)
    }

    fn reset_form(&mut self) {
        self.state.form.reset();
        // The role selection mirrors the form's role field.
        self.resource_ticket += 1;
        self.state.resources.clear();
        self.state.selected_role = None;
    }

    fn fail(&mut self, action: &str, err: &ApiError) {
        error!(action, error = %err, "request failed");
        self.state.api_error = Some(err.banner(action));
    }
}
