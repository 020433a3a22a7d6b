use crate::domain::{ApiError, NewUser, Resource, Role, User, UserId, UserPatch};

/// Work requested by a controller transition. Performed off the controller by
/// the [`Runtime`](crate::app::Runtime); the outcome comes back as a [`Completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadRoles,
    LoadUsers,
    CreateUser(NewUser),
    UpdateUser { id: UserId, patch: UserPatch },
    DeleteUser(UserId),
    /// Resolve the form's quick links for `role_name`. `ticket` identifies the
    /// selection that asked, so late answers for an older selection are dropped.
    LookupResources { ticket: u64, role_name: String },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::LoadRoles => "load_roles",
            Effect::LoadUsers => "load_users",
            Effect::CreateUser(_) => "create_user",
            Effect::UpdateUser { .. } => "update_user",
            Effect::DeleteUser(_) => "delete_user",
            Effect::LookupResources { .. } => "lookup_resources",
        }
    }
}

/// Outcome of an [`Effect`], applied with
/// [`DashboardController::apply`](super::DashboardController::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    RolesLoaded(Result<Vec<Role>, ApiError>),
    UsersLoaded(Result<Vec<User>, ApiError>),
    UserCreated(Result<User, ApiError>),
    UserUpdated { id: UserId, result: Result<User, ApiError> },
    UserDeleted { id: UserId, result: Result<bool, ApiError> },
    ResourcesResolved { ticket: u64, resources: Vec<Resource> },
}

impl Completion {
    pub fn name(&self) -> &'static str {
        match self {
            Completion::RolesLoaded(_) => "roles_loaded",
            Completion::UsersLoaded(_) => "users_loaded",
            Completion::UserCreated(_) => "user_created",
            Completion::UserUpdated { .. } => "user_updated",
            Completion::UserDeleted { .. } => "user_deleted",
            Completion::ResourcesResolved { .. } => "resources_resolved",
        }
    }
}
