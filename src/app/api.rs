//! API Facade for the application.
//!
//! High-level operations built on a [`Session`]: each one mounts a controller,
//! drives it through the same intents the interactive dashboard uses, and
//! reports the outcome.

use std::env;

use crate::app::config::{ConfigOverrides, load_config};
use crate::app::{AppContext, Session};
use crate::domain::{FormField, RoleCatalog, RoleContent, RoleId, User, UserId, UserList};
use crate::ports::ConfirmPrompt;

pub use crate::domain::AppError;

/// Field values supplied on the command line. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub hire_date: Option<String>,
    /// Role id or role name.
    pub role: Option<String>,
    /// An empty value clears the bio.
    pub bio: Option<String>,
}

/// Build a context from the working directory, environment, and overrides.
pub fn create_context(overrides: &ConfigOverrides) -> Result<AppContext, AppError> {
    let cwd = env::current_dir()?;
    let config = load_config(overrides, &cwd)?;
    AppContext::from_config(config)
}

/// Roles as the dashboard's selector would show them.
pub fn roles(ctx: &AppContext) -> Result<RoleCatalog, AppError> {
    let session = Session::start_loaded(ctx)?;
    Ok(session.controller().state().roles().clone())
}

/// Users currently listed, with the roles needed to label them.
pub fn users(ctx: &AppContext) -> Result<(UserList, RoleCatalog), AppError> {
    let session = Session::start_loaded(ctx)?;
    let state = session.controller().state();
    Ok((state.users().clone(), state.roles().clone()))
}

/// Onboarding content for `role_name`, or the welcome content when `None`.
pub fn content(ctx: &AppContext, role_name: Option<&str>) -> Result<RoleContent, AppError> {
    let mut session = Session::start_loaded(ctx)?;
    if let Some(name) = role_name {
        let id = find_role(session.controller().state().roles(), name)?;
        let lookup = session.controller_mut().choose_role(id)?;
        session.spawn(lookup);
    }
    let content = session.controller().content();
    session.close();
    Ok(content)
}

/// Validate and create a user.
pub fn add_user(ctx: &AppContext, fields: &UserFields) -> Result<User, AppError> {
    let mut session = Session::start_loaded(ctx)?;
    fill_form(&mut session, fields)?;
    submit(&mut session)?;

    session
        .controller()
        .state()
        .users()
        .last()
        .cloned()
        .ok_or_else(|| AppError::InternalError("created user missing from list".to_string()))
}

/// Load a user into the form, apply `fields`, and submit the changes.
pub fn edit_user(ctx: &AppContext, id: UserId, fields: &UserFields) -> Result<User, AppError> {
    let mut session = Session::start_loaded(ctx)?;
    let lookup = session.controller_mut().begin_edit(id)?;
    session.spawn(lookup);
    fill_form(&mut session, fields)?;
    submit(&mut session)?;

    session.controller().state().users().get(id).cloned().ok_or(AppError::UserNotFound(id))
}

/// Delete a user after confirmation. Returns `false` when the prompt was declined.
pub fn delete_user(ctx: &AppContext, id: UserId, prompt: &dyn ConfirmPrompt) -> Result<bool, AppError> {
    let mut session = Session::start_loaded(ctx)?;
    let Some(effect) = session.controller_mut().request_delete(id, prompt)? else {
        return Ok(false);
    };
    session.run(Some(effect));
    session.check()?;
    Ok(true)
}

/// Resolve a role given by id or by name.
pub fn find_role(roles: &RoleCatalog, value: &str) -> Result<RoleId, AppError> {
    if let Some(role) = roles.find_by_form_value(value) {
        return Ok(role.role_id);
    }
    roles
        .find_by_name(value)
        .map(|role| role.role_id)
        .ok_or_else(|| AppError::RoleNotFound(value.trim().to_string()))
}

fn fill_form(session: &mut Session, fields: &UserFields) -> Result<(), AppError> {
    let text_fields = [
        (FormField::FirstName, &fields.first_name),
        (FormField::LastName, &fields.last_name),
        (FormField::Email, &fields.email),
        (FormField::HireDate, &fields.hire_date),
        (FormField::Bio, &fields.bio),
    ];
    for (field, value) in text_fields {
        if let Some(value) = value {
            session.controller_mut().edit_field(field, value.as_str());
        }
    }

    if let Some(role) = &fields.role {
        let id = find_role(session.controller().state().roles(), role)?;
        let lookup = session.controller_mut().edit_field(FormField::RoleId, id.to_string());
        session.spawn(lookup);
    }
    Ok(())
}

fn submit(session: &mut Session) -> Result<(), AppError> {
    let effect = session.controller_mut().submit();
    if effect.is_none() {
        let errors = session.controller().state().form().errors();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors.summary()));
        }
    }
    session.run(effect);
    session.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::{ApiError, DashboardConfig, Role};
    use crate::services::{MemoryUserRepository, load_role_content_catalog};
    use crate::testing::{FakeUserRepository, ScriptedConfirm};

    fn context(repo: FakeUserRepository) -> AppContext {
        let mut config = DashboardConfig::default();
        config.ui.resource_lookup_delay_ms = 0;
        AppContext::new(config, Arc::new(repo), load_role_content_catalog().unwrap())
    }

    fn repo() -> FakeUserRepository {
        FakeUserRepository::new(
            vec![Role::new(RoleId::new(1), "Software Engineer"), Role::new(RoleId::new(2), "HR Manager")],
            Vec::new(),
        )
    }

    fn honey() -> UserFields {
        UserFields {
            first_name: Some("Honey".into()),
            last_name: Some("Grid".into()),
            email: Some("Honey@Waffle.Tech".into()),
            hire_date: Some("2024-05-01".into()),
            role: Some("hr manager".into()),
            bio: None,
        }
    }

    #[test]
    fn add_user_normalizes_and_creates() {
        let fake = repo();
        let ctx = context(fake.clone());
        let user = add_user(&ctx, &honey()).unwrap();

        assert_eq!(user.user_id, UserId::new(1));
        assert_eq!(user.email, "honey@waffle.tech");
        assert_eq!(user.role_id, RoleId::new(2));
        assert!(fake.get_calls().contains(&"create_user honey@waffle.tech".to_string()));
    }

    #[test]
    fn add_user_reports_validation_without_request() {
        let fake = repo();
        let ctx = context(fake.clone());
        let fields = UserFields { email: Some("a@b".into()), ..honey() };

        let err = add_user(&ctx, &fields).unwrap_err();
        assert!(err.to_string().contains("Email required (min 6 characters)."), "{err}");
        assert!(!fake.get_calls().iter().any(|call| call.starts_with("create_user")));
    }

    #[test]
    fn add_user_unknown_role_name() {
        let ctx = context(repo());
        let fields = UserFields { role: Some("Barista".into()), ..honey() };
        assert!(matches!(add_user(&ctx, &fields), Err(AppError::RoleNotFound(name)) if name == "Barista"));
    }

    #[test]
    fn duplicate_email_surfaces_server_detail() {
        let ctx = context(repo());
        add_user(&ctx, &honey()).unwrap();
        let err = add_user(&ctx, &honey()).unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn edit_user_changes_only_given_fields() {
        let fake = repo();
        let ctx = context(fake.clone());
        let user = add_user(&ctx, &UserFields { bio: Some("Syrup fan".into()), ..honey() }).unwrap();

        let fields = UserFields { last_name: Some("Stack".into()), bio: Some(String::new()), ..Default::default() };
        let updated = edit_user(&ctx, user.user_id, &fields).unwrap();
        assert_eq!(updated.last_name, "Stack");
        assert_eq!(updated.first_name, "Honey");
        assert_eq!(updated.bio, None);
    }

    #[test]
    fn edit_unknown_user() {
        let ctx = context(repo());
        assert!(matches!(
            edit_user(&ctx, UserId::new(3), &UserFields::default()),
            Err(AppError::UserNotFound(_))
        ));
    }

    #[test]
    fn delete_respects_prompt() {
        let ctx = context(repo());
        let user = add_user(&ctx, &honey()).unwrap();

        let decline = ScriptedConfirm::answering(false);
        assert!(!delete_user(&ctx, user.user_id, &decline).unwrap());
        assert_eq!(decline.asked(), vec!["Delete Honey Grid?".to_string()]);
        assert_eq!(users(&ctx).unwrap().0.len(), 1);

        assert!(delete_user(&ctx, user.user_id, &ScriptedConfirm::answering(true)).unwrap());
        assert!(users(&ctx).unwrap().0.is_empty());
    }

    #[test]
    fn load_failure_is_request_error() {
        let fake = repo();
        fake.fail_with(ApiError::fetch("load roles", "refused"));
        let err = roles(&context(fake)).unwrap_err();
        assert!(matches!(err, AppError::Request(_)));
        assert!(err.to_string().starts_with("Failed to load"));
    }

    #[test]
    fn content_by_name_uses_curated_entry() {
        let ctx = context(repo());
        let content = content(&ctx, Some("software engineer")).unwrap();
        assert_ne!(content.title, RoleContent::welcome().title);
        assert_eq!(content, ctx.content().curated("Software Engineer").unwrap().clone());

        assert_eq!(super::content(&ctx, None).unwrap(), RoleContent::welcome());
    }

    #[test]
    fn offline_repository_context() {
        let ctx = AppContext::new(
            DashboardConfig::default(),
            Arc::new(MemoryUserRepository::seeded().unwrap()),
            load_role_content_catalog().unwrap(),
        );
        let (users, roles) = users(&ctx).unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(roles.len(), 10);
    }
}
