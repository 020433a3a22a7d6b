use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Input, Select};

use crate::app::api;
use crate::app::config::ConfigOverrides;
use crate::app::controller::DashboardState;
use crate::app::view;
use crate::app::Session;
use crate::domain::{AppError, FormField, UserId};
use crate::services::DialoguerConfirm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    CycleRole,
    ChooseRole,
    EditField,
    Submit,
    EditUser,
    DeleteUser,
    Cancel,
    DismissError,
    Refresh,
    Quit,
}

impl MenuAction {
    fn label(self, state: &DashboardState) -> String {
        match self {
            MenuAction::CycleRole => "🧇 Next role".to_string(),
            MenuAction::ChooseRole => "Choose role".to_string(),
            MenuAction::EditField => "Fill in form".to_string(),
            MenuAction::Submit => state.submit_label().to_string(),
            MenuAction::EditUser => "Edit a team member".to_string(),
            MenuAction::DeleteUser => "Delete a team member".to_string(),
            MenuAction::Cancel => "Cancel edit".to_string(),
            MenuAction::DismissError => "Dismiss error".to_string(),
            MenuAction::Refresh => "Refresh".to_string(),
            MenuAction::Quit => "Quit".to_string(),
        }
    }
}

/// Actions that make sense for the current state, in menu order.
fn menu_actions(state: &DashboardState) -> Vec<MenuAction> {
    let mut actions = Vec::new();
    if state.api_error().is_some() {
        actions.push(MenuAction::DismissError);
    }
    if !state.roles().is_empty() {
        actions.push(MenuAction::CycleRole);
        actions.push(MenuAction::ChooseRole);
    }
    actions.push(MenuAction::EditField);
    if !state.loading().is_saving() {
        actions.push(MenuAction::Submit);
    }
    if state.form().mode().editing_id().is_some() {
        actions.push(MenuAction::Cancel);
    }
    if !state.users().is_empty() {
        actions.push(MenuAction::EditUser);
        actions.push(MenuAction::DeleteUser);
    }
    actions.push(MenuAction::Refresh);
    actions.push(MenuAction::Quit);
    actions
}

pub fn run_dashboard(overrides: &ConfigOverrides) -> Result<(), AppError> {
    let ctx = api::create_context(overrides)?;
    let mut session = Session::start(&ctx);

    loop {
        session.pump();
        if session.controller_mut().take_scroll_request() {
            println!("ℹ️  Editing in the form below");
        }
        let controller = session.controller();
        println!("{}", view::render_dashboard(controller.state(), &controller.content(), view::current_year()));

        let actions = menu_actions(controller.state());
        let labels: Vec<String> = actions.iter().map(|action| action.label(controller.state())).collect();
        let Some(index) = select("What next?", &labels)? else {
            break;
        };

        match actions[index] {
            MenuAction::CycleRole => {
                let lookup = session.controller_mut().cycle_role();
                session.spawn(lookup);
            }
            MenuAction::ChooseRole => {
                let roles = session.controller().state().roles().as_slice().to_vec();
                let names: Vec<&str> = roles.iter().map(|role| role.role_name.as_str()).collect();
                if let Some(index) = select("Role", &names)? {
                    let lookup = session.controller_mut().choose_role(roles[index].role_id)?;
                    session.spawn(lookup);
                }
            }
            MenuAction::EditField => {
                let labels: Vec<&str> = FormField::ALL.iter().map(|field| field.label()).collect();
                if let Some(index) = select("Field", &labels)? {
                    let field = FormField::ALL[index];
                    let current = session.controller().state().form().state().get(field).to_string();
                    if let Some(value) = prompt_value(field, &current)? {
                        let lookup = session.controller_mut().edit_field(field, value);
                        session.spawn(lookup);
                    }
                }
            }
            MenuAction::Submit => {
                let effect = session.controller_mut().submit();
                session.run(effect);
            }
            MenuAction::EditUser => {
                if let Some(id) = select_user(session.controller().state(), "Edit")? {
                    let lookup = session.controller_mut().begin_edit(id)?;
                    session.spawn(lookup);
                }
            }
            MenuAction::DeleteUser => {
                if let Some(id) = select_user(session.controller().state(), "Delete")? {
                    let effect = session.controller_mut().request_delete(id, &DialoguerConfirm)?;
                    session.run(effect);
                }
            }
            MenuAction::Cancel => session.controller_mut().cancel(),
            MenuAction::DismissError => session.controller_mut().dismiss_error(),
            MenuAction::Refresh => session.settle(),
            MenuAction::Quit => break,
        }
    }

    session.close();
    Ok(())
}

fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<Option<usize>, AppError> {
    match Select::new().with_prompt(prompt).items(items).default(0).interact_opt() {
        Ok(selection) => Ok(selection),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Prompt(format!("Failed to read selection: {}", err))),
    }
}

fn select_user(state: &DashboardState, verb: &str) -> Result<Option<UserId>, AppError> {
    let users = state.users().as_slice();
    let labels: Vec<String> =
        users.iter().map(|user| format!("{} <{}>", user.full_name(), user.email)).collect();
    Ok(select(&format!("{} which team member?", verb), &labels)?.map(|index| users[index].user_id))
}

fn prompt_value(field: FormField, current: &str) -> Result<Option<String>, AppError> {
    let prompt = match field {
        FormField::HireDate => format!("{} (YYYY-MM-DD)", field.label()),
        FormField::RoleId => format!("{} (id)", field.label()),
        _ => field.label().to_string(),
    };
    match Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
    {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Prompt(format!("Failed to read {}: {}", field.key(), err))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controller::{Completion, DashboardController};
    use crate::domain::{ApiError, Role, RoleContentCatalog, RoleId};

    #[test]
    fn empty_dashboard_menu() {
        let mut controller = DashboardController::new(RoleContentCatalog::default());
        controller.mount();
        controller.apply(Completion::RolesLoaded(Err(ApiError::fetch("load roles", "down"))));
        controller.apply(Completion::UsersLoaded(Ok(Vec::new())));

        assert_eq!(
            menu_actions(controller.state()),
            vec![
                MenuAction::DismissError,
                MenuAction::EditField,
                MenuAction::Submit,
                MenuAction::Refresh,
                MenuAction::Quit
            ]
        );
    }

    #[test]
    fn role_actions_need_roles() {
        let mut controller = DashboardController::new(RoleContentCatalog::default());
        controller.mount();
        controller.apply(Completion::RolesLoaded(Ok(vec![Role::new(RoleId::new(1), "HR")])));
        let actions = menu_actions(controller.state());
        assert!(actions.contains(&MenuAction::CycleRole));
        assert!(!actions.contains(&MenuAction::Cancel));
        assert_eq!(MenuAction::Submit.label(controller.state()), "Add User");
    }
}
