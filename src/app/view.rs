//! Plain-text rendering of the dashboard.

use chrono::{Datelike, Local};

use crate::app::controller::{DashboardState, PLACEHOLDER};
use crate::domain::{FormField, RoleCatalog, RoleContent, User};

const RULE: &str = "────────────────────────────────────────────────────────────";
const COMPANY: &str = "WaffleTech Industries";

/// Year shown in the footer.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// The whole page, top to bottom.
pub fn render_dashboard(state: &DashboardState, content: &RoleContent, year: i32) -> String {
    let mut out = String::new();
    out.push_str(&render_header(state));
    if let Some(banner) = render_error_banner(state) {
        out.push_str(&banner);
    }
    out.push_str(&render_content(content));
    out.push_str(&render_stats(state));
    out.push_str(&render_form(state));
    out.push_str(&render_users_table(state));
    out.push_str(&render_footer(year));
    out
}

pub fn render_header(state: &DashboardState) -> String {
    let welcome = match state.welcome_name() {
        Some(name) => format!("Welcome, {}!", name),
        None => "Welcome!".to_string(),
    };
    let role = state.selected_role().map_or("Select a role", |role| role.role_name.as_str());

    block(vec![
        "🧇 Waffle Suite Onboarding".to_string(),
        welcome,
        format!("Role: [{}] (click to cycle)", role),
        RULE.to_string(),
    ])
}

pub fn render_error_banner(state: &DashboardState) -> Option<String> {
    state.api_error().map(|message| block(vec![format!("⚠️  {}", message), RULE.to_string()]))
}

pub fn render_content(content: &RoleContent) -> String {
    let mut lines = vec![content.title.clone(), content.description.clone()];

    if !content.training.is_empty() {
        lines.push("\nTraining".to_string());
        lines.extend(content.training.iter().map(|item| format!("  • {}", item)));
    }
    if !content.tasks.is_empty() {
        lines.push("\nFirst tasks".to_string());
        lines.extend(
            content.tasks.iter().enumerate().map(|(index, task)| format!("  {}. {}", index + 1, task)),
        );
    }
    if !content.resources.is_empty() {
        lines.push("\nResources".to_string());
        lines.extend(
            content.resources.iter().map(|resource| format!("  {} <{}>", resource.name, resource.link)),
        );
    }
    lines.push(RULE.to_string());
    block(lines)
}

pub fn render_stats(state: &DashboardState) -> String {
    let in_role = state
        .selected_role()
        .map(|role| state.users().count_with_role(role.role_id).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    format!(
        "Users: {}  Roles: {}  In selected role: {}\n{}\n",
        state.users().len(),
        state.roles().len(),
        in_role,
        RULE
    )
}

pub fn render_form(state: &DashboardState) -> String {
    let form = state.form();
    let mut lines = vec![match state.editing_user() {
        Some(user) => format!("Edit {}", user.full_name()),
        None => "Add a new team member".to_string(),
    }];

    for field in FormField::ALL {
        let marker = if field.is_required() { "*" } else { "" };
        let value = form.state().get(field);
        let shown = if field == FormField::RoleId {
            role_option_label(state.roles(), value)
        } else {
            value.to_string()
        };
        lines.push(format!("  {}{}: {}", field.label(), marker, shown));
        if let Some(message) = form.errors().get(field) {
            lines.push(format!("      ✗ {}", message));
        }
    }

    if !state.resources().is_empty() {
        lines.push("  Quick links:".to_string());
        lines.extend(
            state.resources().iter().map(|resource| format!("    {} <{}>", resource.name, resource.link)),
        );
    }

    lines.push(format!("  [{}]", state.submit_label()));
    lines.push(RULE.to_string());
    block(lines)
}

fn role_option_label(roles: &RoleCatalog, value: &str) -> String {
    if value.trim().is_empty() {
        return "Select role".to_string();
    }
    match roles.find_by_form_value(value) {
        Some(role) => format!("{} ({})", role.role_name, role.role_id),
        None => value.to_string(),
    }
}

/// Role options as shown in the dropdown.
pub fn render_roles(roles: &RoleCatalog) -> String {
    if roles.is_empty() {
        return "No roles available.\n".to_string();
    }
    block(roles.as_slice().iter().map(|role| format!("{:>4}  {}", role.role_id, role.role_name)).collect())
}

pub fn render_users_table(state: &DashboardState) -> String {
    let title = format!("Team members ({} total)", state.users().len());

    if state.loading().users {
        return block(vec![title, "Loading users...".to_string()]);
    }
    if state.users().is_empty() {
        return block(vec![title, "No users to display.".to_string()]);
    }

    let rows: Vec<[String; 6]> = state.users().as_slice().iter().map(|user| user_row(state, user)).collect();
    let header = ["ID", "Name", "Email", "Hire Date", "Role", "Bio"].map(String::from);

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![title, table_row(&header, &widths)];
    lines.extend(rows.iter().map(|row| table_row(row, &widths)));
    block(lines)
}

fn user_row(state: &DashboardState, user: &User) -> [String; 6] {
    let bio = user.bio.as_deref().filter(|bio| !bio.trim().is_empty()).unwrap_or(PLACEHOLDER);
    [
        user.user_id.to_string(),
        user.full_name(),
        user.email.clone(),
        user.hire_date.clone(),
        state.role_label(user).to_string(),
        bio.to_string(),
    ]
}

fn table_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    line.join("  ").trim_end().to_string()
}

/// Newline-terminated lines.
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_footer(year: i32) -> String {
    format!("{}\n© {} {}\n", RULE, year, COMPANY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controller::{Completion, DashboardController};
    use crate::domain::{ApiError, Role, RoleContentCatalog, RoleId, UserId};

    fn user(id: i64, first: &str, role_id: i64, bio: Option<&str>) -> User {
        User {
            user_id: UserId::new(id),
            first_name: first.into(),
            last_name: "Stack".into(),
            email: format!("{}@waffle.tech", first.to_lowercase()),
            hire_date: "2023-01-09".into(),
            role_id: RoleId::new(role_id),
            bio: bio.map(String::from),
        }
    }

    fn controller(users: Vec<User>) -> DashboardController {
        let mut controller = DashboardController::new(RoleContentCatalog::default());
        controller.mount();
        controller.apply(Completion::RolesLoaded(Ok(vec![Role::new(RoleId::new(1), "Engineer")])));
        controller.apply(Completion::UsersLoaded(Ok(users)));
        controller
    }

    #[test]
    fn loading_placeholder_before_users_arrive() {
        let mut controller = DashboardController::new(RoleContentCatalog::default());
        controller.mount();
        let table = render_users_table(controller.state());
        assert!(table.contains("Loading users..."));
        assert!(table.contains("(0 total)"));
    }

    #[test]
    fn empty_table_placeholder() {
        let controller = controller(Vec::new());
        assert!(render_users_table(controller.state()).contains("No users to display."));
        assert!(render_header(controller.state()).contains("Welcome!"));
    }

    #[test]
    fn dangling_role_and_missing_bio_use_placeholder() {
        let controller = controller(vec![user(1, "Maple", 1, Some("Loves syrup")), user(2, "Honey", 7, None)]);
        let table = render_users_table(controller.state());

        let honey = table.lines().find(|line| line.contains("Honey")).unwrap();
        assert_eq!(honey.matches(PLACEHOLDER).count(), 2);
        let maple = table.lines().find(|line| line.contains("Maple")).unwrap();
        assert!(maple.contains("Engineer"));
        assert!(maple.contains("Loves syrup"));
        assert!(table.contains("(2 total)"));
    }

    #[test]
    fn header_greets_last_user_and_shows_role() {
        let mut controller = controller(vec![user(1, "Maple", 1, None), user(2, "Honey", 1, None)]);
        controller.cycle_role();
        let header = render_header(controller.state());
        assert!(header.contains("Welcome, Honey!"));
        assert!(header.contains("Role: [Engineer]"));
    }

    #[test]
    fn banner_only_when_error_present() {
        let mut controller = controller(Vec::new());
        assert!(render_error_banner(controller.state()).is_none());
        controller.apply(Completion::UsersLoaded(Err(ApiError::fetch("load users", "boom"))));
        let banner = render_error_banner(controller.state()).unwrap();
        assert!(banner.contains("Failed to load users. Please try again."));
    }

    #[test]
    fn form_marks_required_fields_and_errors() {
        let mut controller = controller(Vec::new());
        controller.submit();
        let form = render_form(controller.state());
        assert!(form.contains("First Name*:"));
        assert!(form.contains("First name required (min 2 characters)."));
        assert!(form.contains("[Add User]"));
        assert!(!form.contains("Bio*"));
    }

    #[test]
    fn stats_count_selected_role() {
        let mut controller = controller(vec![user(1, "Maple", 1, None), user(2, "Honey", 3, None)]);
        assert!(render_stats(controller.state()).contains(&format!("In selected role: {}", PLACEHOLDER)));
        controller.cycle_role();
        let stats = render_stats(controller.state());
        assert!(stats.contains("Users: 2"));
        assert!(stats.contains("Roles: 1"));
        assert!(stats.contains("In selected role: 1"));
    }

    #[test]
    fn full_page_has_footer() {
        let controller = controller(Vec::new());
        let page = render_dashboard(controller.state(), &controller.content(), 2026);
        assert!(page.starts_with("🧇 Waffle Suite Onboarding"));
        assert!(page.contains("Welcome to Waffle Suite"));
        assert!(page.trim_end().ends_with("© 2026 WaffleTech Industries"));
    }

    #[test]
    fn roles_listing() {
        let roles = RoleCatalog::new(vec![Role::new(RoleId::new(1), "Engineer")]);
        assert_eq!(render_roles(&roles), "   1  Engineer\n");
        assert_eq!(render_roles(&RoleCatalog::default()), "No roles available.\n");
    }
}
