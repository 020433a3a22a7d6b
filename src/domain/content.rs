//! Role-specific onboarding content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// A named link shown next to onboarding content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub link: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self { name: name.into(), link: link.into() }
    }
}

/// Training, tasks and resources bundle for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleContent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub training: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl RoleContent {
    /// Shown while no role is selected.
    pub fn welcome() -> Self {
        Self {
            title: "Welcome to Waffle Suite".to_string(),
            description: "Select a role using the waffle button in the top right to see \
                          specific training and resources."
                .to_string(),
            training: Vec::new(),
            tasks: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Generic content for a role without curated material.
    pub fn fallback(role_name: &str) -> Self {
        Self {
            title: format!("{role_name} Onboarding"),
            description: format!(
                "Welcome to the {role_name} team! We're setting up your specific training materials."
            ),
            training: vec![
                "General Company Orientation".to_string(),
                "Role-specific Training (Coming Soon)".to_string(),
                "Team Introduction Session".to_string(),
            ],
            tasks: vec![
                "Complete general onboarding checklist".to_string(),
                "Meet with team members".to_string(),
                "Review role-specific documentation".to_string(),
                "Set up workspace and tools".to_string(),
            ],
            resources: vec![
                Resource::new("Employee Handbook", "/resources/employee-handbook.pdf"),
                Resource::new("Company Overview", "/resources/company-overview.pdf"),
            ],
        }
    }
}

/// Curated content keyed by exact role name.
#[derive(Debug, Clone, Default)]
pub struct RoleContentCatalog {
    entries: HashMap<String, RoleContent>,
}

impl RoleContentCatalog {
    pub fn new(entries: HashMap<String, RoleContent>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn curated(&self, role_name: &str) -> Option<&RoleContent> {
        self.entries.get(role_name)
    }

    /// Sorted curated role names.
    pub fn role_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Content to display for `role`. Never fails: unknown names get the fallback.
    pub fn resolve(&self, role: Option<&Role>) -> RoleContent {
        match role {
            None => RoleContent::welcome(),
            Some(role) => self
                .curated(&role.role_name)
                .cloned()
                .unwrap_or_else(|| RoleContent::fallback(&role.role_name)),
        }
    }
}

/// Quick links shown under the form for the selected role.
///
/// Keyed by exact role name; anything else yields no links.
pub fn form_resources(role_name: &str) -> Vec<Resource> {
    match role_name {
        "Engineer" => vec![
            Resource::new("Codebase Overview", "/resources/engineer-codebase.pdf"),
            Resource::new("Engineering Handbook", "/resources/eng-handbook.pdf"),
        ],
        "HR" => vec![Resource::new("HR Onboarding Checklist", "/resources/hr-checklist.pdf")],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleId;

    fn catalog() -> RoleContentCatalog {
        let mut entries = HashMap::new();
        entries.insert(
            "Designer".to_string(),
            RoleContent {
                title: "Design Studio Onboarding".into(),
                description: "Grids".into(),
                training: vec!["Grid Design".into()],
                tasks: vec!["Design a layout".into()],
                resources: vec![Resource::new("Grid Library", "/resources/grids.pdf")],
            },
        );
        RoleContentCatalog::new(entries)
    }

    #[test]
    fn absent_role_is_welcome_and_idempotent() {
        let catalog = catalog();
        let first = catalog.resolve(None);
        assert_eq!(first, catalog.resolve(None));
        assert_eq!(first.title, "Welcome to Waffle Suite");
        assert!(first.training.is_empty());
        assert!(first.tasks.is_empty());
        assert!(first.resources.is_empty());
    }

    #[test]
    fn curated_role_is_returned_verbatim() {
        let catalog = catalog();
        let role = Role::new(RoleId::new(5), "Designer");
        assert_eq!(&catalog.resolve(Some(&role)), catalog.curated("Designer").unwrap());
    }

    #[test]
    fn unknown_role_falls_back_with_name_in_title() {
        let role = Role::new(RoleId::new(9), "Pastry Chef");
        let content = catalog().resolve(Some(&role));
        assert!(content.title.contains("Pastry Chef"));
        assert_eq!(content.training.len(), 3);
        assert_eq!(content.tasks.len(), 4);
        assert_eq!(content.resources.len(), 2);
    }

    #[test]
    fn curated_lookup_is_case_sensitive() {
        let role = Role::new(RoleId::new(5), "designer");
        assert_eq!(catalog().resolve(Some(&role)).title, "designer Onboarding");
    }

    #[test]
    fn form_resources_lookup() {
        assert_eq!(form_resources("Engineer").len(), 2);
        assert_eq!(form_resources("HR")[0].name, "HR Onboarding Checklist");
        assert!(form_resources("Designer").is_empty());
    }
}
