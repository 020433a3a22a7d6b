//! Curated role content and offline seed data compiled into the binary.

use std::collections::HashMap;

use include_dir::{Dir, DirEntry, include_dir};
use serde::Deserialize;

use crate::domain::{AppError, Resource, Role, RoleContent, RoleContentCatalog, User};

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

const ROLE_CONTENT_DIR: &str = "role_content";
const SEED_FILE: &str = "seed.yml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleContentAsset {
    role_name: String,
    title: String,
    description: String,
    #[serde(default)]
    training: Vec<String>,
    #[serde(default)]
    tasks: Vec<String>,
    #[serde(default)]
    resources: Vec<Resource>,
}

impl RoleContentAsset {
    fn into_entry(self) -> (String, RoleContent) {
        let content = RoleContent {
            title: self.title,
            description: self.description,
            training: self.training,
            tasks: self.tasks,
            resources: self.resources,
        };
        (self.role_name, content)
    }
}

/// Records the offline repository starts with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Build the curated content catalog from `assets/role_content/*.yml`.
pub fn load_role_content_catalog() -> Result<RoleContentCatalog, AppError> {
    let content_dir = ASSETS_DIR.get_dir(ROLE_CONTENT_DIR).ok_or_else(|| {
        AppError::InternalError(format!("Missing embedded directory: {}", ROLE_CONTENT_DIR))
    })?;

    let mut entries = HashMap::new();
    for entry in content_dir.entries() {
        let DirEntry::File(file) = entry else {
            continue;
        };
        let path = file.path().display().to_string();
        let text = file
            .contents_utf8()
            .ok_or_else(|| AppError::InternalError(format!("Asset is not UTF-8: {}", path)))?;
        let (role_name, content) = parse_role_content(text)
            .map_err(|details| AppError::ParseError { what: path.clone(), details })?;

        if entries.insert(role_name.clone(), content).is_some() {
            return Err(AppError::InternalError(format!(
                "Duplicate curated content for role '{}' in {}",
                role_name, path
            )));
        }
    }

    Ok(RoleContentCatalog::new(entries))
}

/// Parse the offline seed from `assets/seed.yml`.
pub fn load_seed_data() -> Result<SeedData, AppError> {
    let text = ASSETS_DIR
        .get_file(SEED_FILE)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::InternalError(format!("Missing embedded file: {}", SEED_FILE)))?;

    serde_yaml::from_str(text)
        .map_err(|err| AppError::ParseError { what: SEED_FILE.to_string(), details: err.to_string() })
}

fn parse_role_content(text: &str) -> Result<(String, RoleContent), String> {
    let asset: RoleContentAsset = serde_yaml::from_str(text).map_err(|err| err.to_string())?;
    if asset.role_name.trim().is_empty() {
        return Err("role_name must not be empty".to_string());
    }
    Ok(asset.into_entry())
}
