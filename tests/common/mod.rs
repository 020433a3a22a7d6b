//! Shared testing utilities for waffle CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ROLES_JSON: &str = r#"[{"role_id":1,"role_name":"Software Engineer"},{"role_id":2,"role_name":"HR Manager"}]"#;

pub const USERS_JSON: &str = r#"[
    {"user_id":1,"first_name":"Maple","last_name":"Stack","email":"maple@waffle.tech","hire_date":"2023-01-09","role_id":1,"bio":"Ships the batter pipeline."},
    {"user_id":2,"first_name":"Honey","last_name":"Grid","email":"honey@waffle.tech","hire_date":"2024-05-01","role_id":9,"bio":null}
]"#;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `waffle` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("waffle").expect("Failed to locate waffle binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env_remove("WAFFLE_CONFIG")
            .env_remove("WAFFLE_API_URL")
            .env("RUST_LOG", "off");
        cmd
    }

    /// Build a command pointed at `base_url` through `--api-url`.
    pub fn cli_against(&self, base_url: &str) -> Command {
        let mut cmd = self.cli();
        cmd.args(["--api-url", base_url]);
        cmd
    }

    /// Write `waffle.toml` into the working directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("waffle.toml");
        fs::write(&path, content).expect("Failed to write waffle.toml");
        path
    }
}

/// Mock both startup loads.
#[allow(dead_code)]
pub fn mock_startup(server: &mut mockito::Server) -> (mockito::Mock, mockito::Mock) {
    let roles = server.mock("GET", "/roles/").with_status(200).with_body(ROLES_JSON).create();
    let users = server.mock("GET", "/users/").with_status(200).with_body(USERS_JSON).create();
    (roles, users)
}
