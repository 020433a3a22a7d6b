//! CLI Adapter.

mod dashboard;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::api::{self, UserFields};
use crate::app::config::ConfigOverrides;
use crate::app::view;
use crate::domain::{AppError, UserId};
use crate::ports::{AssumeYes, ConfirmPrompt};
use crate::services::DialoguerConfirm;

#[derive(Parser)]
#[command(name = "waffle")]
#[command(version)]
#[command(about = "Waffle Suite onboarding dashboard", long_about = None)]
struct Cli {
    /// Path to a waffle.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Base URL of the roles/users API
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    /// Use the built-in in-memory records instead of the API
    #[arg(long, global = true)]
    offline: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List roles
    Roles,
    /// Show the team members table
    #[clap(visible_alias = "ls")]
    Users,
    /// Print onboarding content for a role
    Content {
        /// Role name or id (omit for the welcome content)
        role: Option<String>,
    },
    /// Add a team member
    #[clap(visible_alias = "a")]
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD
        #[arg(long)]
        hire_date: String,
        /// Role name or id
        #[arg(long)]
        role: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Edit a team member; only the given fields change
    #[clap(visible_alias = "e")]
    Edit {
        id: UserId,
        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a team member
    #[clap(visible_alias = "rm")]
    Delete {
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive dashboard (default)
    #[clap(visible_alias = "d")]
    Dashboard,
}

#[derive(Args)]
struct EditFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    hire_date: Option<String>,
    #[arg(long)]
    role: Option<String>,
    /// Pass an empty value to clear
    #[arg(long)]
    bio: Option<String>,
}

impl From<EditFields> for UserFields {
    fn from(fields: EditFields) -> Self {
        UserFields {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            hire_date: fields.hire_date,
            role: fields.role,
            bio: fields.bio,
        }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let overrides =
        ConfigOverrides { config_path: cli.config, api_url: cli.api_url, offline: cli.offline };

    let result: Result<i32, AppError> = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Roles => run_roles(&overrides).map(|_| 0),
        Commands::Users => run_users(&overrides).map(|_| 0),
        Commands::Content { role } => run_content(&overrides, role.as_deref()).map(|_| 0),
        Commands::Add { first_name, last_name, email, hire_date, role, bio } => {
            let fields = UserFields {
                first_name: Some(first_name),
                last_name: Some(last_name),
                email: Some(email),
                hire_date: Some(hire_date),
                role: Some(role),
                bio,
            };
            run_add(&overrides, &fields).map(|_| 0)
        }
        Commands::Edit { id, fields } => run_edit(&overrides, id, &fields.into()).map(|_| 0),
        Commands::Delete { id, yes } => run_delete(&overrides, id, yes),
        Commands::Dashboard => dashboard::run_dashboard(&overrides).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_roles(overrides: &ConfigOverrides) -> Result<(), AppError> {
    let ctx = api::create_context(overrides)?;
    let roles = api::roles(&ctx)?;
    print!("{}", view::render_roles(&roles));
    Ok(())
}

fn run_users(overrides: &ConfigOverrides) -> Result<(), AppError> {
    let ctx = api::create_context(overrides)?;
    let session = crate::app::Session::start_loaded(&ctx)?;
    print!("{}", view::render_users_table(session.controller().state()));
    Ok(())
}

fn run_content(overrides: &ConfigOverrides, role: Option<&str>) -> Result<(), AppError> {
    let ctx = api::create_context(overrides)?;
    let content = api::content(&ctx, role)?;
    print!("{}", view::render_content(&content));
    Ok(())
}

fn run_add(overrides: &ConfigOverrides, fields: &UserFields) -> Result<(), AppError> {
    let ctx = api::create_context(overrides)?;
    let user = api::add_user(&ctx, fields)?;
    println!("✅ Added {} (id {})", user.full_name(), user.user_id);
    Ok(())
}

fn run_edit(overrides: &ConfigOverrides, id: UserId, fields: &UserFields) -> Result<(), AppError> {
    let ctx = api::create_context(overrides)?;
    let user = api::edit_user(&ctx, id, fields)?;
    println!("✅ Updated {} (id {})", user.full_name(), user.user_id);
    Ok(())
}

/// Exit code 2 when the prompt was declined.
fn run_delete(overrides: &ConfigOverrides, id: UserId, yes: bool) -> Result<i32, AppError> {
    let ctx = api::create_context(overrides)?;
    let prompt: &dyn ConfirmPrompt = if yes { &AssumeYes } else { &DialoguerConfirm };
    if api::delete_user(&ctx, id, prompt)? {
        println!("✅ Deleted user {}", id);
        Ok(0)
    } else {
        println!("ℹ️  Delete cancelled");
        Ok(2)
    }
}
