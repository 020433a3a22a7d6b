mod confirm_prompt;
mod user_repository;

pub use confirm_prompt::{AssumeYes, ConfirmPrompt};
pub use user_repository::UserRepository;
