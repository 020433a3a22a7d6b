use dialoguer::Confirm;

use crate::domain::AppError;
use crate::ports::ConfirmPrompt;

/// Terminal yes/no prompt. Defaults to "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirm;

impl ConfirmPrompt for DialoguerConfirm {
    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|err| AppError::Prompt(format!("Failed to read confirmation: {}", err)))
    }
}
