//! Blocking yes/no confirmation port.

use crate::domain::AppError;

/// Asks the operator to confirm a destructive action.
pub trait ConfirmPrompt {
    /// Returns `true` only when the operator explicitly agreed.
    fn confirm(&self, message: &str) -> Result<bool, AppError>;
}

/// Confirms everything without asking (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl ConfirmPrompt for AssumeYes {
    fn confirm(&self, _message: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}
