use crate::domain::AppError;
use crate::ports::ConfirmPrompt;
use std::sync::{Arc, Mutex};

/// Confirmation prompt with a fixed answer that records what it was asked.
#[derive(Clone)]
pub struct ScriptedConfirm {
    answer: bool,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self { answer, asked: Arc::new(Mutex::new(vec![])) }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl ConfirmPrompt for ScriptedConfirm {
    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        self.asked.lock().unwrap().push(message.to_string());
        Ok(self.answer)
    }
}
