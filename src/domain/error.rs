use std::io;

use thiserror::Error;

use crate::domain::{RoleId, UserId};

/// Library-wide error type for waffle operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Repository call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The dashboard reported a failure banner for the last request.
    #[error("{0}")]
    Request(String),

    /// Form input did not pass local validation.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No user with the given id in the current list.
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// No role matched the given id or name.
    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    /// Role id parsed but is not present in the catalog.
    #[error("Role {0} is not available")]
    RoleUnavailable(RoleId),

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Invariant violated inside the crate.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Failure returned by a [`UserRepository`](crate::ports::UserRepository) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure, or a non-success status without a usable detail.
    #[error("Failed to {action}: {reason}")]
    Fetch { action: String, reason: String },

    /// The server understood the request and refused it.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// Success status with a body that did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn fetch(action: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::Fetch { action: action.into(), reason: reason.into() }
    }

    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        ApiError::Rejected { status, detail: detail.into() }
    }

    /// User-facing banner text. Rejections carry the server detail verbatim.
    pub fn banner(&self, action: &str) -> String {
        match self {
            ApiError::Rejected { detail, .. } => detail.clone(),
            ApiError::Fetch { .. } | ApiError::Decode(_) => {
                format!("Failed to {action}. Please try again.")
            }
        }
    }
}
