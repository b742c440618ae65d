//! Application layer errors.
//!
//! Orchestration failures, not business logic. Resolution and template
//! errors are `ModelError` / `TemplateError` from their own layers.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::error::ErrorCategory;
use crate::domain::document::DocumentKind;

/// Errors that occur while orchestrating document generation.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No template set is registered for the requested document kind.
    #[error("no template set registered for '{kind}' documents")]
    SetNotFound { kind: DocumentKind },

    /// Writing a generated document failed.
    #[error("failed to write document at {path}: {reason}")]
    SinkError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("template set store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SetNotFound { kind } => vec![
                format!("No templates available for '{}'", kind),
                "Register a template set or use a builtin kind".into(),
            ],
            Self::SinkError { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The template set store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SetNotFound { .. } => ErrorCategory::NotFound,
            Self::SinkError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
