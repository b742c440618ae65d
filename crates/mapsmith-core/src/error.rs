//! Unified error handling for Mapsmith Core.
//!
//! Wraps the domain, engine and application errors behind one type with
//! rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::error::ApplicationError;
use crate::domain::error::ModelError;
use crate::engine::error::TemplateError;

/// Root error type for Mapsmith Core operations.
///
/// Everything here is fatal for the current generation call: the core's
/// contract is "fails synchronously, never returns a partial or corrupt
/// model or document".
#[derive(Debug, Error, Clone)]
pub enum MapsmithError {
    /// Errors from type-model resolution and request shaping.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Errors from template compilation or rendering.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MapsmithError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Model(e) => e.suggestions(),
            Self::Template(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Mapsmith".into(),
                "Please report this issue at: https://github.com/cosecruz/mapsmith/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Model(e) => match e.category() {
                crate::domain::error::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::error::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::error::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Template(_) => ErrorCategory::Validation,
            Self::Application(e) => match e.category() {
                crate::domain::error::ErrorCategory::NotFound => ErrorCategory::NotFound,
                _ => ErrorCategory::Internal,
            },
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MapsmithResult<T> = Result<T, MapsmithError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> MapsmithResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> MapsmithResult<T> {
        self.map_err(|e| MapsmithError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
