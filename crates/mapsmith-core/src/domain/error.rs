//! Domain errors for model resolution and request shaping.

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is fatal for the current generation call: nothing is
/// caught or retried inside the core, and no partial `Model` or document
/// text is ever returned alongside one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A `ModelTypeName` reference has no corresponding named definition,
    /// or (during example synthesis) that definition lacks an underlying
    /// type. A missing entry is a defect in the upstream AST, never a
    /// recoverable case.
    #[error("named type '{name}' not found in profile definitions")]
    TypeNotFound { name: String },

    /// An object field has neither an inline type nor a resolvable
    /// named-field type.
    #[error("field '{field_name}' has no type")]
    FieldTypeUndefined { field_name: String },

    /// An AST node's `kind` is not one of the known variants. The message
    /// carries the offending kind, or `undefined` when the node had none.
    #[error("unrecognized AST node kind '{kind}'")]
    UnrecognizedNodeKind { kind: String },

    /// curl URL resolution could not match any provider service base URL.
    #[error("no provider service matches url '{url}'")]
    ServiceNotFound { url: String },

    /// A named type (transitively) references itself where a recursive
    /// reference cannot be represented, e.g. inside a synthesized example.
    #[error("named type '{name}' is cyclic")]
    CyclicType { name: String },
}

impl ModelError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TypeNotFound { name } => vec![
                format!("The profile references '{}' but never defines it", name),
                "Check the profile's named model definitions".into(),
            ],
            Self::FieldTypeUndefined { field_name } => vec![
                format!("Give field '{}' an inline type", field_name),
                "Or declare a named field definition with the same name".into(),
            ],
            Self::UnrecognizedNodeKind { kind } => vec![
                format!("Node kind '{}' is not part of the profile AST", kind),
                "The profile AST may come from a newer parser version".into(),
            ],
            Self::ServiceNotFound { url } => vec![
                format!("No service base URL is a prefix of '{}'", url),
                "Check the provider definition's services list".into(),
            ],
            Self::CyclicType { name } => vec![
                format!("'{}' refers back to itself", name),
                "Break the cycle or drop the authored example".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeNotFound { .. } | Self::ServiceNotFound { .. } => ErrorCategory::NotFound,
            Self::FieldTypeUndefined { .. } | Self::CyclicType { .. } => ErrorCategory::Validation,
            Self::UnrecognizedNodeKind { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
