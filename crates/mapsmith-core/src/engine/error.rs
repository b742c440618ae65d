//! Template engine errors.

use thiserror::Error;

/// Errors raised while compiling or rendering a template set.
///
/// Rendering is strict: referencing an undefined value is fatal, never a
/// silent empty string. All variants abort the current generation call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    /// A fragment (or the entry itself) references a name the set does not
    /// contain. Caught at compile time.
    #[error("template set has no fragment named '{name}'")]
    UnknownFragment { name: String },

    /// A fragment could not be parsed.
    #[error("failed to parse fragment '{fragment}': {message}")]
    Parse { fragment: String, message: String },

    /// Strict-mode lookup failure: the rendered input has no value at the
    /// referenced path (or the value is null).
    #[error("template references undefined value '{path}'")]
    UndefinedValue { path: String },

    /// An `each` block was given something that is not an array.
    #[error("value at '{path}' is not iterable")]
    NotIterable { path: String },

    /// A loop meta variable (`@index`, `@first`, `@last`) was referenced
    /// outside an `each` block.
    #[error("loop variable '{name}' used outside an each block")]
    LoopVariableOutsideEach { name: String },
}

impl TemplateError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFragment { name } => vec![
                format!("Add a fragment named '{}' to the set", name),
                "Or fix the partial reference".into(),
            ],
            Self::UndefinedValue { path } => vec![
                format!("The render input has no value at '{}'", path),
                "Guard optional values with an if block".into(),
            ],
            _ => vec!["Check the template fragment source".into()],
        }
    }
}
