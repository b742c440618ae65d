//! Core domain layer for Mapsmith.
//!
//! Pure data: resolved models, example trees, the profile AST boundary,
//! provider definitions and document classification. No I/O, no async,
//! no resolution logic (that lives in the application layer).

pub mod document;
pub mod error;
pub mod model;
pub mod profile;
pub mod provider;

// Re-exports for convenience
pub use document::{DocumentFormat, DocumentKind};
pub use error::{ErrorCategory, ModelError};
pub use model::{
    EnumElement, Example, ExampleProperty, Field, Model, ModelKind, ScalarKind, ScalarValue,
    UseCaseDetail, UseCaseExample,
};
pub use profile::{
    AstNode, Definition, EnumValueNode, FieldNode, KnownDefinition, NamedFieldDefinition,
    NamedModelDefinition, ProfileAst, ProfileHeader, ProfileVersion, TypeNode, UnrecognizedNode,
    UseCaseDefinition, UseCaseExampleNode,
};
pub use provider::{IntegrationParameter, ProviderDefinition, ProviderService, SecurityScheme};
