//! Application services.
//!
//! Services orchestrate the domain and the application ports; they hold no
//! business rules themselves.

mod generate_service;

pub use generate_service::{GeneratedDocument, GenerateService};
