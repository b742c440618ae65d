//! Application layer: resolution, synthesis, classification and the
//! generation service, plus the driven ports infrastructure implements.

pub mod context;
pub mod curl;
pub mod detail;
pub mod error;
pub mod example_parser;
pub mod ports;
pub mod resolver;
pub mod services;
pub mod synthesizer;

pub use context::ResolveContext;
pub use curl::{ParsedCurl, ResolvedRequest};
pub use detail::build_use_case_details;
pub use error::ApplicationError;
pub use services::{GenerateService, GeneratedDocument};
