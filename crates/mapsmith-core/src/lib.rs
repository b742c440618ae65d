//! Mapsmith Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Mapsmith
//! integration scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          mapsmith-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (GenerateService)             │
//! │  Resolver · Synthesizer · ExampleParser │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (TemplateSetStore, DocumentSink)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    mapsmith-adapters (Infrastructure)   │
//! │ (InMemorySetStore, LocalDocumentSink..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Data)         │
//! │  (Model, Example, UseCaseDetail, AST)   │
//! │        No External Side Effects         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The template engine lives in the core (its semantics are part of the
//! output contract); template *content* lives in the adapters crate.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mapsmith_core::prelude::*;
//!
//! fn generate_map(
//!     store: Box<dyn TemplateSetStore>,
//!     profile: &ProfileAst,
//!     provider: &ProviderDefinition,
//! ) -> MapsmithResult<()> {
//!     let service = GenerateService::new(store);
//!     let document = service.generate(profile, provider, DocumentKind::Map)?;
//!     println!("{}", document.contents);
//!     Ok(())
//! }
//! ```

// Domain layer (stable, well-defined data shapes)
pub mod domain;

// Application layer (resolution, synthesis, orchestration)
pub mod application;

// Template engine (compilation and rendering)
pub mod engine;

// Unified error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, GeneratedDocument, ParsedCurl, ResolveContext, ResolvedRequest,
        build_use_case_details,
        ports::{DocumentSink, TemplateSetStore},
    };
    pub use crate::domain::{
        DocumentFormat, DocumentKind, Example, Field, Model, ModelKind, ProfileAst,
        ProviderDefinition, ScalarKind, UseCaseDetail,
    };
    pub use crate::engine::{TemplateEngine, TemplateSet};
    pub use crate::error::{MapsmithError, MapsmithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
