#![deny(missing_docs)]

//! # CDD Resolver
//!
//! Resolves the schema nodes of an OpenAPI / Swagger document into descriptions of the
//! Rust types generated code should use for them.

/// Shared error types.
pub mod error;

/// Resolver configuration.
pub mod config;

/// Side-channel reporting of resolution decisions.
pub mod diagnostics;

/// Format and kind tables (schema -> Rust type names).
pub mod type_mapping;

/// OpenAPI (OAS) document model and type resolution.
pub mod oas;

pub use config::ResolverConfig;
pub use diagnostics::{Branch, DiagnosticsSink, RecordingSink, TraceEvent, TracingSink};
pub use error::{AppError, AppResult};
pub use oas::{
    resolve_simple_type, DefinitionsSection, KnownDefinitions, ResolvedType, SchemaDocument,
    SchemaItems, SchemaNode, SchemaOrBool, TypeCategory, TypeResolver, TypeShape,
};
