//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Resolution itself only ever fails with `UnresolvedReference` or
/// `UnresolvableType`; the remaining variants belong to document and
/// configuration loading.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A `$ref` pointer that does not dereference within the document.
    #[from(ignore)]
    #[display("Unresolved reference: {_0}")]
    UnresolvedReference(String),

    /// A type/format combination that matches no resolution branch.
    #[from(ignore)]
    #[display("unresolvable: {types:?} (format {format:?})")]
    UnresolvableType {
        /// The declared type tags of the offending schema.
        types: Vec<String>,
        /// The declared format of the offending schema.
        format: Option<String>,
    },

    /// Document or configuration text that could not be parsed.
    #[from(ignore)]
    #[display("Document Error: {_0}")]
    Document(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
