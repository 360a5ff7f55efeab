#![deny(missing_docs)]

//! # Resolver Configuration
//!
//! Options controlling naming and diagnostics, loadable from YAML.

use crate::error::{AppError, AppResult};
use serde::Deserialize;

/// Configuration shared by every resolution over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Module path that top-level definitions are emitted into (e.g. `models`).
    ///
    /// When set, references to known definitions are qualified as `models::Pet`.
    pub models_module: Option<String>,

    /// Report resolution decisions to `tracing` when no sink is injected.
    pub trace: bool,
}

impl ResolverConfig {
    /// Creates a configuration qualifying known definitions with `module`.
    pub fn with_models_module(module: impl Into<String>) -> Self {
        Self {
            models_module: Some(module.into()),
            ..Self::default()
        }
    }

    /// Parses a configuration from YAML (JSON is accepted as a YAML subset).
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Document(format!("Failed to parse resolver config: {}", e)))
    }

    /// The configured models module, treating an empty string as unset.
    pub fn models_module(&self) -> Option<&str> {
        self.models_module.as_deref().filter(|m| !m.is_empty())
    }
}
