#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Turns schema names into Rust type identifiers, qualifies known definitions with the
//! models module, and wraps named non-object shapes as aliases.

use crate::oas::registry::KnownDefinitions;
use crate::oas::resolver::types::ResolvedType;
use heck::ToPascalCase;

/// Converts a schema name into an exported Rust type identifier.
///
/// e.g. `pet_owner` -> `PetOwner`, `404` -> `Nr404`
pub fn to_type_name(name: &str) -> String {
    let ident: String = name
        .to_pascal_case()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    match ident.chars().next() {
        None => ident,
        Some(first) if first.is_numeric() => format!("Nr{}", ident),
        Some(_) if ident == "Self" => "SelfType".to_string(),
        Some(_) => ident,
    }
}

/// Assigns type names for one document.
#[derive(Debug, Clone, Copy)]
pub struct NameAssigner<'a> {
    known: &'a KnownDefinitions,
    models_module: Option<&'a str>,
}

impl<'a> NameAssigner<'a> {
    /// Creates an assigner qualifying `known` definitions with `models_module`, if set.
    pub fn new(known: &'a KnownDefinitions, models_module: Option<&'a str>) -> Self {
        Self {
            known,
            models_module: models_module.filter(|m| !m.is_empty()),
        }
    }

    /// The Rust type name for the schema called `name`.
    pub fn type_name(&self, name: &str) -> String {
        match self.models_module {
            Some(module) if self.known.contains(name) => {
                format!("{}::{}", module, to_type_name(name))
            }
            _ => to_type_name(name),
        }
    }

    /// Marks a named, non-anonymous resolution as an alias of its current shape.
    ///
    /// The current target name moves to `aliased_type` and the model's own name takes its
    /// place. Anonymous occurrences and resolutions without a model name are left as is.
    pub fn infer_aliasing(
        &self,
        result: &mut ResolvedType,
        model_name: Option<&str>,
        anonymous: bool,
    ) {
        let Some(model) = model_name.filter(|m| !m.is_empty()) else {
            return;
        };
        if anonymous {
            return;
        }
        let underlying = std::mem::replace(&mut result.target_type, self.type_name(model));
        result.aliased_type = Some(underlying);
    }
}
