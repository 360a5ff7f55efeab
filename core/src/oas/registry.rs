#![deny(missing_docs)]

//! # Known Definitions Registry
//!
//! The set of top-level schema names in a document, plus every exported-name override
//! declared on them. Built once before resolution starts and read-only afterwards.

use crate::oas::document::SchemaDocument;
use crate::oas::schema::SchemaNode;
use std::collections::HashSet;

/// Names that belong to the shared models module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDefinitions {
    names: HashSet<String>,
}

impl KnownDefinitions {
    /// Collects the definitions of `doc`.
    pub fn from_document(doc: &SchemaDocument) -> Self {
        Self::from_definitions(doc.definitions())
    }

    /// Collects names from `(name, schema)` pairs, registering `x-rust-name` overrides too.
    pub fn from_definitions<'a, I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a SchemaNode)>,
    {
        let mut names = HashSet::with_capacity(64);
        for (name, schema) in definitions {
            names.insert(name.clone());
            if let Some(exported) = schema.name_override() {
                names.insert(exported.to_string());
            }
        }
        Self { names }
    }

    /// Whether `name` is a known top-level definition (or override).
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
