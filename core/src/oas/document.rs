#![deny(missing_docs)]

//! # Schema Document
//!
//! The parsed API document handed to the resolver: its top-level definitions plus
//! JSON Pointer lookup into them.
//!
//! Both Swagger 2.0 (`definitions`) and OpenAPI 3.x (`components/schemas`) layouts are
//! accepted. The document is read-only once loaded.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::{normalize_ref_to_local, pointer_segments};
use crate::oas::schema::{SchemaItems, SchemaNode, SchemaOrBool};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Where the top-level definitions live inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionsSection {
    /// Swagger 2.0 `#/definitions`.
    Definitions,
    /// OpenAPI 3.x `#/components/schemas`.
    ComponentSchemas,
}

impl DefinitionsSection {
    /// The pointer prefix of a definition named `name`.
    pub fn pointer_for(&self, name: &str) -> String {
        let escaped = name.replace('~', "~0").replace('/', "~1");
        match self {
            DefinitionsSection::Definitions => format!("#/definitions/{}", escaped),
            DefinitionsSection::ComponentSchemas => format!("#/components/schemas/{}", escaped),
        }
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "$self", default)]
    self_uri: Option<String>,
    #[serde(default)]
    definitions: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    components: Option<RawComponents>,
}

#[derive(Deserialize)]
struct RawComponents {
    #[serde(default)]
    schemas: IndexMap<String, SchemaNode>,
}

/// A loaded API document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    definitions: IndexMap<String, SchemaNode>,
    section: DefinitionsSection,
    self_uri: Option<String>,
}

impl SchemaDocument {
    /// Builds a document directly from named definitions.
    pub fn new(definitions: IndexMap<String, SchemaNode>) -> Self {
        Self {
            definitions,
            section: DefinitionsSection::Definitions,
            self_uri: None,
        }
    }

    /// Parses a document from YAML (or JSON, which YAML accepts).
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let raw: JsonValue = serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Document(format!("Failed to parse document YAML: {}", e)))?;
        Self::from_value(raw)
    }

    /// Parses a document from JSON text.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let raw: JsonValue = serde_json::from_str(json)
            .map_err(|e| AppError::Document(format!("Failed to parse document JSON: {}", e)))?;
        Self::from_value(raw)
    }

    /// Reads a document from disk; `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// The path becomes the retrieval URI unless the document declares `$self`.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let doc = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_yaml_str(&content)?,
        };
        if doc.self_uri.is_some() {
            return Ok(doc);
        }
        Ok(doc.with_retrieval_uri(path.to_string_lossy()))
    }

    /// Builds a document from an already parsed JSON value.
    pub fn from_value(raw: JsonValue) -> AppResult<Self> {
        let raw: RawDocument = serde_json::from_value(raw)
            .map_err(|e| AppError::Document(format!("Failed to read schema definitions: {}", e)))?;

        let (definitions, section) = match (raw.definitions, raw.components) {
            (Some(defs), _) => (defs, DefinitionsSection::Definitions),
            (None, Some(comps)) => (comps.schemas, DefinitionsSection::ComponentSchemas),
            (None, None) => (IndexMap::new(), DefinitionsSection::Definitions),
        };

        Ok(Self {
            definitions,
            section,
            self_uri: raw.self_uri,
        })
    }

    /// Sets the URI the document was retrieved from, used to recognise absolute self references.
    pub fn with_retrieval_uri(mut self, uri: impl Into<String>) -> Self {
        self.self_uri = Some(uri.into());
        self
    }

    /// The document's own URI (`$self` or retrieval URI).
    pub fn self_uri(&self) -> Option<&str> {
        self.self_uri.as_deref()
    }

    /// Which section the definitions were read from.
    pub fn section(&self) -> DefinitionsSection {
        self.section
    }

    /// Top-level definitions in document order.
    pub fn definitions(&self) -> &IndexMap<String, SchemaNode> {
        &self.definitions
    }

    /// A top-level definition by name.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions.get(name)
    }

    /// Normalizes `ref_str` to the local pointer it designates in this document.
    pub fn local_pointer(&self, ref_str: &str) -> AppResult<String> {
        normalize_ref_to_local(ref_str, self.self_uri())
            .ok_or_else(|| AppError::UnresolvedReference(ref_str.to_string()))
    }

    /// Dereferences a `$ref` pointer to the schema node it designates.
    pub fn lookup(&self, ref_str: &str) -> AppResult<&SchemaNode> {
        let unresolved = || AppError::UnresolvedReference(ref_str.to_string());

        let local = self.local_pointer(ref_str)?;
        let segments = pointer_segments(&local).ok_or_else(unresolved)?;

        let rest = match (self.section, segments.as_slice()) {
            (DefinitionsSection::Definitions, [root, rest @ ..]) if root == "definitions" => rest,
            (DefinitionsSection::ComponentSchemas, [root, section, rest @ ..])
                if root == "components" && section == "schemas" =>
            {
                rest
            }
            _ => return Err(unresolved()),
        };

        let (name, path) = rest.split_first().ok_or_else(unresolved)?;
        let root = self.definitions.get(name).ok_or_else(unresolved)?;
        walk(root, path).ok_or_else(unresolved)
    }
}

fn walk<'a>(node: &'a SchemaNode, path: &[String]) -> Option<&'a SchemaNode> {
    let Some((head, tail)) = path.split_first() else {
        return Some(node);
    };
    match head.as_str() {
        "properties" => {
            let (name, tail) = tail.split_first()?;
            walk(node.properties.get(name)?, tail)
        }
        "allOf" => {
            let (idx, tail) = tail.split_first()?;
            walk(node.all_of.get(idx.parse::<usize>().ok()?)?, tail)
        }
        "items" => match node.items.as_ref()? {
            SchemaItems::Single(item) => walk(item, tail),
            SchemaItems::Tuple(slots) => {
                let (idx, tail) = tail.split_first()?;
                walk(slots.get(idx.parse::<usize>().ok()?)?, tail)
            }
        },
        "additionalProperties" => match node.additional_properties.as_ref()? {
            SchemaOrBool::Schema(s) => walk(s, tail),
            SchemaOrBool::Bool(_) => None,
        },
        "additionalItems" => match node.additional_items.as_ref()? {
            SchemaOrBool::Schema(s) => walk(s, tail),
            SchemaOrBool::Bool(_) => None,
        },
        _ => None,
    }
}
