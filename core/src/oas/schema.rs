#![deny(missing_docs)]

//! # Schema Nodes
//!
//! Deserialization layer for a single schema definition, covering both Swagger 2.0
//! (`discriminator: "kind"`) and OpenAPI 3.x (`discriminator: { propertyName: kind }`) forms.
//!
//! Only the facets that influence type resolution get dedicated fields. Every other key,
//! vendor extensions included, is kept in `extra`.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Boolean extension forcing (or preventing) nullability. Checked first.
pub const X_NULLABLE: &str = "x-nullable";
/// Alternate spelling of [`X_NULLABLE`].
pub const X_IS_NULLABLE: &str = "x-isnullable";
/// String extension overriding the exported type name.
pub const X_RUST_NAME: &str = "x-rust-name";

/// A single schema definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Type tags. Empty means an implicit `object`.
    #[serde(rename = "type", default, deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    /// Format qualifier (e.g. `int64`, `date-time`).
    #[serde(default)]
    pub format: Option<String>,
    /// `$ref` pointer.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    /// Declared properties, in document order.
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,
    /// Names of required properties.
    #[serde(default)]
    pub required: Vec<String>,
    /// Array item schema(s).
    #[serde(default)]
    pub items: Option<SchemaItems>,
    /// Policy for items beyond a tuple's positional schemas.
    #[serde(default)]
    pub additional_items: Option<SchemaOrBool>,
    /// Policy for undeclared object properties.
    #[serde(default)]
    pub additional_properties: Option<SchemaOrBool>,
    /// Composition branches.
    #[serde(default)]
    pub all_of: Vec<SchemaNode>,
    /// Discriminator property name.
    #[serde(default, deserialize_with = "discriminator_name")]
    pub discriminator: Option<String>,
    /// Default value.
    #[serde(default)]
    pub default: Option<Value>,
    /// Whether the value is only ever sent by the server.
    #[serde(default)]
    pub read_only: bool,
    /// Inclusive numeric lower bound.
    #[serde(default)]
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(default)]
    pub maximum: Option<f64>,
    /// Minimum string length.
    #[serde(default)]
    pub min_length: Option<u64>,
    /// Every other key, including `x-` extensions.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `items` keyword: one schema for every element, or positional schemas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaItems {
    /// Positional item schemas (tuple form).
    Tuple(Vec<SchemaNode>),
    /// A single schema for all elements.
    Single(Box<SchemaNode>),
}

/// A keyword accepting either a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrBool {
    /// `true` allows anything, `false` forbids.
    Bool(bool),
    /// A typed catch-all.
    Schema(Box<SchemaNode>),
}

impl SchemaOrBool {
    /// The typed catch-all schema, if any.
    pub fn schema(&self) -> Option<&SchemaNode> {
        match self {
            SchemaOrBool::Schema(s) => Some(s),
            SchemaOrBool::Bool(_) => None,
        }
    }

    /// Whether extra entries are permitted at all.
    pub fn allows(&self) -> bool {
        match self {
            SchemaOrBool::Bool(b) => *b,
            SchemaOrBool::Schema(_) => true,
        }
    }
}

impl SchemaNode {
    /// Parses a schema from a JSON value.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// The first type tag, defaulting to `object` when none is declared.
    pub fn first_type(&self) -> &str {
        match self.types.first() {
            Some(t) if !t.is_empty() => t.as_str(),
            _ => "object",
        }
    }

    /// Looks up a vendor extension (`x-` key).
    pub fn extension(&self, key: &str) -> Option<&Value> {
        if !key.starts_with("x-") {
            return None;
        }
        self.extra.get(key)
    }

    /// Iterates the vendor extensions.
    pub fn extensions(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra.iter().filter(|(k, _)| k.starts_with("x-"))
    }

    /// Reads a boolean extension, ignoring values of any other JSON type.
    pub fn bool_extension(&self, key: &str) -> Option<bool> {
        self.extension(key).and_then(Value::as_bool)
    }

    /// The force-nullable override (`x-nullable`, then `x-isnullable`).
    pub fn nullable_extension(&self) -> Option<bool> {
        self.bool_extension(X_NULLABLE)
            .or_else(|| self.bool_extension(X_IS_NULLABLE))
    }

    /// The exported-name override, if declared.
    pub fn name_override(&self) -> Option<&str> {
        self.extension(X_RUST_NAME)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Whether the property `name` is listed as required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// The typed `additionalProperties` schema, if any.
    pub fn additional_properties_schema(&self) -> Option<&SchemaNode> {
        self.additional_properties.as_ref().and_then(SchemaOrBool::schema)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(t)) => vec![t],
        Some(OneOrMany::Many(ts)) => ts,
        None => Vec::new(),
    })
}

fn discriminator_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DiscriminatorObject {
        property_name: String,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Discriminator {
        Name(String),
        Object(DiscriminatorObject),
    }

    let name = match Option::<Discriminator>::deserialize(deserializer)? {
        Some(Discriminator::Name(n)) => n,
        Some(Discriminator::Object(o)) => o.property_name,
        None => return Ok(None),
    };
    Ok(Some(name).filter(|n| !n.is_empty()))
}
