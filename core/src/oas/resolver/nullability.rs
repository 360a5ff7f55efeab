#![deny(missing_docs)]

//! # Nullability Rules
//!
//! Decides whether a field needs an `Option` indirection.
//!
//! A value can be "possibly absent" for several independent reasons: an explicit
//! `x-nullable` / `x-isnullable` override, required-ness, a non-zero default, `readOnly`,
//! and boundary facets where the zero value is itself meaningful (`minimum: 0`, a range
//! spanning zero, `minLength: 0`). Each category gets one pure predicate over the
//! [`NullabilityFacts`] of a schema; the extension override wins everywhere except on
//! binary streams, which are never nullable.

use crate::oas::schema::{SchemaNode, X_IS_NULLABLE, X_NULLABLE};
use crate::type_mapping::is_binary_format;
use serde_json::Value;

/// The rule family a schema is judged by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullableCategory {
    /// `boolean`.
    Boolean,
    /// `integer` and `number`, with or without a format.
    Numeric,
    /// Plain `string`.
    String,
    /// `string` with a format from the format table.
    FormattedString,
    /// `file` kinds: never nullable.
    Stream,
    /// Objects, compositions and references.
    Structural,
}

/// Everything the rules look at, extracted from a schema and its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullabilityFacts {
    /// The container lists the field as required.
    pub required: bool,
    /// A default is declared and it is not the zero value of its type.
    pub has_default: bool,
    /// Any default is declared, zero or not.
    pub declares_default: bool,
    /// `readOnly: true`.
    pub read_only: bool,
    /// The force-nullable extension, when set to a boolean.
    pub extension: Option<bool>,
    /// Either spelling of the force-nullable extension is `true`.
    pub forced: bool,
    /// Format is `binary`.
    pub binary: bool,
    /// `minimum`.
    pub minimum: Option<f64>,
    /// `maximum`.
    pub maximum: Option<f64>,
    /// `minLength`.
    pub min_length: Option<u64>,
    /// At least one declared property.
    pub has_properties: bool,
    /// At least one `allOf` branch.
    pub is_composed: bool,
}

impl NullabilityFacts {
    /// Extracts the facts of `schema` occurring with the given required-ness.
    pub fn from_schema(schema: &SchemaNode, required: bool) -> Self {
        Self {
            required,
            has_default: schema.default.as_ref().is_some_and(|d| !is_zero_value(d)),
            declares_default: schema.default.is_some(),
            read_only: schema.read_only,
            extension: schema.nullable_extension(),
            forced: [X_NULLABLE, X_IS_NULLABLE]
                .iter()
                .any(|key| schema.bool_extension(key) == Some(true)),
            binary: schema.format.as_deref().is_some_and(is_binary_format),
            minimum: schema.minimum,
            maximum: schema.maximum,
            min_length: schema.min_length,
            has_properties: !schema.properties.is_empty(),
            is_composed: !schema.all_of.is_empty(),
        }
    }
}

/// A nullability predicate.
pub type Rule = fn(&NullabilityFacts) -> bool;

const RULES: &[(NullableCategory, Rule)] = &[
    (NullableCategory::Boolean, boolean_rule),
    (NullableCategory::Numeric, numeric_rule),
    (NullableCategory::String, string_rule),
    (NullableCategory::FormattedString, formatted_string_rule),
    (NullableCategory::Stream, stream_rule),
    (NullableCategory::Structural, structural_rule),
];

/// The predicate for `category`.
pub fn rule_for(category: NullableCategory) -> Rule {
    RULES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, rule)| *rule)
        .unwrap_or(stream_rule)
}

/// Evaluates the `category` rule for `schema` occurring with the given required-ness.
pub fn is_nullable(category: NullableCategory, schema: &SchemaNode, required: bool) -> bool {
    rule_for(category)(&NullabilityFacts::from_schema(schema, required))
}

/// Structural nullability of a schema regardless of its container.
///
/// Used for references, array elements, map values and composition branches.
pub fn is_structurally_nullable(schema: &SchemaNode) -> bool {
    is_nullable(NullableCategory::Structural, schema, false)
}

fn boolean_rule(f: &NullabilityFacts) -> bool {
    if let Some(forced) = f.extension {
        return forced;
    }
    let required = f.required && !f.declares_default && !f.read_only;
    let optional = !f.required && (f.declares_default || f.read_only);
    required || optional
}

fn numeric_rule(f: &NullabilityFacts) -> bool {
    if let Some(forced) = f.extension {
        return forced;
    }
    let is_min = f.minimum.is_some_and(|m| m != 0.0);
    let bc_min = f.minimum == Some(0.0);
    let is_max = f.minimum.is_none() && f.maximum.is_some_and(|m| m != 0.0);
    let bc_max = f.maximum == Some(0.0);
    let (is_min_max, bc_min_max) = match (f.minimum, f.maximum) {
        (Some(min), Some(max)) => (min < max, min < 0.0 && 0.0 < max),
        _ => (false, false),
    };

    !f.read_only
        && (f.required
            || (f.has_default && !(is_min || is_max || is_min_max))
            || bc_min
            || bc_max
            || bc_min_max)
}

fn string_rule(f: &NullabilityFacts) -> bool {
    if let Some(forced) = f.extension {
        return forced;
    }
    let is_min = f.min_length.is_some_and(|m| m != 0);
    let bc_min = f.min_length == Some(0);

    !f.read_only && (f.required || (f.has_default && !is_min) || bc_min)
}

fn formatted_string_rule(f: &NullabilityFacts) -> bool {
    if f.binary {
        return false;
    }
    if let Some(forced) = f.extension {
        return forced;
    }
    !f.read_only && (f.required || f.has_default)
}

fn stream_rule(_: &NullabilityFacts) -> bool {
    false
}

fn structural_rule(f: &NullabilityFacts) -> bool {
    f.forced || f.has_properties || f.is_composed
}

/// Whether a default value is the zero value of its JSON type.
fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
