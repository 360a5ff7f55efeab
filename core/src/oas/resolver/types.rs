#![deny(missing_docs)]

//! # Resolved Types
//!
//! The output of schema resolution: the shape a generated program should use for a schema
//! node, its Rust type name, and the facets emission needs (nullability, streams, custom
//! formatters, discriminators, aliasing).

use crate::type_mapping::{self, DYNAMIC_TYPE};
use std::fmt;

/// Structural shape of a resolved type.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TypeShape {
    /// A scalar mapped through the format or kind tables.
    Primitive,
    /// A homogeneous list of the element type.
    Array(Box<ResolvedType>),
    /// Positional slots, one resolved type per slot.
    Tuple(Vec<ResolvedType>),
    /// String-keyed map of the value type.
    Map(Box<ResolvedType>),
    /// A structured or composed object.
    Object,
    /// No declared structure: any JSON value.
    #[default]
    OpenRecord,
}

/// The single category a resolved type is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// See [`TypeShape::Primitive`].
    Primitive,
    /// See [`TypeShape::Array`].
    Array,
    /// See [`TypeShape::Tuple`].
    Tuple,
    /// See [`TypeShape::Map`].
    Map,
    /// See [`TypeShape::Object`].
    Object,
    /// See [`TypeShape::OpenRecord`].
    OpenRecord,
    /// A named type wrapping a non-object shape.
    Alias,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCategory::Primitive => "primitive",
            TypeCategory::Array => "array",
            TypeCategory::Tuple => "tuple",
            TypeCategory::Map => "map",
            TypeCategory::Object => "object",
            TypeCategory::OpenRecord => "open-record",
            TypeCategory::Alias => "alias",
        };
        write!(f, "{}", name)
    }
}

/// A schema node resolved for use in generated code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedType {
    /// Underlying structural shape.
    pub shape: TypeShape,
    /// Rust type name to use for values of this node.
    ///
    /// Empty for anonymous inline objects, which emission names itself.
    pub target_type: String,
    /// For aliases, the type name of the wrapped shape.
    pub aliased_type: Option<String>,
    /// Schema type tag the resolution was derived from.
    pub schema_type: String,
    /// Schema format the resolution was derived from.
    pub schema_format: Option<String>,
    /// Values may be absent and need an `Option` indirection.
    pub nullable: bool,
    /// Binary payload.
    pub is_stream: bool,
    /// Needs dedicated (de)serialization code.
    pub is_custom_formatter: bool,
    /// The (referenced) schema declares a discriminator.
    pub has_discriminator: bool,
    /// The schema itself declares a discriminator, making it a polymorphic base.
    pub is_base_type: bool,
    /// Built from `allOf` branches.
    pub is_composed: bool,
    /// Permits items beyond the declared positional ones.
    pub has_additional_items: bool,
    /// Resolved as an anonymous (inline) occurrence.
    pub is_anonymous: bool,
    /// Reached through a `$ref`.
    pub is_reference: bool,
}

impl ResolvedType {
    /// The dynamic shape used for absent or unconstrained schemas.
    pub fn dynamic() -> Self {
        Self {
            shape: TypeShape::OpenRecord,
            target_type: DYNAMIC_TYPE.to_string(),
            schema_type: "object".to_string(),
            ..Self::default()
        }
    }

    /// Whether this is a named alias of another shape.
    pub fn is_alias(&self) -> bool {
        self.aliased_type.is_some()
    }

    /// The reported category; `Alias` takes precedence over the shape.
    pub fn category(&self) -> TypeCategory {
        if self.is_alias() {
            return TypeCategory::Alias;
        }
        self.underlying()
    }

    /// The shape category, ignoring aliasing.
    pub fn underlying(&self) -> TypeCategory {
        match self.shape {
            TypeShape::Primitive => TypeCategory::Primitive,
            TypeShape::Array(_) => TypeCategory::Array,
            TypeShape::Tuple(_) => TypeCategory::Tuple,
            TypeShape::Map(_) => TypeCategory::Map,
            TypeShape::Object => TypeCategory::Object,
            TypeShape::OpenRecord => TypeCategory::OpenRecord,
        }
    }

    /// Element type of an array, or value type of a map.
    pub fn element(&self) -> Option<&ResolvedType> {
        match &self.shape {
            TypeShape::Array(elem) | TypeShape::Map(elem) => Some(elem),
            _ => None,
        }
    }

    /// Positional slot types of a tuple.
    pub fn slots(&self) -> &[ResolvedType] {
        match &self.shape {
            TypeShape::Tuple(slots) => slots,
            _ => &[],
        }
    }

    /// The type name the representation is built from: the aliased name for aliases.
    pub fn representation(&self) -> &str {
        self.aliased_type.as_deref().unwrap_or(&self.target_type)
    }

    /// An initializer expression for a field of this type.
    pub fn zero_value_expression(&self) -> String {
        let tpe = self.representation();
        if let Some(zero) = type_mapping::zero_value(tpe) {
            return zero.to_string();
        }
        match &self.shape {
            TypeShape::Array(_) => "Vec::new()".to_string(),
            TypeShape::Map(_) => "HashMap::new()".to_string(),
            TypeShape::Tuple(_) | TypeShape::Object => {
                let value = default_of(tpe);
                if self.nullable {
                    format!("Some({})", value)
                } else {
                    value
                }
            }
            TypeShape::OpenRecord => "serde_json::Value::Null".to_string(),
            TypeShape::Primitive => default_of(tpe),
        }
    }
}

/// Wraps `tpe` in the nullable indirection unless it already is one.
pub(crate) fn indirect(tpe: &str) -> String {
    if tpe.starts_with("Option<") {
        tpe.to_string()
    } else {
        format!("Option<{}>", tpe)
    }
}

fn default_of(tpe: &str) -> String {
    if tpe.is_empty() {
        return "Default::default()".to_string();
    }
    let is_path = tpe
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':');
    if is_path {
        format!("{}::default()", tpe)
    } else {
        format!("<{}>::default()", tpe)
    }
}
