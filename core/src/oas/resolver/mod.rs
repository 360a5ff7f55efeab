#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving schema nodes into Rust type descriptions.
//!
//! Handles:
//! - Reference resolution (with cycle detection) and target naming.
//! - Format overrides, primitives, arrays, tuples, maps, compositions and open records.
//! - Nullability via the rules in [`nullability`].
//! - Alias inference for named non-object shapes via [`naming`].
//! - Header-only simple types.
//!
//! Resolution is pure: the document and the known-definitions registry are only read, and
//! re-resolving a node with the same flags yields an equal result. Nothing is cached here;
//! callers that need a node's resolution repeatedly should keep it.

pub mod naming;
pub mod nullability;
pub mod types;

use crate::config::ResolverConfig;
use crate::diagnostics::{Branch, DiagnosticsSink, TraceEvent, TracingSink};
use crate::error::{AppError, AppResult};
use crate::oas::document::SchemaDocument;
use crate::oas::ref_utils::ref_name;
use crate::oas::registry::KnownDefinitions;
use crate::oas::schema::{SchemaItems, SchemaNode};
use crate::type_mapping::{
    format_type, is_binary_format, is_custom_formatter, kind_type, DYNAMIC_TYPE,
};
use indexmap::IndexMap;
use rayon::prelude::*;

pub use naming::{to_type_name, NameAssigner};
pub use nullability::{is_nullable, is_structurally_nullable, NullabilityFacts, NullableCategory};
pub use types::{ResolvedType, TypeCategory, TypeShape};

use types::indirect;

static TRACING_SINK: TracingSink = TracingSink;

/// A `$ref` pointer currently being expanded, linked to the ones above it.
struct RefFrame<'s> {
    pointer: &'s str,
    parent: Option<&'s RefFrame<'s>>,
}

impl RefFrame<'_> {
    fn contains(&self, pointer: &str) -> bool {
        let mut frame = Some(self);
        while let Some(f) = frame {
            if f.pointer == pointer {
                return true;
            }
            frame = f.parent;
        }
        false
    }
}

/// Per-call state threaded through the recursion.
#[derive(Clone, Copy)]
struct Scope<'s> {
    model: Option<&'s str>,
    stack: Option<&'s RefFrame<'s>>,
}

impl Scope<'_> {
    fn expanding(&self, pointer: &str) -> bool {
        self.stack.is_some_and(|frame| frame.contains(pointer))
    }
}

/// Resolves schema nodes of one document.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    doc: &'a SchemaDocument,
    names: NameAssigner<'a>,
    model_name: Option<&'a str>,
    sink: Option<&'a dyn DiagnosticsSink>,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over `doc`.
    ///
    /// `known` should be built from the same document; `config.trace` attaches the
    /// `tracing` sink.
    pub fn new(
        doc: &'a SchemaDocument,
        known: &'a KnownDefinitions,
        config: &'a ResolverConfig,
    ) -> Self {
        let sink: Option<&'a dyn DiagnosticsSink> = if config.trace {
            Some(&TRACING_SINK)
        } else {
            None
        };
        Self {
            doc,
            names: NameAssigner::new(known, config.models_module()),
            model_name: None,
            sink,
        }
    }

    /// Reports every decision to `sink`.
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticsSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// A resolver for the named schema `name` (used for aliasing and object names).
    pub fn for_model(&self, name: &'a str) -> Self {
        Self {
            model_name: Some(name),
            ..*self
        }
    }

    /// The schema name this resolver resolves for, if any.
    pub fn model_name(&self) -> Option<&'a str> {
        self.model_name
    }

    /// The naming rules in use.
    pub fn names(&self) -> &NameAssigner<'a> {
        &self.names
    }

    /// Resolves `node`. An absent node resolves to the dynamic shape.
    ///
    /// * `anonymous` - the node is an inline occurrence rather than the named model itself.
    /// * `required` - the node's container lists it as required.
    pub fn resolve(
        &self,
        node: Option<&SchemaNode>,
        anonymous: bool,
        required: bool,
    ) -> AppResult<ResolvedType> {
        self.resolve_in(node, anonymous, required, self.root_scope())
    }

    /// Resolves a node that is known to be present.
    pub fn resolve_schema(
        &self,
        node: &SchemaNode,
        anonymous: bool,
        required: bool,
    ) -> AppResult<ResolvedType> {
        self.resolve(Some(node), anonymous, required)
    }

    /// Resolves a header-only schema: format table, kind table and arrays, no nullability.
    pub fn resolve_header_type(&self, node: &SchemaNode) -> ResolvedType {
        let items = match &node.items {
            Some(SchemaItems::Single(item)) => Some(item.as_ref()),
            _ => None,
        };
        let result = simple_resolved_type(node.first_type(), node.format.as_deref(), items);
        self.trace(Branch::Header, self.root_scope(), true, false, &result);
        result
    }

    /// Resolves every declared property of `node`, taking required-ness from its
    /// `required` list.
    pub fn resolve_properties(&self, node: &SchemaNode) -> AppResult<Vec<(String, ResolvedType)>> {
        node.properties
            .iter()
            .map(|(name, prop)| {
                let rt = self.resolve_schema(prop, true, node.is_required(name))?;
                Ok((name.clone(), rt))
            })
            .collect()
    }

    /// Resolves every top-level definition as its own named model, in document order.
    ///
    /// A definition declaring `x-rust-name` is named after the override, as references to it are.
    pub fn resolve_definitions(&self) -> AppResult<IndexMap<String, ResolvedType>> {
        let doc: &'a SchemaDocument = self.doc;
        doc.definitions()
            .iter()
            .map(|(name, node)| {
                let model = node.name_override().unwrap_or(name);
                let rt = self.for_model(model).resolve_schema(node, false, false)?;
                Ok((name.clone(), rt))
            })
            .collect()
    }

    /// Same as [`TypeResolver::resolve_definitions`], resolving definitions in parallel.
    pub fn par_resolve_definitions(&self) -> AppResult<IndexMap<String, ResolvedType>> {
        let doc: &'a SchemaDocument = self.doc;
        let entries: Vec<(&'a String, &'a SchemaNode)> = doc.definitions().iter().collect();
        let resolved = entries
            .par_iter()
            .map(|&(name, node)| {
                let model = node.name_override().unwrap_or(name);
                let rt = self.for_model(model).resolve_schema(node, false, false)?;
                Ok((name.clone(), rt))
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(resolved.into_iter().collect())
    }

    fn root_scope(&self) -> Scope<'a> {
        Scope {
            model: self.model_name,
            stack: None,
        }
    }

    fn resolve_in(
        &self,
        node: Option<&SchemaNode>,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> AppResult<ResolvedType> {
        let Some(node) = node else {
            let result = ResolvedType {
                is_anonymous: anonymous,
                ..ResolvedType::dynamic()
            };
            self.trace(Branch::Absent, scope, anonymous, required, &result);
            return Ok(result);
        };

        if let Some(reference) = node.reference.as_deref() {
            return self.resolve_reference(reference, anonymous, required, scope);
        }

        if let Some(result) = self.resolve_format(node, anonymous, required, scope) {
            return Ok(result);
        }

        match node.first_type() {
            "array" => self.resolve_array(node, anonymous, required, scope),
            kind @ ("file" | "number" | "integer" | "boolean") => {
                Ok(self.resolve_primitive(node, kind, anonymous, required, scope))
            }
            "string" => Ok(self.resolve_string(node, anonymous, required, scope)),
            "object" => self.resolve_object(node, anonymous, required, scope),
            _ => Err(AppError::UnresolvableType {
                types: node.types.clone(),
                format: node.format.clone(),
            }),
        }
    }

    fn resolve_reference(
        &self,
        reference: &str,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> AppResult<ResolvedType> {
        let pointer = self.doc.local_pointer(reference)?;
        let target = self.doc.lookup(reference)?;
        let name = target
            .name_override()
            .map(str::to_string)
            .or_else(|| ref_name(reference))
            .ok_or_else(|| AppError::UnresolvedReference(reference.to_string()))?;

        if scope.expanding(&pointer) {
            let result = ResolvedType {
                shape: TypeShape::Object,
                target_type: self.names.type_name(&name),
                schema_type: target.first_type().to_string(),
                nullable: is_structurally_nullable(target),
                has_discriminator: target.discriminator.is_some(),
                is_base_type: target.discriminator.is_some(),
                is_anonymous: anonymous,
                is_reference: true,
                ..ResolvedType::default()
            };
            self.trace(Branch::ReferenceCycle, scope, anonymous, required, &result);
            return Ok(result);
        }

        let frame = RefFrame {
            pointer: &pointer,
            parent: scope.stack,
        };
        let inner = Scope {
            model: Some(&name),
            stack: Some(&frame),
        };
        let mut result = self.resolve_in(Some(target), false, required, inner)?;

        result.target_type = self.names.type_name(&name);
        result.has_discriminator = target.discriminator.is_some();
        result.nullable = is_structurally_nullable(target);
        result.is_anonymous = anonymous;
        result.is_reference = true;
        if !anonymous
            && matches!(
                result.shape,
                TypeShape::Map(_) | TypeShape::Array(_) | TypeShape::Tuple(_)
            )
        {
            // a named reference is emitted as its own type, not as a collection literal
            result.shape = TypeShape::Object;
        }

        self.trace(Branch::Reference, scope, anonymous, required, &result);
        Ok(result)
    }

    fn resolve_format(
        &self,
        node: &SchemaNode,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> Option<ResolvedType> {
        let format = node.format.as_deref()?;
        let tpe = format_type(format)?;

        let schema_type = node
            .types
            .first()
            .filter(|t| !t.is_empty())
            .map(String::as_str)
            .unwrap_or("string");
        let binary = is_binary_format(format);

        let mut result = ResolvedType {
            shape: TypeShape::Primitive,
            target_type: tpe.to_string(),
            schema_type: schema_type.to_string(),
            schema_format: Some(format.to_string()),
            is_stream: binary,
            is_custom_formatter: is_custom_formatter(tpe),
            is_anonymous: anonymous,
            ..ResolvedType::default()
        };
        self.alias(&mut result, scope, anonymous, required);

        let category = match schema_type {
            "string" => NullableCategory::FormattedString,
            "number" | "integer" => NullableCategory::Numeric,
            _ => NullableCategory::Structural,
        };
        result.nullable = !binary && is_nullable(category, node, required);

        self.trace(Branch::Format, scope, anonymous, required, &result);
        Some(result)
    }

    fn resolve_array(
        &self,
        node: &SchemaNode,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> AppResult<ResolvedType> {
        let mut result = ResolvedType {
            schema_type: "array".to_string(),
            has_additional_items: node.additional_items.as_ref().is_some_and(|a| a.allows()),
            is_anonymous: anonymous,
            ..ResolvedType::default()
        };

        match &node.items {
            None => {
                let elem = ResolvedType {
                    is_anonymous: true,
                    ..ResolvedType::dynamic()
                };
                result.target_type = format!("Vec<{}>", DYNAMIC_TYPE);
                result.shape = TypeShape::Array(Box::new(elem));
            }
            Some(SchemaItems::Tuple(slots)) => {
                let slots = slots
                    .iter()
                    .map(|slot| self.resolve_element(slot, scope))
                    .collect::<AppResult<Vec<_>>>()?;
                result.target_type = tuple_name(&slots).unwrap_or_default();
                result.shape = TypeShape::Tuple(slots);
            }
            Some(SchemaItems::Single(item)) => {
                let elem = self.resolve_element(item, scope)?;
                result.target_type = element_name(&elem)
                    .map(|name| format!("Vec<{}>", name))
                    .unwrap_or_default();
                result.shape = TypeShape::Array(Box::new(elem));
            }
        }

        self.alias(&mut result, scope, anonymous, required);
        self.trace(Branch::Array, scope, anonymous, required, &result);
        Ok(result)
    }

    /// Resolves an array element or tuple slot; its nullability comes from the item schema.
    fn resolve_element(&self, item: &SchemaNode, scope: Scope<'_>) -> AppResult<ResolvedType> {
        let mut elem = self.resolve_in(Some(item), true, false, scope)?;
        elem.nullable = is_structurally_nullable(item) && !elem.has_discriminator;
        Ok(elem)
    }

    fn resolve_primitive(
        &self,
        node: &SchemaNode,
        kind: &str,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> ResolvedType {
        let tpe = kind_type(kind).unwrap_or(DYNAMIC_TYPE);
        let mut result = ResolvedType {
            shape: TypeShape::Primitive,
            target_type: tpe.to_string(),
            schema_type: kind.to_string(),
            is_stream: kind == "file",
            is_anonymous: anonymous,
            ..ResolvedType::default()
        };
        self.alias(&mut result, scope, anonymous, required);

        let category = match kind {
            "boolean" => NullableCategory::Boolean,
            "number" | "integer" => NullableCategory::Numeric,
            _ => NullableCategory::Stream,
        };
        result.nullable = is_nullable(category, node, required);

        self.trace(Branch::Primitive, scope, anonymous, required, &result);
        result
    }

    fn resolve_string(
        &self,
        node: &SchemaNode,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> ResolvedType {
        let mut result = ResolvedType {
            shape: TypeShape::Primitive,
            target_type: "String".to_string(),
            schema_type: "string".to_string(),
            schema_format: node.format.clone(),
            is_anonymous: anonymous,
            ..ResolvedType::default()
        };
        self.alias(&mut result, scope, anonymous, required);
        result.nullable = is_nullable(NullableCategory::String, node, required);

        self.trace(Branch::String, scope, anonymous, required, &result);
        result
    }

    fn resolve_object(
        &self,
        node: &SchemaNode,
        anonymous: bool,
        required: bool,
        scope: Scope<'_>,
    ) -> AppResult<ResolvedType> {
        let model_type = || scope.model.map(|m| self.names.type_name(m)).unwrap_or_default();

        let mut result = ResolvedType {
            shape: TypeShape::Object,
            schema_type: "object".to_string(),
            has_discriminator: node.discriminator.is_some(),
            is_base_type: node.discriminator.is_some(),
            is_anonymous: anonymous,
            ..ResolvedType::default()
        };
        if !anonymous {
            result.target_type = model_type();
        }

        if !node.all_of.is_empty() {
            result.target_type = model_type();
            result.is_composed = true;
            result.nullable = node.all_of.iter().any(is_structurally_nullable);
            self.trace(Branch::Object, scope, anonymous, required, &result);
            return Ok(result);
        }

        let structured = !node.properties.is_empty();
        if structured {
            result.nullable = is_structurally_nullable(node);
        }

        if let Some(extra) = node.additional_properties_schema() {
            let mut value = self.resolve_in(Some(extra), true, false, scope)?;
            value.nullable = is_structurally_nullable(extra);

            // declared properties take precedence over the open extension
            if !structured {
                result.target_type = element_name(&value)
                    .map(|name| format!("HashMap<String, {}>", name))
                    .unwrap_or_default();
                result.shape = TypeShape::Map(Box::new(value));
                self.alias(&mut result, scope, anonymous, required);
            }
            self.trace(Branch::Object, scope, anonymous, required, &result);
            return Ok(result);
        }

        if !structured {
            result.shape = TypeShape::OpenRecord;
            result.target_type = DYNAMIC_TYPE.to_string();
            result.nullable = false;
        }

        self.trace(Branch::Object, scope, anonymous, required, &result);
        Ok(result)
    }

    fn alias(&self, result: &mut ResolvedType, scope: Scope<'_>, anonymous: bool, required: bool) {
        self.names.infer_aliasing(result, scope.model, anonymous);
        if result.is_alias() {
            self.trace(Branch::Alias, scope, anonymous, required, result);
        }
    }

    fn trace(
        &self,
        branch: Branch,
        scope: Scope<'_>,
        anonymous: bool,
        required: bool,
        result: &ResolvedType,
    ) {
        let Some(sink) = self.sink else {
            return;
        };
        sink.record(&TraceEvent {
            model: scope.model.map(str::to_string),
            branch,
            anonymous,
            required,
            nullable: result.nullable,
            target_type: result.target_type.clone(),
        });
    }
}

/// Resolves the target type name of a simple (parameter or header) schema.
///
/// Formats win over kinds; arrays recurse into their item schema; unknown kinds pass
/// through unchanged.
pub fn resolve_simple_type(kind: &str, format: Option<&str>, items: Option<&SchemaNode>) -> String {
    simple_resolved_type(kind, format, items).target_type
}

fn simple_resolved_type(
    kind: &str,
    format: Option<&str>,
    items: Option<&SchemaNode>,
) -> ResolvedType {
    let mut result = ResolvedType {
        shape: TypeShape::Primitive,
        schema_type: kind.to_string(),
        schema_format: format.map(str::to_string),
        is_anonymous: true,
        ..ResolvedType::default()
    };

    if let Some(tpe) = format.and_then(format_type) {
        result.target_type = tpe.to_string();
        result.is_custom_formatter = is_custom_formatter(tpe);
        result.is_stream = format.is_some_and(is_binary_format);
        return result;
    }

    if let Some(tpe) = kind_type(kind) {
        result.target_type = tpe.to_string();
        return result;
    }

    if kind == "array" {
        result.schema_format = None;
        let elem = match items {
            Some(item) => {
                let nested = match &item.items {
                    Some(SchemaItems::Single(inner)) => Some(inner.as_ref()),
                    _ => None,
                };
                simple_resolved_type(item.first_type(), item.format.as_deref(), nested)
            }
            None => ResolvedType {
                is_anonymous: true,
                ..ResolvedType::dynamic()
            },
        };
        result.target_type = format!("Vec<{}>", elem.target_type);
        result.shape = TypeShape::Array(Box::new(elem));
        return result;
    }

    result.target_type = kind.to_string();
    result
}

/// The element's name inside a container, or `None` for an unnamed inline object.
fn element_name(elem: &ResolvedType) -> Option<String> {
    if elem.target_type.is_empty() {
        return None;
    }
    if elem.nullable {
        Some(indirect(&elem.target_type))
    } else {
        Some(elem.target_type.clone())
    }
}

fn tuple_name(slots: &[ResolvedType]) -> Option<String> {
    let names = slots.iter().map(element_name).collect::<Option<Vec<_>>>()?;
    match names.as_slice() {
        [single] => Some(format!("({},)", single)),
        _ => Some(format!("({})", names.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use serde_json::json;

    fn doc(yaml: &str) -> SchemaDocument {
        SchemaDocument::from_yaml_str(yaml).unwrap()
    }

    fn node(value: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(value).unwrap()
    }

    const PETS: &str = r##"
definitions:
  Pet:
    type: object
    properties:
      id: { type: integer, format: int64 }
  Weight:
    type: number
  Tags:
    type: object
    additionalProperties: { type: string }
  Ids:
    type: array
    items: { type: integer, format: int32 }
  Animal:
    type: object
    discriminator: kind
    properties:
      kind: { type: string }
"##;

    #[test]
    fn test_absent_node_is_dynamic() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let rt = TypeResolver::new(&d, &known, &cfg).resolve(None, true, true).unwrap();
        assert_eq!(rt.category(), TypeCategory::OpenRecord);
        assert_eq!(rt.target_type, "serde_json::Value");
        assert!(!rt.nullable);
    }

    #[test]
    fn test_reference_uses_target_rules() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::with_models_module("models");
        let resolver = TypeResolver::new(&d, &known, &cfg);

        let pet = resolver
            .resolve_schema(&node(json!({"$ref": "#/definitions/Pet"})), false, false)
            .unwrap();
        assert_eq!(pet.target_type, "models::Pet");
        assert_eq!(pet.category(), TypeCategory::Object);
        assert!(pet.nullable);
        assert!(pet.is_reference);

        let animal = resolver
            .resolve_schema(&node(json!({"$ref": "#/definitions/Animal"})), true, true)
            .unwrap();
        assert!(animal.has_discriminator);
    }

    #[test]
    fn test_named_reference_to_map_is_object() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let resolver = TypeResolver::new(&d, &known, &cfg);
        let tags = node(json!({"$ref": "#/definitions/Tags"}));

        let named = resolver.resolve_schema(&tags, false, false).unwrap();
        assert_eq!(named.underlying(), TypeCategory::Object);
        assert_eq!(named.target_type, "Tags");

        let inline = resolver.resolve_schema(&tags, true, false).unwrap();
        assert_eq!(inline.underlying(), TypeCategory::Map);
        assert_eq!(inline.target_type, "Tags");
    }

    #[test]
    fn test_unresolved_reference() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let err = TypeResolver::new(&d, &known, &cfg)
            .resolve_schema(&node(json!({"$ref": "#/definitions/Nope"})), true, false)
            .unwrap_err();
        assert!(matches!(err, AppError::UnresolvedReference(_)));
    }

    #[test]
    fn test_unresolvable_type() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let err = TypeResolver::new(&d, &known, &cfg)
            .resolve_schema(&node(json!({"type": "null", "format": "weird"})), true, false)
            .unwrap_err();
        match err {
            AppError::UnresolvableType { types, format } => {
                assert_eq!(types, vec!["null"]);
                assert_eq!(format.as_deref(), Some("weird"));
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn test_tuple_slots_are_resolved() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let rt = TypeResolver::new(&d, &known, &cfg)
            .resolve_schema(
                &node(json!({
                    "type": "array",
                    "items": [{"type": "string"}, {"type": "integer", "format": "int32"}],
                    "additionalItems": false
                })),
                true,
                false,
            )
            .unwrap();
        assert_eq!(rt.category(), TypeCategory::Tuple);
        assert_eq!(rt.target_type, "(String, i32)");
        assert_eq!(rt.slots().len(), 2);
        assert!(!rt.has_additional_items);

        let single = TypeResolver::new(&d, &known, &cfg)
            .resolve_schema(&node(json!({"type": "array", "items": [{"type": "boolean"}]})), true, false)
            .unwrap();
        assert_eq!(single.target_type, "(bool,)");
    }

    #[test]
    fn test_array_without_items() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let rt = TypeResolver::new(&d, &known, &cfg)
            .resolve_schema(&node(json!({"type": "array", "additionalItems": true})), true, true)
            .unwrap();
        assert_eq!(rt.target_type, "Vec<serde_json::Value>");
        assert_eq!(rt.element().unwrap().category(), TypeCategory::OpenRecord);
        assert!(rt.has_additional_items);
        assert!(!rt.nullable);
    }

    #[test]
    fn test_header_type() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let resolver = TypeResolver::new(&d, &known, &cfg);

        let date = resolver.resolve_header_type(&node(json!({"type": "string", "format": "date"})));
        assert_eq!(date.target_type, "NaiveDate");
        assert!(date.is_custom_formatter);
        assert!(!date.nullable);

        let ids = resolver.resolve_header_type(&node(json!({
            "type": "array",
            "items": {"type": "integer", "format": "int32"}
        })));
        assert_eq!(ids.target_type, "Vec<i32>");
        assert_eq!(ids.category(), TypeCategory::Array);
    }

    #[test]
    fn test_resolve_simple_type() {
        let items = node(json!({"type": "array", "items": {"type": "string", "format": "uuid"}}));
        assert_eq!(resolve_simple_type("array", None, Some(&items)), "Vec<Vec<Uuid>>");
        assert_eq!(resolve_simple_type("array", None, None), "Vec<serde_json::Value>");
        assert_eq!(resolve_simple_type("boolean", None, None), "bool");
        assert_eq!(resolve_simple_type("string", Some("byte"), None), "Base64");
        assert_eq!(resolve_simple_type("custom", None, None), "custom");
    }

    #[test]
    fn test_sink_sees_decisions_without_changing_results() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let sink = RecordingSink::new();
        let plain = TypeResolver::new(&d, &known, &cfg).for_model("Weight");
        let traced = plain.with_sink(&sink);
        let weight = d.definition("Weight").unwrap();

        let a = plain.resolve_schema(weight, false, false).unwrap();
        let b = traced.resolve_schema(weight, false, false).unwrap();
        assert_eq!(a, b);
        assert_eq!(sink.branches(), vec![Branch::Alias, Branch::Primitive]);
        assert_eq!(sink.events()[1].model.as_deref(), Some("Weight"));
    }

    #[test]
    fn test_named_reference_to_array_is_object() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let resolver = TypeResolver::new(&d, &known, &cfg);
        let ids = node(json!({"$ref": "#/definitions/Ids"}));

        let named = resolver.resolve_schema(&ids, false, false).unwrap();
        assert_eq!(named.underlying(), TypeCategory::Object);
        assert_eq!(named.target_type, "Ids");
        assert_eq!(named.aliased_type.as_deref(), Some("Vec<i32>"));

        let inline = resolver.resolve_schema(&ids, true, false).unwrap();
        assert_eq!(inline.underlying(), TypeCategory::Array);
        assert_eq!(inline.element().unwrap().target_type, "i32");
    }

    #[test]
    fn test_containers_of_inline_objects_stay_unnamed() {
        let d = doc(PETS);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::default();
        let resolver = TypeResolver::new(&d, &known, &cfg);
        let inline = json!({"type": "object", "properties": {"a": {"type": "string"}}});

        let list = resolver
            .resolve_schema(&node(json!({"type": "array", "items": inline.clone()})), true, false)
            .unwrap();
        assert_eq!(list.target_type, "");
        assert!(list.element().unwrap().nullable);
        assert_eq!(list.element().unwrap().category(), TypeCategory::Object);

        let map = resolver
            .resolve_schema(
                &node(json!({"type": "object", "additionalProperties": inline.clone()})),
                true,
                false,
            )
            .unwrap();
        assert_eq!(map.target_type, "");
        assert_eq!(map.category(), TypeCategory::Map);

        let pair = resolver
            .resolve_schema(
                &node(json!({"type": "array", "items": [{"type": "string"}, inline]})),
                true,
                false,
            )
            .unwrap();
        assert_eq!(pair.target_type, "");
        assert_eq!(pair.slots().len(), 2);
    }

    #[test]
    fn test_definitions_use_exported_name_override() {
        let d = doc(r##"
definitions:
  pet:
    type: object
    x-rust-name: Animal
    properties:
      id: { type: integer }
  weight:
    type: number
    x-rust-name: Mass
"##);
        let known = KnownDefinitions::from_document(&d);
        let cfg = ResolverConfig::with_models_module("models");
        let resolver = TypeResolver::new(&d, &known, &cfg);

        let defs = resolver.resolve_definitions().unwrap();
        assert_eq!(defs["pet"].target_type, "models::Animal");
        assert_eq!(defs["weight"].target_type, "models::Mass");
        assert_eq!(defs["weight"].aliased_type.as_deref(), Some("f64"));
        assert_eq!(defs, resolver.par_resolve_definitions().unwrap());

        for (name, def) in &defs {
            let pointer = d.section().pointer_for(name);
            let via_ref = resolver
                .resolve_schema(&node(json!({ "$ref": pointer })), true, false)
                .unwrap();
            assert_eq!(via_ref.target_type, def.target_type, "{}", name);
        }
    }
}
