use cdd_resolver::{
    AppError, Branch, KnownDefinitions, RecordingSink, ResolverConfig, SchemaDocument, SchemaNode,
    TypeCategory, TypeResolver,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

const PETSTORE: &str = r##"
swagger: "2.0"
info:
  title: Petstore
  version: 1.0.0
paths: {}
definitions:
  Pet:
    type: object
    properties:
      id:
        type: integer
        format: int64
  Weight:
    type: number
  Owner:
    type: object
    required: [pets, born]
    properties:
      pets:
        type: array
        items:
          $ref: "#/definitions/Pet"
          x-nullable: true
      names:
        type: array
        items:
          type: string
      born:
        type: string
        format: date-time
      weight:
        $ref: "#/definitions/Weight"
  A:
    type: array
    items:
      $ref: "#/definitions/B"
  B:
    type: array
    items:
      $ref: "#/definitions/A"
  Dog:
    allOf:
      - $ref: "#/definitions/Pet"
      - type: object
        properties:
          bark:
            type: boolean
  Labels:
    type: object
    additionalProperties:
      type: string
  Annotated:
    type: object
    properties:
      name:
        type: string
    additionalProperties:
      type: integer
  Anything:
    type: object
  Upload:
    type: string
    format: binary
    x-nullable: true
    default: abc
"##;

fn node(value: serde_json::Value) -> SchemaNode {
    SchemaNode::from_value(value).unwrap()
}

#[test]
fn test_pet_scenario() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg).for_model("Pet");
    let pet_schema = doc.definition("Pet").unwrap();

    let pet = resolver.resolve_schema(pet_schema, false, false).unwrap();
    assert_eq!(pet.category(), TypeCategory::Object);
    assert_eq!(pet.target_type, "Pet");
    assert!(pet.nullable);

    let props = resolver.resolve_properties(pet_schema).unwrap();
    assert_eq!(props.len(), 1);
    let (name, id) = &props[0];
    assert_eq!(name, "id");
    assert_eq!(id.category(), TypeCategory::Primitive);
    assert_eq!(id.target_type, "i64");
    assert!(!id.nullable);
    assert_eq!(id.zero_value_expression(), "0");
}

#[test]
fn test_required_date_time_scenario() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let born = resolver
        .resolve_schema(&node(json!({"type": "string", "format": "date-time"})), true, true)
        .unwrap();
    assert_eq!(born.target_type, "DateTime");
    assert!(born.nullable);
    assert!(born.is_custom_formatter);
    assert_eq!(born.schema_format.as_deref(), Some("date-time"));
}

#[test]
fn test_alias_naming() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let weight = resolver
        .for_model("Weight")
        .resolve_schema(doc.definition("Weight").unwrap(), false, false)
        .unwrap();
    assert_eq!(weight.category(), TypeCategory::Alias);
    assert_eq!(weight.underlying(), TypeCategory::Primitive);
    assert_eq!(weight.target_type, "Weight");
    assert_eq!(weight.aliased_type.as_deref(), Some("f64"));
    assert_eq!(weight.zero_value_expression(), "0.0");

    let inline = resolver
        .for_model("Weight")
        .resolve_schema(&node(json!({"type": "number"})), true, false)
        .unwrap();
    assert_eq!(inline.category(), TypeCategory::Primitive);
    assert_eq!(inline.target_type, "f64");
    assert_eq!(inline.aliased_type, None);
}

#[test]
fn test_binary_never_nullable() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let upload = doc.definition("Upload").unwrap();
    for required in [true, false] {
        let rt = resolver.resolve_schema(upload, true, required).unwrap();
        assert!(!rt.nullable);
        assert!(rt.is_stream);
        assert_eq!(rt.target_type, "Vec<u8>");
    }

    let read_only = node(json!({"type": "string", "format": "binary", "readOnly": true}));
    let rt = resolver.resolve_schema(&read_only, true, true).unwrap();
    assert!(!rt.nullable);
    assert!(rt.is_stream);
}

#[test]
fn test_extension_override_precedence() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let cases = vec![
        json!({"type": "boolean", "x-nullable": false}),
        json!({"type": "integer", "x-nullable": false, "default": 5}),
        json!({"type": "number", "x-isnullable": false, "minimum": 0}),
        json!({"type": "string", "x-nullable": false, "minLength": 0}),
        json!({"type": "string", "format": "uuid", "x-nullable": false}),
    ];
    for case in cases {
        let rt = resolver.resolve_schema(&node(case.clone()), true, true).unwrap();
        assert!(!rt.nullable, "{}", case);
    }

    let forced = resolver
        .resolve_schema(&node(json!({"type": "integer", "x-nullable": true})), true, false)
        .unwrap();
    assert!(forced.nullable);
}

#[test]
fn test_array_element_indirection() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::with_models_module("models");
    let resolver = TypeResolver::new(&doc, &known, &cfg).for_model("Owner");
    let owner = doc.definition("Owner").unwrap();

    let props = resolver.resolve_properties(owner).unwrap();
    let by_name = |n: &str| props.iter().find(|(name, _)| name == n).unwrap().1.clone();

    let pets = by_name("pets");
    assert_eq!(pets.target_type, "Vec<Option<models::Pet>>");
    assert!(!pets.nullable);
    let elem = pets.element().unwrap();
    assert!(elem.nullable);
    assert!(elem.is_reference);
    assert_eq!(elem.target_type, "models::Pet");

    let names = by_name("names");
    assert_eq!(names.target_type, "Vec<String>");
    assert!(!names.element().unwrap().nullable);
    assert_eq!(names.zero_value_expression(), "Vec::new()");

    let born = by_name("born");
    assert!(born.nullable);

    let weight = by_name("weight");
    assert_eq!(weight.target_type, "models::Weight");
    assert_eq!(weight.aliased_type.as_deref(), Some("f64"));
    assert!(!weight.nullable);
}

#[test]
fn test_cycle_safety() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let sink = RecordingSink::new();
    let resolver = TypeResolver::new(&doc, &known, &cfg).with_sink(&sink);

    let a = resolver
        .for_model("A")
        .resolve_schema(doc.definition("A").unwrap(), false, false)
        .unwrap();
    assert_eq!(a.target_type, "A");
    assert_eq!(a.aliased_type.as_deref(), Some("Vec<B>"));
    let b_elem = a.element().unwrap();
    assert_eq!(b_elem.target_type, "B");
    assert!(b_elem.is_reference);
    assert!(sink.branches().contains(&Branch::ReferenceCycle));

    let b = resolver
        .for_model("B")
        .resolve_schema(doc.definition("B").unwrap(), false, false)
        .unwrap();
    assert_eq!(b.target_type, "B");
    assert_eq!(b.aliased_type.as_deref(), Some("Vec<A>"));
}

#[test]
fn test_composition_and_maps() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let all = TypeResolver::new(&doc, &known, &cfg)
        .resolve_definitions()
        .unwrap();

    let dog = &all["Dog"];
    assert_eq!(dog.category(), TypeCategory::Object);
    assert!(dog.is_composed);
    assert!(dog.nullable);
    assert_eq!(dog.target_type, "Dog");

    let labels = &all["Labels"];
    assert_eq!(labels.category(), TypeCategory::Alias);
    assert_eq!(labels.underlying(), TypeCategory::Map);
    assert_eq!(labels.aliased_type.as_deref(), Some("HashMap<String, String>"));
    assert_eq!(labels.element().unwrap().target_type, "String");
    assert_eq!(labels.zero_value_expression(), "HashMap::new()");

    let annotated = &all["Annotated"];
    assert_eq!(annotated.category(), TypeCategory::Object);
    assert_eq!(annotated.target_type, "Annotated");
    assert!(annotated.element().is_none());

    let anything = &all["Anything"];
    assert_eq!(anything.category(), TypeCategory::OpenRecord);
    assert!(!anything.nullable);
    assert_eq!(anything.zero_value_expression(), "serde_json::Value::Null");
}

#[test]
fn test_determinism_and_parallel_resolution() {
    let doc = SchemaDocument::from_yaml_str(PETSTORE).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::with_models_module("models");
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let first = resolver.resolve_definitions().unwrap();
    let second = resolver.resolve_definitions().unwrap();
    let parallel = resolver.par_resolve_definitions().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, parallel);

    let order: Vec<&String> = parallel.keys().collect();
    assert_eq!(
        order,
        vec!["Pet", "Weight", "Owner", "A", "B", "Dog", "Labels", "Annotated", "Anything", "Upload"]
    );
}

#[test]
fn test_definition_errors_propagate() {
    let doc = SchemaDocument::from_yaml_str(
        r##"
definitions:
  Broken:
    type: array
    items:
      $ref: "#/definitions/Missing"
"##,
    )
    .unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let err = resolver.resolve_definitions().unwrap_err();
    assert!(matches!(err, AppError::UnresolvedReference(ref r) if r == "#/definitions/Missing"));
    let err = resolver.par_resolve_definitions().unwrap_err();
    assert!(matches!(err, AppError::UnresolvedReference(_)));
}

#[test]
fn test_document_from_path_and_self_reference() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swagger.yaml");
    fs::write(&path, PETSTORE).unwrap();

    let doc = SchemaDocument::from_path(&path).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::from_yaml_str("trace: true").unwrap();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let absolute = format!("{}#/definitions/Pet", path.to_string_lossy());
    let pet = resolver
        .resolve_schema(&node(json!({ "$ref": absolute })), true, false)
        .unwrap();
    assert_eq!(pet.target_type, "Pet");

    let missing = SchemaDocument::from_path(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(missing, AppError::Io(_)));
}

const RENAMED: &str = r##"
swagger: "2.0"
definitions:
  pet:
    type: object
    x-rust-name: Animal
    properties:
      id:
        type: integer
  weight:
    type: number
    x-rust-name: Mass
  Kennel:
    type: object
    properties:
      resident:
        $ref: "#/definitions/pet"
      load:
        $ref: "#/definitions/weight"
  Conflicted:
    type: object
    x-nullable: false
    x-isnullable: true
"##;

#[test]
fn test_exported_name_override_is_shared_by_definitions_and_references() {
    let doc = SchemaDocument::from_yaml_str(RENAMED).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::with_models_module("models");
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let defs = resolver.resolve_definitions().unwrap();
    assert_eq!(defs["pet"].target_type, "models::Animal");
    assert_eq!(defs["weight"].target_type, "models::Mass");
    assert_eq!(defs["weight"].category(), TypeCategory::Alias);
    assert_eq!(defs, resolver.par_resolve_definitions().unwrap());

    let kennel = doc.definition("Kennel").unwrap();
    let props = resolver.for_model("Kennel").resolve_properties(kennel).unwrap();
    assert_eq!(props[0].0, "resident");
    assert_eq!(props[0].1.target_type, defs["pet"].target_type);
    assert_eq!(props[1].0, "load");
    assert_eq!(props[1].1.target_type, defs["weight"].target_type);
}

#[test]
fn test_either_nullable_extension_makes_reference_nullable() {
    let doc = SchemaDocument::from_yaml_str(RENAMED).unwrap();
    let known = KnownDefinitions::from_document(&doc);
    let cfg = ResolverConfig::default();
    let resolver = TypeResolver::new(&doc, &known, &cfg);

    let conflicted = resolver
        .resolve_schema(&node(json!({"$ref": "#/definitions/Conflicted"})), true, false)
        .unwrap();
    assert!(conflicted.nullable);
    assert_eq!(conflicted.target_type, "Conflicted");
}
