use std::collections::HashMap;

use kubeyaml::enums::PrimitiveType;
use kubeyaml::primitives::{is_valid_date_time, resolve_path};
use kubeyaml::{
    ArrayItem, Mapping, Path, Property, Resolve, Schema, SchemaStore, ValidationError,
    ValidationErrorKind, Validator, Value, check_required,
};

fn schema(properties: Vec<(&str, Property)>, required: &[&str]) -> Schema {
    Schema {
        properties: properties
            .into_iter()
            .map(|(k, p)| (k.to_string(), p))
            .collect(),
        required: required.iter().map(|r| r.to_string()).collect(),
        ..Schema::default()
    }
}

fn entry(key: impl Into<Value>, value: impl Into<Value>) -> (Value, Value) {
    (key.into(), value.into())
}

fn test_store() -> SchemaStore {
    let mut definitions = HashMap::new();
    definitions.insert(
        "Root".to_string(),
        schema(
            vec![
                ("ratio", Property::primitive(PrimitiveType::Number)),
                ("extra", Property::primitive(PrimitiveType::Object)),
                ("item", Property::reference("#/definitions/Item")),
                ("items", Property::array(ArrayItem::Reference("#/definitions/Item".into()))),
                ("ghosts", Property::array(ArrayItem::Reference("#/definitions/Ghost".into()))),
                ("ghost", Property::reference("#/definitions/Ghost")),
            ],
            &[],
        ),
    );
    definitions.insert(
        "Item".to_string(),
        schema(
            vec![
                ("id", Property::primitive(PrimitiveType::Integer)),
                ("name", Property::primitive(PrimitiveType::String)),
            ],
            &["id", "name"],
        ),
    );
    SchemaStore::new("test", definitions)
}

fn validate(body: Mapping) -> Vec<ValidationError> {
    let store = test_store();
    let root = store.resolve("Root").unwrap();
    Validator::new(&store).validate(&body, root)
}

fn item_schema() -> Schema {
    test_store().resolve("Item").unwrap().clone()
}

#[test]
fn number_accepts_integers_and_floats() {
    assert!(validate(vec![entry("ratio", Value::Int(3))]).is_empty());
    assert!(validate(vec![entry("ratio", Value::Float(0.5))]).is_empty());

    let errors = validate(vec![entry("ratio", "half")]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "ratio");
}

#[test]
fn non_string_key_is_reported_at_enclosing_path() {
    let errors = validate(vec![entry(Value::Int(7), "x"), entry("bogus", Value::Int(1))]);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].path.is_root());
    assert_eq!(
        errors[0].kind,
        ValidationErrorKind::KeyNotString {
            raw_key: Value::Int(7)
        }
    );
    assert_eq!(
        errors[0].message(),
        "key 7 is a 'integer' but needs to be a string"
    );
    assert_eq!(errors[1].path.to_string(), "bogus");
}

#[test]
fn non_string_key_inside_required_check_stops_the_check() {
    let item = Value::Mapping(vec![entry(Value::Bool(true), Value::Int(1))]);
    let errors = validate(vec![entry("item", item)]);
    let kinds: Vec<&str> = errors.iter().map(|e| e.kind.code()).collect();
    assert_eq!(kinds, vec!["key_not_string", "key_not_string"]);
    assert!(errors.iter().all(|e| e.path.to_string() == "item"));
}

#[test]
fn unresolvable_reference_abandons_only_that_subtree() {
    let errors = validate(vec![
        entry("ghost", Value::Mapping(vec![entry("anything", Value::Int(1))])),
        entry("ratio", "bad"),
    ]);
    let codes: Vec<(String, &str)> = errors
        .iter()
        .map(|e| (e.path.to_string(), e.kind.code()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("ghost".to_string(), "unknown_schema"),
            ("ratio".to_string(), "wrong_type"),
        ]
    );
}

#[test]
fn unresolvable_array_item_is_reported_once() {
    let ghosts = Value::Sequence(vec![Value::Mapping(vec![]), Value::Mapping(vec![])]);
    let errors = validate(vec![entry("ghosts", ghosts)]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "ghosts");
    assert_eq!(
        errors[0].kind,
        ValidationErrorKind::UnknownSchema {
            definition_key: "Ghost".to_string()
        }
    );
}

#[test]
fn array_elements_are_indexed() {
    let items = Value::Sequence(vec![
        Value::Mapping(vec![entry("id", Value::Int(1)), entry("name", "a")]),
        Value::from("not a mapping"),
        Value::Mapping(vec![entry("id", "2"), entry("name", "c")]),
    ]);
    let errors = validate(vec![entry("items", items)]);
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["items.1", "items.2.id"]);
}

#[test]
fn check_required_reports_first_missing_in_declared_order() {
    let item = item_schema();
    let path = Path::from("spec.item");
    let errors = check_required(&item, &vec![entry("other", Value::Int(1))], &path);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, path);
    assert_eq!(
        errors[0].kind,
        ValidationErrorKind::RequiredKeyMissing {
            key: "id".to_string()
        }
    );

    let errors = check_required(&item, &vec![entry("id", Value::Int(1))], &path);
    assert_eq!(
        errors[0].kind,
        ValidationErrorKind::RequiredKeyMissing {
            key: "name".to_string()
        }
    );

    let complete = vec![entry("id", Value::Int(1)), entry("name", "n")];
    assert!(check_required(&item, &complete, &path).is_empty());
}

#[test]
fn validate_at_prefixes_paths() {
    let store = test_store();
    let item = item_schema();
    let errors = Validator::new(&store).validate_at(
        &vec![entry("id", true)],
        &item,
        &Path::from("outer.0"),
    );
    assert_eq!(errors[0].path.to_string(), "outer.0.id");
    assert_eq!(Validator::new(&store).version(), "test");
}

#[test]
fn child_paths_do_not_alias_their_parent() {
    let parent = Path::from("spec.containers");
    let first = parent.index(0);
    let second = parent.child("x");
    assert_eq!(parent.to_string(), "spec.containers");
    assert_eq!(first.to_string(), "spec.containers.0");
    assert_eq!(second.to_string(), "spec.containers.x");
    assert_eq!(Path::from("").to_string(), "");
    assert!(Path::from("").is_root());
}

#[test]
fn error_paths_locate_offending_values() {
    let doc = Value::Mapping(vec![entry(
        "items",
        Value::Sequence(vec![
            Value::Mapping(vec![entry("id", Value::Int(1)), entry("name", "a")]),
            Value::Mapping(vec![entry("id", "x"), entry("name", "b")]),
        ]),
    )]);
    let errors = validate(doc.as_mapping().unwrap().clone());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        resolve_path(&errors[0].path, &doc),
        errors[0].kind.value()
    );
}

#[test]
fn date_time_shape_and_calendar() {
    assert!(is_valid_date_time("2019-01-01T00:00:00Z"));
    assert!(is_valid_date_time("2020-02-29T23:59:59Z"));
    assert!(!is_valid_date_time("2019-02-29T00:00:00Z"));
    assert!(!is_valid_date_time("2019-01-01T00:00:00.5Z"));
    assert!(!is_valid_date_time("2019-01-01T00:00:00+01:00"));
    assert!(!is_valid_date_time("2019-01-01"));
    assert!(!is_valid_date_time("2019-13-01T00:00:00Z"));
}

#[test]
fn report_carries_offending_value() {
    let errors = validate(vec![entry("ratio", "half")]);
    let report = errors[0].to_report();
    assert_eq!(report.path, "ratio");
    assert_eq!(report.value, Some(serde_json::json!("half")));
    assert_eq!(errors[0].to_string(), format!("[ratio] {}", errors[0].message()));
}

#[test]
fn number_accepts_non_finite_yaml_floats() {
    for input in ["ratio: .nan\n", "ratio: .inf\n", "ratio: -.Inf\n"] {
        let value = kubeyaml::parse::parse_value(input).unwrap();
        let errors = validate(value.as_mapping().unwrap().clone());
        assert!(errors.is_empty(), "{:?}: {:?}", input, errors);
    }
}
