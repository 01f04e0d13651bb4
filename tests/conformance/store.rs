use super::common::store;
use kubeyaml::enums::PrimitiveType;
use kubeyaml::{ArrayItem, PropertyKind, Resolve, SchemaLoadError, SchemaStore};

#[test]
fn resolves_schema_by_definition_key() {
    let s = store("1.14");
    let pod = s.resolve("io.k8s.api.core.v1.Pod").expect("Pod should resolve");
    assert_eq!(pod.group_version_kind[0].kind, "Pod");
    assert_eq!(s.version(), "1.14");
}

#[test]
fn resolves_schema_by_local_reference() {
    let s = store("1.14");
    let meta = s
        .resolve("#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta")
        .expect("reference should resolve");
    assert!(meta.properties.contains_key("labels"));
}

#[test]
fn unknown_key_fails_with_unknown_schema() {
    let s = store("1.14");
    let err = s.resolve("#/definitions/io.k8s.api.fake.v1.Nothing").unwrap_err();
    assert_eq!(err.definition_key, "io.k8s.api.fake.v1.Nothing");
    assert_eq!(err.to_string(), "unknown schema io.k8s.api.fake.v1.Nothing");
}

#[test]
fn property_kinds_are_decided_at_load() {
    let s = store("1.14");
    let container = s.resolve("io.k8s.api.core.v1.Container").unwrap();

    assert_eq!(
        container.properties["name"].kind,
        PropertyKind::Primitive(PrimitiveType::String)
    );
    assert_eq!(
        container.properties["args"].kind,
        PropertyKind::Array(ArrayItem::Primitive(PrimitiveType::String))
    );
    assert_eq!(
        container.properties["ports"].kind,
        PropertyKind::Array(ArrayItem::Reference(
            "#/definitions/io.k8s.api.core.v1.ContainerPort".to_string()
        ))
    );
    assert_eq!(
        container.properties["resources"].kind,
        PropertyKind::Reference(
            "#/definitions/io.k8s.api.core.v1.ResourceRequirements".to_string()
        )
    );
}

#[test]
fn object_with_additional_properties_is_primitive_object() {
    let s = store("1.14");
    let meta = s
        .resolve("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta")
        .unwrap();
    assert_eq!(
        meta.properties["labels"].kind,
        PropertyKind::Primitive(PrimitiveType::Object)
    );
}

#[test]
fn renamed_string_schemas_keep_type_and_format() {
    let s = store("1.14");
    let time = s.resolve("io.k8s.apimachinery.pkg.apis.meta.v1.Time").unwrap();
    assert!(time.is_string_rename());
    assert_eq!(time.format.as_deref(), Some("date-time"));

    let quantity = s
        .resolve("io.k8s.apimachinery.pkg.api.resource.Quantity")
        .unwrap();
    assert!(quantity.is_string_rename());
    assert_eq!(quantity.format, None);
}

#[test]
fn required_fields_keep_declared_order() {
    let s = store("1.14");
    let mount = s.resolve("io.k8s.api.core.v1.VolumeMount").unwrap();
    assert_eq!(mount.required, vec!["name", "mountPath"]);
}

#[test]
fn store_reports_size_and_membership() {
    let s = store("1.14");
    assert!(!s.is_empty());
    assert!(s.contains("io.k8s.api.apps.v1.Deployment"));
    assert!(s.contains("#/definitions/io.k8s.api.apps.v1.Deployment"));
    assert!(!store("1.8").contains("io.k8s.api.apps.v1.Deployment"));
    assert_eq!(s.keys().count(), s.len());
}

#[test]
fn malformed_document_fails_to_load() {
    let err = SchemaStore::from_json("1.99", b"{ \"definitions\": ").unwrap_err();
    assert!(matches!(err, SchemaLoadError::Json { ref version, .. } if version == "1.99"));
}

#[test]
fn document_without_definitions_is_empty() {
    let s = SchemaStore::from_json("0.0", b"{}").unwrap();
    assert!(s.is_empty());
}

#[test]
fn property_without_type_or_reference_becomes_empty_reference() {
    let s = SchemaStore::from_json(
        "0.0",
        br#"{"definitions": {"A": {"properties": {"x": {"description": "?"}, "n": {"type": "array"}}}}}"#,
    )
    .unwrap();
    let a = s.resolve("A").unwrap();
    assert_eq!(a.properties["x"].kind, PropertyKind::Reference(String::new()));
    assert_eq!(
        a.properties["n"].kind,
        PropertyKind::Array(ArrayItem::Reference(String::new()))
    );
}

// ─── Sources ────────────────────────────────────────────────────────────────

mod sources {
    use super::super::common::fixtures_dir;
    use kubeyaml::source::load_store;
    use kubeyaml::{
        DirectorySource, MemorySource, Resolve, SchemaLoadError, SchemaSource, SourceError,
        load_stores,
    };

    fn versions(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn directory_source_reads_versioned_files() {
        let source = DirectorySource::new(fixtures_dir());
        assert!(source.path_for("1.14").ends_with("swagger-1.14.json"));
        assert!(!source.fetch("1.14").unwrap().is_empty());
    }

    #[test]
    fn directory_source_reports_missing_version() {
        let source = DirectorySource::new(fixtures_dir());
        let err = source.fetch("1.2").unwrap_err();
        assert!(matches!(err, SourceError::NotFound { ref version } if version == "1.2"));
    }

    #[test]
    fn memory_source_serves_inserted_documents() {
        let source = MemorySource::new().with("1.0", br#"{"definitions": {"A": {}}}"#.to_vec());
        let store = load_store(&source, "1.0").unwrap();
        assert_eq!(store.version(), "1.0");
        assert!(store.contains("A"));

        let err = load_store(&source, "2.0").unwrap_err();
        assert!(matches!(err, SchemaLoadError::Source { .. }));
    }

    #[test]
    fn load_stores_skips_unusable_versions() {
        let source = DirectorySource::new(fixtures_dir());
        let loaded = load_stores(&source, &versions(&["1.14", "1.99", "1.2", "1.8"]));

        assert_eq!(loaded.versions(), vec!["1.14", "1.8"]);
        let failed: Vec<&str> = loaded.failures.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(failed, vec!["1.99", "1.2"]);
        assert!(matches!(loaded.failures[0].1, SchemaLoadError::Json { .. }));
        assert!(matches!(loaded.failures[1].1, SchemaLoadError::Source { .. }));
    }
}
