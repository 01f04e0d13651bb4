#![no_main]

use std::sync::{Arc, LazyLock};

use kubeyaml::primitives::resolve_path;
use kubeyaml::{ApiKeyer, Orchestrator, SchemaStore, Value};
use libfuzzer_sys::fuzz_target;

static ORCHESTRATOR: LazyLock<Orchestrator> = LazyLock::new(|| {
    let swagger = include_bytes!("../../tests/fixtures/swagger-1.14.json");
    let store = SchemaStore::from_json("1.14", swagger).unwrap();
    Orchestrator::new(ApiKeyer::default(), vec![Arc::new(store)])
});

fuzz_target!(|data: &[u8]| {
    let doc = match kubeyaml::load_document(data) {
        Ok(d) => d,
        Err(_) => return,
    };

    let report = ORCHESTRATOR.validate(&doc);
    let body = Value::Mapping(doc.body.clone());

    // Every finding that carries a value must point at that value.
    for result in report.iter() {
        for error in &result.errors {
            if error.path.segments().first().map(String::as_str) == Some("apiVersion") {
                continue;
            }
            if let Some(value) = error.kind.value() {
                let found = resolve_path(&error.path, &body);
                let inside = matches!(found, Some(Value::Sequence(items)) if items.contains(value));
                if found != Some(value) && !inside {
                    panic!("finding {} does not locate {:?}", error, value);
                }
            }
        }
    }
});
