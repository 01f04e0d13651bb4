#![no_main]

use kubeyaml::{Resolve, SchemaStore, Validator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // The first byte splits the input into a schema document and a manifest.
    let split = data[0] as usize % data.len();
    let (schema_bytes, doc_bytes) = data[1..].split_at(split.min(data.len() - 1));

    let Ok(store) = SchemaStore::from_json("fuzz", schema_bytes) else {
        return;
    };
    let Ok(doc) = kubeyaml::load_document(doc_bytes) else {
        return;
    };

    let validator = Validator::new(&store);
    for key in store.keys() {
        if let Ok(schema) = store.resolve(key) {
            let _ = validator.validate(&doc.body, schema);
        }
    }
});
