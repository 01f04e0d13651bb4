#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let doc = match kubeyaml::load_document(data) {
        Ok(d) => d,
        Err(_) => return,
    };

    // A loaded document never keeps its identity keys in the body.
    for (key, _) in &doc.body {
        if matches!(key.as_str(), Some("apiVersion") | Some("kind")) {
            panic!("identity key left in body: {:?}", doc.body);
        }
    }
});
