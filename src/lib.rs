//! Validate Kubernetes manifests against the API schemas of several
//! Kubernetes versions.
//!
//! Each Kubernetes release publishes a Swagger document describing every API
//! object. This crate loads one [`SchemaStore`] per release, walks a manifest
//! against the definition of its `apiVersion`/`kind`, and reports every
//! violation with the dot-joined path of the offending value:
//!
//! ```text
//! bytes → load_document → Document ─┬→ ApiKeyer → definition key
//!                                   └→ Validator (per SchemaStore) → Vec<ValidationError>
//!                                        └→ Orchestrator → VersionReport → serialize_report
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use kubeyaml::{ApiKeyer, Orchestrator, SchemaStore};
//!
//! let swagger = br#"{
//!   "definitions": {
//!     "io.k8s.api.core.v1.ConfigMap": {
//!       "properties": {
//!         "data": { "type": "object" },
//!         "immutable": { "type": "boolean" }
//!       }
//!     }
//!   }
//! }"#;
//! let store = SchemaStore::from_json("1.19", swagger).expect("valid swagger");
//! let orchestrator = Orchestrator::new(ApiKeyer::default(), vec![Arc::new(store)]);
//!
//! let yaml = "apiVersion: v1\nkind: ConfigMap\nimmutable: yes please\n";
//! let report = kubeyaml::validate_manifest(yaml.as_bytes(), &orchestrator).expect("loads");
//! assert!(!report.is_valid_for("1.19"));
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | yes     | Builds the `kubeyaml` binary (`clap`, `tracing-subscriber`, `anyhow`). |

pub mod config;
pub mod enums;
pub mod error;
pub mod keys;
pub mod orchestrate;
pub mod parse;
pub mod path;
pub mod primitives;
pub mod serialize;
pub mod source;
pub mod store;
pub mod types;
pub mod validate;
pub mod value;
pub mod version;

pub use error::*;
pub use types::*;

// Re-export entry points at the crate root for convenience.
pub use config::Config;
pub use keys::{ApiKeyer, resolve_key};
pub use orchestrate::{Orchestrator, VersionReport, VersionResult};
pub use parse::load_document;
pub use path::Path;
pub use serialize::{OutputFormat, serialize_report};
pub use source::{DirectorySource, MemorySource, SchemaSource, load_stores};
pub use store::{Resolve, SchemaStore};
pub use validate::{Validator, check_required};
pub use value::{Mapping, Value};

/// Convenience entry point composing load → orchestrate.
///
/// # Errors
///
/// Returns the [`LoadError`] when the bytes are not a loadable manifest.
/// Validation findings are never errors; they are part of the report.
pub fn validate_manifest(
    bytes: &[u8],
    orchestrator: &Orchestrator,
) -> Result<VersionReport, LoadError> {
    let doc = parse::load_document(bytes)?;
    Ok(orchestrator.validate(&doc))
}
