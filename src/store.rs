//! Per-version registry of schema definitions.

use std::collections::HashMap;

use crate::error::{SchemaLoadError, UnknownSchema};
use crate::types::{RawSwagger, Schema};

/// Prefix of local `$ref` values in Swagger documents.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Looks up schema definitions by key.
///
/// This is the seam the validator depends on; [`SchemaStore`] is the
/// production implementation.
pub trait Resolve {
    /// Resolve a definition key or a `#/definitions/...` reference.
    fn resolve(&self, definition_key: &str) -> Result<&Schema, UnknownSchema>;

    /// Identifier of the platform version the definitions belong to.
    fn version(&self) -> &str;
}

/// Immutable schema model of one Kubernetes version.
#[derive(Clone, Debug, Default)]
pub struct SchemaStore {
    version: String,
    definitions: HashMap<String, Schema>,
}

impl SchemaStore {
    pub fn new(version: impl Into<String>, definitions: HashMap<String, Schema>) -> Self {
        SchemaStore {
            version: version.into(),
            definitions,
        }
    }

    /// Build a store from the bytes of a Swagger JSON document.
    pub fn from_json(version: impl Into<String>, bytes: &[u8]) -> Result<Self, SchemaLoadError> {
        let version = version.into();
        let raw: RawSwagger =
            serde_json::from_slice(bytes).map_err(|source| SchemaLoadError::Json {
                version: version.clone(),
                source,
            })?;

        let definitions: HashMap<String, Schema> = raw
            .definitions
            .into_iter()
            .map(|(key, schema)| (key, Schema::from(schema)))
            .collect();

        tracing::debug!(
            version = %version,
            definitions = definitions.len(),
            "loaded schema document"
        );

        Ok(SchemaStore::new(version, definitions))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn contains(&self, definition_key: &str) -> bool {
        self.definitions.contains_key(strip_definitions_prefix(definition_key))
    }

    /// Definition keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

impl Resolve for SchemaStore {
    fn resolve(&self, definition_key: &str) -> Result<&Schema, UnknownSchema> {
        let key = strip_definitions_prefix(definition_key);
        self.definitions.get(key).ok_or_else(|| UnknownSchema {
            definition_key: key.to_string(),
        })
    }

    fn version(&self) -> &str {
        &self.version
    }
}

impl<R: Resolve + ?Sized> Resolve for &R {
    fn resolve(&self, definition_key: &str) -> Result<&Schema, UnknownSchema> {
        (**self).resolve(definition_key)
    }

    fn version(&self) -> &str {
        (**self).version()
    }
}

impl<R: Resolve + ?Sized> Resolve for std::sync::Arc<R> {
    fn resolve(&self, definition_key: &str) -> Result<&Schema, UnknownSchema> {
        (**self).resolve(definition_key)
    }

    fn version(&self) -> &str {
        (**self).version()
    }
}

fn strip_definitions_prefix(key: &str) -> &str {
    key.strip_prefix(DEFINITIONS_PREFIX).unwrap_or(key)
}
