//! Providers of per-version schema documents and store construction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{SchemaLoadError, SourceError};
use crate::store::{Resolve, SchemaStore};

/// Supplies the raw Swagger document of a Kubernetes version.
pub trait SchemaSource {
    fn fetch(&self, version: &str) -> Result<Vec<u8>, SourceError>;
}

/// Reads `swagger-<version>.json` files from a directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the document of `version`.
    pub fn path_for(&self, version: &str) -> PathBuf {
        self.dir.join(format!("swagger-{}.json", version))
    }
}

impl SchemaSource for DirectorySource {
    fn fetch(&self, version: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(version);
        std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    version: version.to_string(),
                }
            } else {
                SourceError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })
    }
}

/// Documents held in memory, e.g. embedded with `include_bytes!`.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    pub fn with(mut self, version: impl Into<String>, document: impl Into<Vec<u8>>) -> Self {
        self.insert(version, document);
        self
    }

    pub fn insert(&mut self, version: impl Into<String>, document: impl Into<Vec<u8>>) {
        self.documents.insert(version.into(), document.into());
    }
}

impl SchemaSource for MemorySource {
    fn fetch(&self, version: &str) -> Result<Vec<u8>, SourceError> {
        self.documents
            .get(version)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                version: version.to_string(),
            })
    }
}

/// Fetch and parse the schema document of a single version.
pub fn load_store<S: SchemaSource + ?Sized>(
    source: &S,
    version: &str,
) -> Result<SchemaStore, SchemaLoadError> {
    let bytes = source
        .fetch(version)
        .map_err(|source| SchemaLoadError::Source {
            version: version.to_string(),
            source,
        })?;
    SchemaStore::from_json(version, &bytes)
}

/// Stores built at startup, plus the versions that could not be built.
#[derive(Debug, Default)]
pub struct LoadedStores {
    pub stores: Vec<Arc<SchemaStore>>,
    pub failures: Vec<(String, SchemaLoadError)>,
}

impl LoadedStores {
    pub fn versions(&self) -> Vec<&str> {
        self.stores.iter().map(|s| s.version()).collect()
    }
}

/// Build one store per version. A version whose document is missing or
/// malformed is skipped and recorded; the others stay usable.
pub fn load_stores<S: SchemaSource + ?Sized>(source: &S, versions: &[String]) -> LoadedStores {
    let mut loaded = LoadedStores::default();
    for version in versions {
        match load_store(source, version) {
            Ok(store) => loaded.stores.push(Arc::new(store)),
            Err(e) => {
                tracing::warn!(version = %version, error = %e, "skipping version without a usable schema");
                loaded.failures.push((version.clone(), e));
            }
        }
    }
    loaded
}
