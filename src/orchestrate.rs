//! Fan-out of one document across several Kubernetes versions.

use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::keys::ApiKeyer;
use crate::path::Path;
use crate::store::{Resolve, SchemaStore};
use crate::types::Document;
use crate::validate::Validator;

/// Validates documents against every configured version's store.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    keyer: ApiKeyer,
    stores: Vec<Arc<SchemaStore>>,
    parallel: bool,
}

impl Orchestrator {
    pub fn new(keyer: ApiKeyer, stores: Vec<Arc<SchemaStore>>) -> Self {
        Orchestrator {
            keyer,
            stores,
            parallel: false,
        }
    }

    /// Validate versions concurrently on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn keyer(&self) -> &ApiKeyer {
        &self.keyer
    }

    pub fn versions(&self) -> Vec<&str> {
        self.stores.iter().map(|s| s.version()).collect()
    }

    /// Validate `doc` against every store, in configured order.
    ///
    /// Every version appears in the report, including those without errors.
    pub fn validate(&self, doc: &Document) -> VersionReport {
        let definition_key = self.keyer.api_key(&doc.api_version, &doc.kind);

        let results = if self.parallel {
            self.stores
                .par_iter()
                .map(|store| validate_version(store, doc, &definition_key))
                .collect()
        } else {
            self.stores
                .iter()
                .map(|store| validate_version(store, doc, &definition_key))
                .collect()
        };

        VersionReport { results }
    }
}

/// Validate against a single version's definitions.
///
/// When the document's own definition is unknown to this version, the result
/// is a single error located at `apiVersion`.
pub fn validate_version<R: Resolve>(
    resolver: &R,
    doc: &Document,
    definition_key: &str,
) -> VersionResult {
    let version = resolver.version().to_string();
    let errors = match resolver.resolve(definition_key) {
        Ok(schema) => Validator::new(resolver).validate(&doc.body, schema),
        Err(e) => vec![ValidationError::new(
            Path::root().child("apiVersion"),
            e.into(),
        )],
    };

    tracing::debug!(
        version = %version,
        kind = %doc.kind,
        errors = errors.len(),
        "validated document"
    );

    VersionResult {
        version,
        errors,
        not_evaluated: None,
    }
}

/// Findings for one version.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionResult {
    pub version: String,
    pub errors: Vec<ValidationError>,
    /// Why the version could not be evaluated, e.g. its schema document
    /// failed to load. `errors` is empty in that case.
    pub not_evaluated: Option<String>,
}

impl VersionResult {
    /// A configured version whose definitions were unavailable.
    pub fn not_evaluated(version: impl Into<String>, reason: impl Into<String>) -> Self {
        VersionResult {
            version: version.into(),
            errors: Vec::new(),
            not_evaluated: Some(reason.into()),
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.not_evaluated.is_none()
    }

    /// Evaluated and free of errors.
    pub fn is_valid(&self) -> bool {
        self.is_evaluated() && self.errors.is_empty()
    }
}

/// Findings for every configured version, in configured order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VersionReport {
    results: Vec<VersionResult>,
}

impl VersionReport {
    pub fn from_results(results: Vec<VersionResult>) -> Self {
        VersionReport { results }
    }

    /// Errors for `version`, or `None` when the version was not evaluated.
    pub fn get(&self, version: &str) -> Option<&[ValidationError]> {
        self.result(version)
            .filter(|r| r.is_evaluated())
            .map(|r| r.errors.as_slice())
    }

    pub fn result(&self, version: &str) -> Option<&VersionResult> {
        self.results.iter().find(|r| r.version == version)
    }

    /// True only when `version` was evaluated and produced no errors.
    pub fn is_valid_for(&self, version: &str) -> bool {
        self.result(version).is_some_and(VersionResult::is_valid)
    }

    /// Add configured versions that could not be evaluated, then restore
    /// configured order. Versions missing from `configured` go last.
    pub fn with_unavailable<E: fmt::Display>(
        mut self,
        configured: &[String],
        failures: &[(String, E)],
    ) -> Self {
        for (version, error) in failures {
            self.results
                .push(VersionResult::not_evaluated(version.clone(), error.to_string()));
        }
        let position = |version: &str| {
            configured
                .iter()
                .position(|c| c == version)
                .unwrap_or(usize::MAX)
        };
        self.results.sort_by_key(|r| position(&r.version));
        self
    }

    pub fn valid_versions(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_valid())
            .map(|r| r.version.as_str())
            .collect()
    }

    /// Evaluated versions that reported at least one error.
    pub fn failing_versions(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_evaluated() && !r.errors.is_empty())
            .map(|r| r.version.as_str())
            .collect()
    }

    pub fn not_evaluated_versions(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.is_evaluated())
            .map(|r| r.version.as_str())
            .collect()
    }

    /// Every version was evaluated and none reported errors.
    pub fn all_valid(&self) -> bool {
        self.results.iter().all(VersionResult::is_valid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
