use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::path::Path;
use crate::value::Value;

// ─── Validation findings ────────────────────────────────────────────────────

/// What went wrong at a location. Findings are collected, never thrown.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationErrorKind {
    #[error("unknown key: {key}")]
    UnknownKey { key: String },

    #[error("key {key} has wrong type {actual} (should be {expected})")]
    WrongType {
        key: String,
        expected: String,
        actual: &'static str,
        value: Value,
    },

    #[error("missing required key: {key}")]
    RequiredKeyMissing { key: String },

    #[error("unknown schema {definition_key}")]
    UnknownSchema { definition_key: String },

    #[error("unknown format \"{format}\"")]
    UnknownFormat { format: String, value: Value },

    #[error("key {raw_key} is a '{}' but needs to be a string", .raw_key.type_name())]
    KeyNotString { raw_key: Value },
}

impl ValidationErrorKind {
    pub fn wrong_type(key: &str, expected: impl Into<String>, value: &Value) -> Self {
        ValidationErrorKind::WrongType {
            key: key.to_string(),
            expected: expected.into(),
            actual: value.type_name(),
            value: value.clone(),
        }
    }

    /// Short stable identifier used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::UnknownKey { .. } => "unknown_key",
            ValidationErrorKind::WrongType { .. } => "wrong_type",
            ValidationErrorKind::RequiredKeyMissing { .. } => "required_key_missing",
            ValidationErrorKind::UnknownSchema { .. } => "unknown_schema",
            ValidationErrorKind::UnknownFormat { .. } => "unknown_format",
            ValidationErrorKind::KeyNotString { .. } => "key_not_string",
        }
    }

    /// The offending document value, when the finding is about a value.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ValidationErrorKind::WrongType { value, .. }
            | ValidationErrorKind::UnknownFormat { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A located validation finding.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    pub path: Path,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(path: Path, kind: ValidationErrorKind) -> Self {
        ValidationError { path, kind }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            path: self.path.to_string(),
            message: self.message(),
            value: self.kind.value().map(Value::to_json),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.path, self.kind)
    }
}

impl std::error::Error for ValidationError {}

/// Serializable form of a [`ValidationError`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

// ─── Schema lookup ──────────────────────────────────────────────────────────

/// A definition key that is not part of a schema model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown schema {definition_key}")]
pub struct UnknownSchema {
    pub definition_key: String,
}

impl From<UnknownSchema> for ValidationErrorKind {
    fn from(e: UnknownSchema) -> Self {
        ValidationErrorKind::UnknownSchema {
            definition_key: e.definition_key,
        }
    }
}

// ─── Loading ────────────────────────────────────────────────────────────────

/// Produced by the document loader. Fatal to the one document only.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LoadError {
    #[error("failed to parse document: {message}")]
    Parse { message: String },

    #[error("document root must be a mapping, got {actual}")]
    NotAMapping { actual: &'static str },

    #[error("missing required key: {key}")]
    RequiredKeyMissing { key: String },

    #[error("key {key} has wrong type {actual} (should be string)")]
    WrongType {
        key: String,
        actual: &'static str,
        value: Value,
    },
}

impl LoadError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        LoadError::Parse {
            message: message.into(),
        }
    }

    /// Location of the offending key, if the error has one.
    pub fn path(&self) -> Option<Path> {
        match self {
            LoadError::RequiredKeyMissing { key } | LoadError::WrongType { key, .. } => {
                Some(Path::root().child(key.as_str()))
            }
            _ => None,
        }
    }

    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            path: self.path().map(|p| p.to_string()).unwrap_or_default(),
            message: self.to_string(),
            value: match self {
                LoadError::WrongType { value, .. } => Some(value.to_json()),
                _ => None,
            },
        }
    }
}

/// Produced when a version's schema document cannot be turned into a store.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("schema document for {version} could not be fetched: {source}")]
    Source {
        version: String,
        #[source]
        source: SourceError,
    },

    #[error("schema document for {version} is not valid swagger JSON: {source}")]
    Json {
        version: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Produced by a schema document provider.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no schema document for version {version}")]
    NotFound { version: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Produced while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },

    #[error("invalid version {version:?}, requires format x.y")]
    Version { version: String },
}

/// Produced when a report cannot be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SerializeError {
    pub message: String,
}
