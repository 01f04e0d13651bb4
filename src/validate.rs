//! Recursive validation of a document tree against a schema graph.
//!
//! Walks the document depth first and returns **all** findings, not just the
//! first. A finding below one key never stops the scan of its siblings;
//! a definition that cannot be resolved only abandons the sub-tree that
//! references it.

use std::collections::HashSet;

use crate::enums::{PrimitiveType, RenameFormat};
use crate::error::{ValidationError, ValidationErrorKind};
use crate::path::Path;
use crate::primitives::is_valid_date_time;
use crate::store::Resolve;
use crate::types::{ArrayItem, PropertyKind, Schema};
use crate::value::{Mapping, Value};

/// Validates document mappings against the definitions of one resolver.
#[derive(Clone, Debug)]
pub struct Validator<R> {
    resolver: R,
}

impl<R: Resolve> Validator<R> {
    pub fn new(resolver: R) -> Self {
        Validator { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn version(&self) -> &str {
        self.resolver.version()
    }

    /// Validate a top-level mapping starting from the root path.
    pub fn validate(&self, incoming: &Mapping, schema: &Schema) -> Vec<ValidationError> {
        self.validate_at(incoming, schema, &Path::root())
    }

    /// Validate `incoming` located at `path`.
    ///
    /// For every key: the key must be a string, must be a known property of
    /// `schema`, and its value must match the property's kind. Referenced
    /// object definitions are followed recursively.
    pub fn validate_at(
        &self,
        incoming: &Mapping,
        schema: &Schema,
        path: &Path,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (raw_key, value) in incoming {
            let Some(key) = raw_key.as_str() else {
                errors.push(ValidationError::new(
                    path.clone(),
                    ValidationErrorKind::KeyNotString {
                        raw_key: raw_key.clone(),
                    },
                ));
                continue;
            };

            let child = path.child(key);

            let Some(property) = schema.properties.get(key) else {
                errors.push(ValidationError::new(
                    child,
                    ValidationErrorKind::UnknownKey {
                        key: key.to_string(),
                    },
                ));
                continue;
            };

            match &property.kind {
                PropertyKind::Primitive(t) => {
                    if !matches_primitive(*t, value) {
                        errors.push(wrong_type(&child, key, expected_name(*t), value));
                    }
                }
                PropertyKind::Array(item) => {
                    self.validate_array(key, value, item, &child, &mut errors);
                }
                PropertyKind::Reference(definition_key) => {
                    self.validate_reference(key, value, definition_key, &child, &mut errors);
                }
            }
        }

        errors
    }

    fn validate_array(
        &self,
        key: &str,
        value: &Value,
        item: &ArrayItem,
        path: &Path,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(items) = value.as_sequence() else {
            errors.push(wrong_type(path, key, "sequence", value));
            return;
        };

        match item {
            ArrayItem::Primitive(t) => {
                // Element findings stay at the array's path, without an index.
                for element in items {
                    if !matches_primitive(*t, element) {
                        errors.push(wrong_type(path, key, expected_name(*t), element));
                    }
                }
            }
            ArrayItem::Reference(definition_key) => {
                let schema = match self.resolver.resolve(definition_key) {
                    Ok(s) => s,
                    Err(e) => {
                        errors.push(ValidationError::new(path.clone(), e.into()));
                        return;
                    }
                };

                for (i, element) in items.iter().enumerate() {
                    let element_path = path.index(i);
                    self.validate_object(key, element, schema, &element_path, errors);
                }
            }
        }
    }

    fn validate_reference(
        &self,
        key: &str,
        value: &Value,
        definition_key: &str,
        path: &Path,
        errors: &mut Vec<ValidationError>,
    ) {
        let schema = match self.resolver.resolve(definition_key) {
            Ok(s) => s,
            Err(e) => {
                errors.push(ValidationError::new(path.clone(), e.into()));
                return;
            }
        };

        if schema.is_string_rename() {
            if let Some(mapping) = value.as_mapping() {
                errors.extend(check_required(schema, mapping, path));
            }
            if let Some(kind) = check_renamed_string(key, value, schema) {
                errors.push(ValidationError::new(path.clone(), kind));
            }
            return;
        }

        self.validate_object(key, value, schema, path, errors);
    }

    /// Required-field check followed by recursion into a mapping value.
    fn validate_object(
        &self,
        key: &str,
        value: &Value,
        schema: &Schema,
        path: &Path,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(mapping) = value.as_mapping() else {
            errors.push(wrong_type(path, key, "mapping", value));
            return;
        };

        errors.extend(check_required(schema, mapping, path));
        errors.extend(self.validate_at(mapping, schema, path));
    }
}

/// Report the first required field of `schema` missing from `value`.
///
/// Only one missing field is reported even when several are absent. A
/// non-string key in `value` is reported instead, and ends the check.
pub fn check_required(schema: &Schema, value: &Mapping, path: &Path) -> Vec<ValidationError> {
    if schema.required.is_empty() {
        return Vec::new();
    }

    let mut present: HashSet<&str> = HashSet::new();
    for (raw_key, _) in value {
        match raw_key.as_str() {
            Some(k) => {
                present.insert(k);
            }
            None => {
                return vec![ValidationError::new(
                    path.clone(),
                    ValidationErrorKind::KeyNotString {
                        raw_key: raw_key.clone(),
                    },
                )];
            }
        }
    }

    schema
        .required
        .iter()
        .find(|name| !present.contains(name.as_str()))
        .map(|name| {
            vec![ValidationError::new(
                path.clone(),
                ValidationErrorKind::RequiredKeyMissing { key: name.clone() },
            )]
        })
        .unwrap_or_default()
}

/// Check a value against a definition that renames `string`.
fn check_renamed_string(key: &str, value: &Value, schema: &Schema) -> Option<ValidationErrorKind> {
    match schema.rename_format() {
        RenameFormat::IntOrString => match value {
            Value::Str(_) | Value::Int(_) => None,
            other => Some(ValidationErrorKind::wrong_type(key, "int-or-string", other)),
        },
        RenameFormat::DateTime => match value {
            Value::Null => None,
            Value::Str(s) if is_valid_date_time(s) => None,
            Value::Str(_) => Some(ValidationErrorKind::wrong_type(key, "date-time", value)),
            other => Some(ValidationErrorKind::wrong_type(key, "string", other)),
        },
        RenameFormat::Unknown(format) => Some(ValidationErrorKind::UnknownFormat {
            format,
            value: value.clone(),
        }),
    }
}

fn matches_primitive(t: PrimitiveType, value: &Value) -> bool {
    match t {
        PrimitiveType::String => matches!(value, Value::Str(_)),
        PrimitiveType::Integer => matches!(value, Value::Int(_)),
        PrimitiveType::Boolean => matches!(value, Value::Bool(_)),
        PrimitiveType::Object => matches!(value, Value::Mapping(_)),
        PrimitiveType::Number => matches!(value, Value::Int(_) | Value::Float(_)),
    }
}

fn expected_name(t: PrimitiveType) -> &'static str {
    match t {
        PrimitiveType::Object => "mapping",
        other => other.as_str(),
    }
}

fn wrong_type(path: &Path, key: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        path.clone(),
        ValidationErrorKind::wrong_type(key, expected, value),
    )
}
