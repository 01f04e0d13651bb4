use regex::Regex;
use std::sync::LazyLock;

use crate::error::LoadError;
use crate::types::Document;
use crate::value::Value;

/// Document-start marker at column 0, optionally followed by a comment.
static DOCUMENT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*(#.*)?$").unwrap());

/// Parse YAML text into a [`Value`] tree.
///
/// Performs YAML deserialization only; mapping keys keep whatever type the
/// YAML gave them.
pub fn parse_value(input: &str) -> Result<Value, LoadError> {
    if input.trim().is_empty() {
        return Err(LoadError::parse("empty input"));
    }

    check_multi_document(input)?;

    serde_saphyr::from_str::<Value>(input).map_err(|e| LoadError::parse(e.to_string()))
}

/// Load a manifest from raw bytes.
///
/// The root must be a mapping holding string `apiVersion` and `kind` keys.
/// Both are removed from the returned [`Document::body`].
pub fn load_document(bytes: &[u8]) -> Result<Document, LoadError> {
    let input = std::str::from_utf8(bytes)
        .map_err(|e| LoadError::parse(format!("input is not valid UTF-8: {}", e)))?;
    load_str(input)
}

/// Load a manifest from YAML text. See [`load_document`].
pub fn load_str(input: &str) -> Result<Document, LoadError> {
    let root = match parse_value(input)? {
        Value::Mapping(m) => m,
        other => {
            return Err(LoadError::NotAMapping {
                actual: other.type_name(),
            });
        }
    };

    let api_version = required_string(&root, "apiVersion")?;
    let kind = required_string(&root, "kind")?;

    let body = root
        .into_iter()
        .filter(|(k, _)| !matches!(k.as_str(), Some("apiVersion") | Some("kind")))
        .collect();

    Ok(Document {
        kind,
        api_version,
        body,
    })
}

fn required_string(root: &[(Value, Value)], key: &str) -> Result<String, LoadError> {
    let value = root
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
        .ok_or_else(|| LoadError::RequiredKeyMissing {
            key: key.to_string(),
        })?;

    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(LoadError::WrongType {
            key: key.to_string(),
            actual: other.type_name(),
            value: other.clone(),
        }),
    }
}

/// Reject input holding more than one YAML document.
/// Only markers at column 0 count, so block scalars containing `---` pass.
fn check_multi_document(input: &str) -> Result<(), LoadError> {
    let mut markers = 0;
    let mut content_before_first = false;
    for line in input.lines() {
        if DOCUMENT_MARKER_RE.is_match(line) {
            markers += 1;
            // A leading marker opens the first document; any later one, or a
            // marker after content, opens another.
            if markers > 1 || content_before_first {
                return Err(LoadError::parse(
                    "multi-document YAML is not supported; submit one object at a time",
                ));
            }
        } else if markers == 0 && !is_blank_or_comment(line) {
            content_before_first = true;
        }
    }
    Ok(())
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%')
}
