//! [`VersionReport`] → JSON, YAML or plain text.

use crate::error::{ErrorReport, LoadError, SerializeError};
use crate::orchestrate::VersionReport;

/// Output format of [`serialize_report`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(SerializeError {
                message: format!("unknown output format: {}", other),
            }),
        }
    }
}

/// Report keyed by version, preserving report order. A version that was
/// not evaluated maps to `{"not_evaluated": reason}` instead of a list.
fn to_json_value(report: &VersionReport) -> Result<serde_json::Value, SerializeError> {
    let mut map = serde_json::Map::new();
    for result in report.iter() {
        let value = match &result.not_evaluated {
            Some(reason) => serde_json::json!({ "not_evaluated": reason }),
            None => {
                let errors: Vec<ErrorReport> =
                    result.errors.iter().map(|e| e.to_report()).collect();
                serde_json::to_value(&errors).map_err(|e| SerializeError {
                    message: format!("failed to convert report to JSON value: {}", e),
                })?
            }
        };
        map.insert(result.version.clone(), value);
    }
    Ok(serde_json::Value::Object(map))
}

/// Render a report.
///
/// JSON and YAML emit a map of version to error list (empty for valid
/// versions, a `not_evaluated` object for skipped ones). Text emits one summary line per version followed by its
/// errors, and a closing line naming versions that were not evaluated.
/// Every format ends with a newline.
pub fn serialize_report(
    report: &VersionReport,
    format: OutputFormat,
) -> Result<String, SerializeError> {
    match format {
        OutputFormat::Json => {
            let value = to_json_value(report)?;
            serde_json::to_string_pretty(&value)
                .map(terminate_line)
                .map_err(|e| SerializeError {
                    message: format!("failed to serialize to JSON: {}", e),
                })
        }
        OutputFormat::Yaml => {
            let value = to_json_value(report)?;
            serde_saphyr::to_string(&value)
                .map(terminate_line)
                .map_err(|e| SerializeError {
                    message: format!("failed to serialize to YAML: {}", e),
                })
        }
        OutputFormat::Text => Ok(render_text(report)),
    }
}

/// Render a document that failed to load, in the same formats.
pub fn serialize_load_error(
    error: &LoadError,
    format: OutputFormat,
) -> Result<String, SerializeError> {
    let report = error.to_report();
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)
            .map(terminate_line)
            .map_err(|e| SerializeError {
                message: format!("failed to serialize to JSON: {}", e),
            }),
        OutputFormat::Yaml => serde_saphyr::to_string(&report)
            .map(terminate_line)
            .map_err(|e| SerializeError {
                message: format!("failed to serialize to YAML: {}", e),
            }),
        OutputFormat::Text => Ok(match error.path() {
            Some(path) => format!("[{}] {}\n", path, error),
            None => format!("{}\n", error),
        }),
    }
}

fn render_text(report: &VersionReport) -> String {
    let mut out = String::new();
    for result in report.iter() {
        let summary = match (&result.not_evaluated, result.errors.len()) {
            (Some(reason), _) => format!("not evaluated ({})", reason),
            (None, 0) => "valid".to_string(),
            (None, 1) => "1 error".to_string(),
            (None, n) => format!("{} errors", n),
        };
        out.push_str(&format!("{}: {}\n", result.version, summary));
        for error in &result.errors {
            out.push_str(&format!("  {}\n", error));
        }
    }

    let skipped = report.not_evaluated_versions();
    if !skipped.is_empty() {
        out.push_str(&format!("not evaluated: {}\n", skipped.join(", ")));
    }
    out
}

fn terminate_line(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
