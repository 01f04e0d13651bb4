//! Closed enumerations of the schema model.
//!
//! Raw Swagger documents carry these as free-form strings; they are mapped to
//! variants once, when a schema document is loaded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in scalar and container types a property can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    String,
    Integer,
    Boolean,
    /// Open-ended string-keyed map such as `labels`.
    Object,
    Number,
}

impl PrimitiveType {
    /// Map a Swagger `type` string. `array` and unknown names are not
    /// primitives.
    pub fn from_swagger(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveType::String),
            "integer" => Some(PrimitiveType::Integer),
            "boolean" => Some(PrimitiveType::Boolean),
            "object" => Some(PrimitiveType::Object),
            "number" => Some(PrimitiveType::Number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Object => "object",
            PrimitiveType::Number => "number",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format of a schema that renames the `string` type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameFormat {
    /// `intstr.IntOrString`: a string or an integer.
    IntOrString,
    /// `metav1.Time`: `YYYY-MM-DDTHH:MM:SSZ`, or null.
    DateTime,
    /// Any other format, including a missing one (empty string).
    Unknown(String),
}

impl RenameFormat {
    pub fn from_swagger(format: Option<&str>) -> Self {
        match format {
            Some("int-or-string") => RenameFormat::IntOrString,
            Some("date-time") => RenameFormat::DateTime,
            Some(other) => RenameFormat::Unknown(other.to_string()),
            None => RenameFormat::Unknown(String::new()),
        }
    }
}
