use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::enums::*;
use crate::value::Mapping;

// ─── Document ───────────────────────────────────────────────────────────────

/// A loaded manifest: its type identity plus the remaining top-level fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub kind: String,
    pub api_version: String,
    /// Top-level mapping with `apiVersion` and `kind` removed.
    pub body: Mapping,
}

// ─── Schema model ───────────────────────────────────────────────────────────

/// One named definition of a schema document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    pub description: Option<String>,
    /// Required property names, in declared order.
    pub required: Vec<String>,
    pub properties: HashMap<String, Property>,
    /// Set when the definition renames a builtin (e.g. `type: string`).
    pub type_rename: Option<String>,
    pub format: Option<String>,
    pub group_version_kind: Vec<GroupVersionKind>,
}

impl Schema {
    /// True when the definition is a renamed `string` rather than an object.
    pub fn is_string_rename(&self) -> bool {
        self.type_rename.as_deref() == Some("string")
    }

    pub fn rename_format(&self) -> RenameFormat {
        RenameFormat::from_swagger(self.format.as_deref())
    }
}

/// A single field of a [`Schema`].
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub kind: PropertyKind,
    pub description: Option<String>,
}

impl Property {
    pub fn primitive(t: PrimitiveType) -> Self {
        Property {
            kind: PropertyKind::Primitive(t),
            description: None,
        }
    }

    pub fn array(item: ArrayItem) -> Self {
        Property {
            kind: PropertyKind::Array(item),
            description: None,
        }
    }

    pub fn reference(definition_key: impl Into<String>) -> Self {
        Property {
            kind: PropertyKind::Reference(definition_key.into()),
            description: None,
        }
    }
}

/// What a property holds, decided when the schema document is loaded.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKind {
    Primitive(PrimitiveType),
    Array(ArrayItem),
    Reference(String),
}

/// Element type of an array property.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayItem {
    Primitive(PrimitiveType),
    Reference(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVersionKind {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kind: String,
}

// ─── Raw Swagger document ───────────────────────────────────────────────────

/// The subset of a Swagger 2.0 document this crate reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSwagger {
    #[serde(default)]
    pub definitions: HashMap<String, RawSchema>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSchema {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub properties: HashMap<String, RawProperty>,
    #[serde(default, rename = "type")]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, rename = "x-kubernetes-group-version-kind")]
    pub group_version_kind: Vec<GroupVersionKind>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawProperty {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub property_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub items: Option<Box<RawItems>>,
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawItems {
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub items: Option<Box<RawItems>>,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        Schema {
            description: raw.description,
            required: raw.required,
            properties: raw
                .properties
                .into_iter()
                .map(|(name, p)| (name, Property::from(p)))
                .collect(),
            type_rename: raw.schema_type,
            format: raw.format,
            group_version_kind: raw.group_version_kind,
        }
    }
}

impl From<RawProperty> for Property {
    fn from(raw: RawProperty) -> Self {
        // A declared builtin type wins over `$ref`. Anything unrecognised is a
        // reference; an absent `$ref` becomes "" and fails at resolution.
        let declared = raw.property_type.as_deref();
        let kind = match (declared, declared.and_then(PrimitiveType::from_swagger)) {
            (Some("array"), _) => PropertyKind::Array(array_item(raw.items.as_deref())),
            (_, Some(p)) => PropertyKind::Primitive(p),
            _ => PropertyKind::Reference(raw.reference.unwrap_or_default()),
        };
        Property {
            kind,
            description: raw.description,
        }
    }
}

fn array_item(items: Option<&RawItems>) -> ArrayItem {
    let Some(items) = items else {
        return ArrayItem::Reference(String::new());
    };
    match items.item_type.as_deref().and_then(PrimitiveType::from_swagger) {
        Some(p) => ArrayItem::Primitive(p),
        None => ArrayItem::Reference(items.reference.clone().unwrap_or_default()),
    }
}
