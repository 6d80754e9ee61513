//! Schema tree definitions.
//!
//! This module contains the data structures for the supported JSON schema
//! dialect: objects, arrays, strings, numbers, integers, booleans, `$ref`,
//! `enum` and `additionalProperties`. Property and definition maps keep the
//! order in which they were declared.

use crate::error::SchemaError;
use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix every supported `$ref` starts with.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// JSON schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `object`
    Object,
    /// `array`
    Array,
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
}

impl SchemaType {
    /// Returns the JSON type of a literal value.
    #[must_use]
    pub fn of_literal(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the schema keyword for this type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// Value of the `additionalProperties` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` or `false`.
    Allowed(bool),
    /// A schema every additional property value conforms to.
    Schema(Box<JsonSchema>),
}

/// One node of a reference-resolved schema tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonSchema {
    /// `$ref`, always of the form `#/definitions/<name>`.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Declared types; a single name is read as a one-element list.
    #[serde(
        rename = "type",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub types: Vec<SchemaType>,
    /// String format (`date-time`, `uri`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared properties in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, JsonSchema>>,
    /// Names of required properties.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array element schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,
    /// Map value schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Enumerated literals.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Named definitions in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, JsonSchema>>,
}

impl JsonSchema {
    /// Creates a schema declaring a single type.
    #[must_use]
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            types: vec![schema_type],
            ..Self::default()
        }
    }

    /// Creates a schema referencing a named definition.
    #[must_use]
    pub fn reference_to(definition: &str) -> Self {
        Self {
            reference: Some(format!("{DEFINITIONS_PREFIX}{definition}")),
            ..Self::default()
        }
    }

    /// Returns the declared types with `null` removed.
    #[must_use]
    pub fn non_null_types(&self) -> Vec<SchemaType> {
        self.types
            .iter()
            .copied()
            .filter(|t| *t != SchemaType::Null)
            .collect()
    }

    /// Returns true if `null` is among the declared types.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.types.contains(&SchemaType::Null)
    }

    /// Returns true if the node declares exactly one non-null type, `array`.
    #[must_use]
    pub fn is_array_shaped(&self) -> bool {
        self.non_null_types() == [SchemaType::Array]
    }

    /// Returns true if the node declares at least one property.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Returns true if `name` is listed in `required`.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Returns the definition name a `$ref` points to.
    ///
    /// # Errors
    /// Returns `SchemaError::UnsupportedReference` if the reference does not
    /// point into `#/definitions/`.
    pub fn definition_name(&self) -> Result<Option<&str>, SchemaError> {
        match &self.reference {
            None => Ok(None),
            Some(reference) => reference
                .strip_prefix(DEFINITIONS_PREFIX)
                .filter(|name| !name.is_empty())
                .map(Some)
                .ok_or_else(|| SchemaError::UnsupportedReference {
                    reference: reference.clone(),
                }),
        }
    }

    /// Looks up a named definition.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&JsonSchema> {
        self.definitions.as_ref().and_then(|d| d.get(name))
    }

    /// Iterates over named definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = (&String, &JsonSchema)> {
        self.definitions.iter().flat_map(|d| d.iter())
    }

    /// Iterates over declared properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&String, &JsonSchema)> {
        self.properties.iter().flat_map(|p| p.iter())
    }
}

/// Reads `"type"` as either a single name or an array of names.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<SchemaType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(SchemaType),
        Many(Vec<SchemaType>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(t) => vec![t],
        OneOrMany::Many(ts) => ts,
    })
}
