//! JSON schema loader.
//!
//! This module reads a reference-resolved JSON schema document into the
//! [`JsonSchema`] tree and checks the few structural preconditions the code
//! generator relies on.

use crate::error::SchemaError;
use crate::types::{JsonSchema, SchemaType};

/// Parses a JSON schema from a string.
///
/// # Arguments
/// * `json` - JSON schema content
///
/// # Returns
/// Parsed schema or error.
///
/// # Errors
/// Returns `SchemaError` if the JSON is malformed, the root is not an
/// object schema, or a `$ref` does not resolve to a definition.
pub fn parse_schema(json: &str) -> Result<JsonSchema, SchemaError> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    let schema: JsonSchema =
        serde_path_to_error::deserialize(deserializer).map_err(|e| SchemaError::Deserialize {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;

    check_root(&schema)?;
    check_references(&schema, &schema)?;

    Ok(schema)
}

/// Parses a JSON schema from a file.
///
/// # Errors
/// Returns `SchemaError` if reading or parsing fails.
pub fn parse_schema_file(path: &std::path::Path) -> Result<JsonSchema, SchemaError> {
    let json = std::fs::read_to_string(path)?;
    parse_schema(&json)
}

/// The root must describe a record: an object type (or no type) and no `$ref`.
fn check_root(schema: &JsonSchema) -> Result<(), SchemaError> {
    if schema.reference.is_some() {
        return Err(SchemaError::InvalidStructure {
            message: "root schema must not be a $ref".to_string(),
        });
    }

    let types = schema.non_null_types();
    if !(types.is_empty() || types == [SchemaType::Object]) {
        return Err(SchemaError::InvalidStructure {
            message: format!(
                "root schema must be an object, found '{}'",
                types
                    .iter()
                    .map(|t| t.keyword())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    Ok(())
}

/// Checks that every `$ref` in the tree names an existing definition.
fn check_references(root: &JsonSchema, node: &JsonSchema) -> Result<(), SchemaError> {
    if let Some(name) = node.definition_name()? {
        if root.definition(name).is_none() {
            return Err(SchemaError::UnknownDefinition {
                name: name.to_string(),
            });
        }
    }

    for (_, property) in node.properties() {
        check_references(root, property)?;
    }
    if let Some(items) = &node.items {
        check_references(root, items)?;
    }
    if let Some(crate::types::AdditionalProperties::Schema(value)) = &node.additional_properties {
        check_references(root, value)?;
    }
    for (_, definition) in node.definitions() {
        check_references(root, definition)?;
    }

    Ok(())
}
