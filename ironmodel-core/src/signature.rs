//! Property type signatures.
//!
//! A [`TypeSignature`] is the inferred structural type of a property. Its
//! nesting mirrors the schema's nesting: every array layer is a `List`,
//! every hinted dictionary layer a `Map`. Named records and enums are leaves,
//! so a self-referential schema never produces an infinite signature.

use serde::Serialize;
use std::fmt;

/// Scalar property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarKind {
    /// `boolean`
    Boolean,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `string`
    String,
    /// `string` with `format: date-time`
    DateTime,
    /// `string` with `format: uri` or `uri-reference`
    Uri,
}

impl ScalarKind {
    /// Resolves a scalar type name used in hints.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "bool" | "boolean" => Some(Self::Boolean),
            "int" | "integer" | "long" => Some(Self::Integer),
            "double" | "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "dateTime" | "date-time" | "DateTime" => Some(Self::DateTime),
            "uri" | "Uri" => Some(Self::Uri),
            _ => None,
        }
    }

    /// Returns the canonical keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::DateTime => "dateTime",
            Self::Uri => "uri",
        }
    }

    /// Returns true for kinds compared and hashed by value with no null guard.
    #[must_use]
    pub const fn is_value_type(self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Integer | Self::Number | Self::DateTime
        )
    }
}

/// Structural type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeSignature {
    /// A scalar.
    Scalar(ScalarKind),
    /// A record generated in the same run.
    NamedRecord(String),
    /// An enum generated in the same run.
    NamedEnum(String),
    /// An ordered collection.
    List(Box<TypeSignature>),
    /// A key/value map.
    Map {
        /// Key type name.
        key_type_name: String,
        /// Value signature.
        value: Box<TypeSignature>,
    },
    /// An object with no generated type.
    UntypedObject,
}

impl TypeSignature {
    /// Creates a list signature.
    #[must_use]
    pub fn list(element: TypeSignature) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a map signature.
    #[must_use]
    pub fn map(key_type_name: impl Into<String>, value: TypeSignature) -> Self {
        Self::Map {
            key_type_name: key_type_name.into(),
            value: Box::new(value),
        }
    }

    /// Strips every enclosing `List` layer.
    #[must_use]
    pub fn leaf_through_lists(&self) -> &TypeSignature {
        let mut current = self;
        while let Self::List(element) = current {
            current = element;
        }
        current
    }

    /// Returns true if the signature names a record or enum of this run.
    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::NamedRecord(_) | Self::NamedEnum(_))
    }

    /// Returns the named record, if this signature is one.
    #[must_use]
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::NamedRecord(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.keyword()),
            Self::NamedRecord(name) | Self::NamedEnum(name) => f.write_str(name),
            Self::List(element) => write!(f, "List<{element}>"),
            Self::Map {
                key_type_name,
                value,
            } => write!(f, "Map<{key_type_name}, {value}>"),
            Self::UntypedObject => f.write_str("object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let sig = TypeSignature::list(TypeSignature::map(
            "string",
            TypeSignature::NamedRecord("Location".to_string()),
        ));
        assert_eq!(sig.to_string(), "List<Map<string, Location>>");
    }

    #[test]
    fn test_leaf_through_lists_stops_at_map() {
        let inner = TypeSignature::map("string", TypeSignature::NamedRecord("A".to_string()));
        let sig = TypeSignature::list(TypeSignature::list(inner.clone()));
        assert_eq!(sig.leaf_through_lists(), &inner);
    }

    #[test]
    fn test_scalar_type_names() {
        assert_eq!(ScalarKind::from_type_name("int"), Some(ScalarKind::Integer));
        assert_eq!(ScalarKind::from_type_name("uri"), Some(ScalarKind::Uri));
        assert_eq!(ScalarKind::from_type_name("Widget"), None);
        assert!(ScalarKind::DateTime.is_value_type());
        assert!(!ScalarKind::String.is_value_type());
    }
}
