//! Error types for schema loading and hint configuration.

use thiserror::Error;

/// Error type for loading a schema tree.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or does not match the schema dialect.
    #[error("schema parse error at '{path}': {message}")]
    Deserialize {
        /// Path to the offending node.
        path: String,
        /// Error message.
        message: String,
    },

    /// The root of the document is not a record-shaped schema.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// A `$ref` that does not point into `#/definitions/`.
    #[error("unsupported reference '{reference}'")]
    UnsupportedReference {
        /// The reference text.
        reference: String,
    },

    /// A `$ref` naming a definition that does not exist.
    #[error("reference to unknown definition '{name}'")]
    UnknownDefinition {
        /// Definition name.
        name: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for hint configuration defects.
///
/// All variants are deterministic configuration errors; generation aborts
/// as soon as one is detected.
#[derive(Debug, Error)]
pub enum HintError {
    /// The hint document itself is not valid JSON or has the wrong shape.
    #[error("malformed hint document: {message}")]
    MalformedDocument {
        /// Error message.
        message: String,
    },

    /// A recognized hint kind whose arguments could not be read.
    #[error("invalid arguments for {kind} at '{scope}': {message}")]
    InvalidArguments {
        /// Hint scope.
        scope: String,
        /// Hint kind.
        kind: String,
        /// Error message.
        message: String,
    },

    /// Unknown property modifier token.
    #[error("invalid modifier '{modifier}' at '{scope}'")]
    InvalidModifier {
        /// Hint scope.
        scope: String,
        /// Offending token.
        modifier: String,
    },

    /// An `EnumHint` applied to a property without a `typeName`.
    #[error("EnumHint at '{scope}' requires a typeName")]
    MissingEnumTypeName {
        /// Hint scope.
        scope: String,
    },

    /// Member names or values do not line up with the schema literals.
    #[error(
        "enum '{type_name}' member count mismatch: expected {expected} {what}, found {actual}"
    )]
    MemberCountMismatch {
        /// Enum type name.
        type_name: String,
        /// Which list mismatched (`member names` or `member values`).
        what: String,
        /// Count implied by the schema.
        expected: usize,
        /// Count supplied by the hint.
        actual: usize,
    },

    /// Two enum members resolve to the same identifier.
    #[error("enum '{type_name}' declares member '{member}' more than once")]
    DuplicateEnumMember {
        /// Enum type name.
        type_name: String,
        /// Duplicated member identifier.
        member: String,
    },

    /// A type name in a property or dictionary hint that names nothing known.
    #[error("unknown type '{type_name}' in hint at '{scope}'")]
    UnknownPropertyType {
        /// Hint scope.
        scope: String,
        /// Unresolved type name.
        type_name: String,
    },
}

impl HintError {
    /// Creates an invalid arguments error.
    pub fn invalid_arguments(
        scope: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArguments {
            scope: scope.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a member count mismatch error.
    pub fn count_mismatch(
        type_name: impl Into<String>,
        what: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::MemberCountMismatch {
            type_name: type_name.into(),
            what: what.into(),
            expected,
            actual,
        }
    }
}
