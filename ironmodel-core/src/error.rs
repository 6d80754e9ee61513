//! Error types for IronModel core operations.

use thiserror::Error;

/// Error raised while executing synthesized programs.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A copy constructor was handed a null source.
    #[error("cannot construct '{type_name}' from a null instance")]
    NullCopySource {
        /// Type being constructed.
        type_name: String,
    },

    /// No program exists for the requested type.
    #[error("unknown type '{type_name}'")]
    UnknownType {
        /// Requested type name.
        type_name: String,
    },

    /// A value of the wrong shape reached a program.
    #[error("type mismatch: expected {expected}, actual {actual}")]
    TypeMismatch {
        /// Expected shape.
        expected: String,
        /// Shape found.
        actual: String,
    },

    /// Cloning code was not generated for the type.
    #[error("cloning code was not generated for '{type_name}'")]
    CloningNotGenerated {
        /// Type name.
        type_name: String,
    },

    /// The init routine was called with the wrong number of arguments.
    #[error("'{type_name}' expects {expected} constructor arguments, found {actual}")]
    ArityMismatch {
        /// Type name.
        type_name: String,
        /// Number of properties.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// JSON instance data does not match the property signatures.
    #[error("invalid instance at '{path}': {message}")]
    InvalidInstance {
        /// Path to the offending value.
        path: String,
        /// Error message.
        message: String,
    },

    /// No rewriting visitor was generated.
    #[error("no rewriting visitor was generated")]
    VisitorNotGenerated,
}

impl RuntimeError {
    /// Creates an invalid instance error.
    pub fn invalid_instance(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInstance {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for IronModel core operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
