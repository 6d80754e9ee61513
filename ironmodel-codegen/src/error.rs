//! Error types for object model generation.

use thiserror::Error;

/// Error type for generation operations.
///
/// Every variant aborts the whole batch; nothing partial is returned.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema error: {0}")]
    Schema(#[from] ironmodel_schema::SchemaError),

    /// Hint configuration error.
    #[error("hint error: {0}")]
    Hint(#[from] ironmodel_schema::HintError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema construct the type model builder cannot classify.
    #[error("unsupported schema shape for '{type_name}.{property}': {message}")]
    SchemaShape {
        /// Declaring type.
        type_name: String,
        /// Property name, or empty for the type itself.
        property: String,
        /// Error message.
        message: String,
    },

    /// Two schemas resolve to one generated name.
    #[error("generated name '{name}' is claimed by both {first} and {second}")]
    NameCollision {
        /// Colliding generated name.
        name: String,
        /// First claimant.
        first: String,
        /// Second claimant.
        second: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a schema shape error.
    pub fn schema_shape(
        type_name: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::SchemaShape {
            type_name: type_name.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    /// Creates a name collision error.
    pub fn name_collision(
        name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::NameCollision {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
