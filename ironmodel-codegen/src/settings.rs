//! Generator settings.

use crate::error::{CodegenError, Result};
use serde::{Deserialize, Serialize};

/// Settings controlling what is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Name of the record generated for the schema root.
    pub root_class_name: String,
    /// Namespace carried into every artifact.
    pub namespace_name: Option<String>,
    /// Emit init, copy and default constructor programs.
    pub generate_cloning_code: bool,
    /// Emit a separate equality comparer artifact per record.
    pub generate_equality_comparers: bool,
    /// Run the visitor synthesizer.
    pub generate_rewriting_visitor: bool,
    /// Records are sealed.
    pub seal_classes: bool,
    /// Record members are virtual.
    pub virtual_members: bool,
    /// The init routine is protected instead of private.
    pub protected_init_methods: bool,
    /// Notice passed through to every artifact.
    pub copyright_notice: Option<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            root_class_name: "Root".to_string(),
            namespace_name: None,
            generate_cloning_code: true,
            generate_equality_comparers: false,
            generate_rewriting_visitor: false,
            seal_classes: false,
            virtual_members: false,
            protected_init_methods: false,
            copyright_notice: None,
        }
    }
}

impl GeneratorSettings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the JSON cannot be read.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CodegenError::generation(format!("invalid generator settings: {e}")))
    }

    /// Sets the root class name.
    #[must_use]
    pub fn root_class_name(mut self, name: impl Into<String>) -> Self {
        self.root_class_name = name.into();
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn namespace_name(mut self, namespace: impl Into<String>) -> Self {
        self.namespace_name = Some(namespace.into());
        self
    }

    /// Enables or disables cloning code.
    #[must_use]
    pub fn generate_cloning_code(mut self, enabled: bool) -> Self {
        self.generate_cloning_code = enabled;
        self
    }

    /// Enables or disables equality comparer artifacts.
    #[must_use]
    pub fn generate_equality_comparers(mut self, enabled: bool) -> Self {
        self.generate_equality_comparers = enabled;
        self
    }

    /// Enables or disables the rewriting visitor.
    #[must_use]
    pub fn generate_rewriting_visitor(mut self, enabled: bool) -> Self {
        self.generate_rewriting_visitor = enabled;
        self
    }

    /// Seals generated records.
    #[must_use]
    pub fn seal_classes(mut self, enabled: bool) -> Self {
        self.seal_classes = enabled;
        self
    }

    /// Makes record members virtual.
    #[must_use]
    pub fn virtual_members(mut self, enabled: bool) -> Self {
        self.virtual_members = enabled;
        self
    }

    /// Makes the init routine protected.
    #[must_use]
    pub fn protected_init_methods(mut self, enabled: bool) -> Self {
        self.protected_init_methods = enabled;
        self
    }

    /// Sets the copyright notice.
    #[must_use]
    pub fn copyright_notice(mut self, notice: impl Into<String>) -> Self {
        self.copyright_notice = Some(notice.into());
        self
    }

    /// Name of the rewriting visitor artifact.
    #[must_use]
    pub fn visitor_name(&self) -> String {
        format!("{}RewritingVisitor", self.root_class_name)
    }
}
