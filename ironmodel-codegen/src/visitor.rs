//! Rewriting visitor synthesis.
//!
//! Runs only after every type is registered, since deciding whether a
//! property is rewritten needs to know whether its target is a generated
//! record.

use crate::error::{CodegenError, Result};
use crate::naming::visit_method_name;
use crate::records::RecordArtifact;
use crate::registry::TypeRegistry;
use crate::settings::GeneratorSettings;
use ironmodel_core::{NodeKind, PropertyStep, RewriteOp, TypeSignature, VisitMethod, VisitorProgram};
use serde::Serialize;

/// Synthesized rewriting visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorArtifact {
    /// Visitor name.
    pub name: String,
    /// Namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Copyright notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_notice: Option<String>,
    /// Dispatch table and visit methods.
    pub program: VisitorProgram,
}

/// Builds the rewriting visitor from the complete registry.
pub struct VisitorSynthesizer<'a> {
    settings: &'a GeneratorSettings,
}

impl<'a> VisitorSynthesizer<'a> {
    /// Creates a new visitor synthesizer.
    #[must_use]
    pub fn new(settings: &'a GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Synthesizes the visitor over every record in `registry`.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if a property targets a record that
    /// was never registered.
    pub fn synthesize(&self, registry: &TypeRegistry) -> Result<VisitorArtifact> {
        // registry iteration is name-sorted, so tags are deterministic
        let records: Vec<&RecordArtifact> = registry.records().collect();

        let mut node_kinds = Vec::with_capacity(records.len());
        let mut methods = Vec::with_capacity(records.len());
        for (tag, record) in records.iter().enumerate() {
            let tag = u32::try_from(tag)
                .map_err(|_| CodegenError::generation("too many records for one visitor"))?;
            node_kinds.push(NodeKind {
                tag,
                type_name: record.name.clone(),
            });
            methods.push(self.visit_method(registry, record)?);
        }

        Ok(VisitorArtifact {
            name: self.settings.visitor_name(),
            namespace: self.settings.namespace_name.clone(),
            copyright_notice: self.settings.copyright_notice.clone(),
            program: VisitorProgram {
                name: self.settings.visitor_name(),
                node_kinds,
                methods,
            },
        })
    }

    fn visit_method(&self, registry: &TypeRegistry, record: &RecordArtifact) -> Result<VisitMethod> {
        let mut rewrites = Vec::new();
        for property in &record.properties {
            let Some(target) = property.visited_record() else {
                continue;
            };
            if registry.record(target).is_none() {
                return Err(CodegenError::generation(format!(
                    "'{}.{}' targets unregistered record '{target}'",
                    record.name, property.name
                )));
            }
            if let Some(op) = rewrite_op(&property.signature) {
                rewrites.push(PropertyStep::new(property.name.as_str(), op));
            }
        }

        Ok(VisitMethod {
            type_name: record.name.clone(),
            method_name: visit_method_name(&record.name),
            rewrites,
        })
    }
}

/// One `EachElement` per list layer around a record leaf.
fn rewrite_op(signature: &TypeSignature) -> Option<RewriteOp> {
    match signature {
        TypeSignature::NamedRecord(_) => Some(RewriteOp::Dispatch),
        TypeSignature::List(element) => {
            rewrite_op(element).map(|op| RewriteOp::EachElement(Box::new(op)))
        }
        _ => None,
    }
}
