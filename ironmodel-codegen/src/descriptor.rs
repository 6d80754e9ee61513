//! Property descriptors.
//!
//! A [`TypeDescriptor`] describes one property, or one synthetic nesting
//! layer below a property (`"Prop[]"` for a list element, `"Prop{}"` for a map
//! value). The comparison, hash and clone kinds are derived from the
//! signature alone, so they always agree in shape.

use ironmodel_core::{ScalarKind, TypeSignature};
use ironmodel_schema::{AttributeHint, Modifier};
use serde::Serialize;

/// How a layer is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonKind {
    /// Scalar `==`.
    ValueEquals,
    /// Null-aware delegation to the value's own equality.
    StructuralEquals,
    /// Order-sensitive element-wise comparison.
    Collection,
    /// Order-independent keyed comparison.
    Dictionary,
}

/// How a layer contributes to a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HashKind {
    /// Value type, always contributes.
    ScalarValue,
    /// Reference type, contributes only when non-null.
    ScalarRef,
    /// Ordered multiply-accumulate.
    Collection,
    /// Xor over entries.
    Dictionary,
}

/// How a layer is cloned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CloneKind {
    /// Stored directly.
    Assign,
    /// Copy-constructed.
    Clone,
    /// Fresh ordered container.
    Collection,
    /// Fresh map.
    Dictionary,
    /// Rebuilt from the original string and runtime kind.
    Uri,
}

impl ComparisonKind {
    /// Comparison kind of a signature.
    #[must_use]
    pub fn of(signature: &TypeSignature) -> Self {
        match signature {
            TypeSignature::Scalar(_) | TypeSignature::NamedEnum(_) => Self::ValueEquals,
            TypeSignature::NamedRecord(_) | TypeSignature::UntypedObject => Self::StructuralEquals,
            TypeSignature::List(_) => Self::Collection,
            TypeSignature::Map { .. } => Self::Dictionary,
        }
    }
}

impl HashKind {
    /// Hash kind of a signature.
    #[must_use]
    pub fn of(signature: &TypeSignature) -> Self {
        match signature {
            TypeSignature::Scalar(kind) if kind.is_value_type() => Self::ScalarValue,
            TypeSignature::NamedEnum(_) => Self::ScalarValue,
            TypeSignature::Scalar(_)
            | TypeSignature::NamedRecord(_)
            | TypeSignature::UntypedObject => Self::ScalarRef,
            TypeSignature::List(_) => Self::Collection,
            TypeSignature::Map { .. } => Self::Dictionary,
        }
    }
}

impl CloneKind {
    /// Clone kind of a signature.
    #[must_use]
    pub fn of(signature: &TypeSignature) -> Self {
        match signature {
            TypeSignature::Scalar(ScalarKind::Uri) => Self::Uri,
            TypeSignature::Scalar(_)
            | TypeSignature::NamedEnum(_)
            | TypeSignature::UntypedObject => Self::Assign,
            TypeSignature::NamedRecord(_) => Self::Clone,
            TypeSignature::List(_) => Self::Collection,
            TypeSignature::Map { .. } => Self::Dictionary,
        }
    }
}

/// Descriptor of one property or nesting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Generated property name, or the synthetic layer key.
    pub name: String,
    /// Name used in serialized instances.
    pub serialized_name: String,
    /// Description from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comparison kind.
    pub comparison_kind: ComparisonKind,
    /// Hash kind.
    pub hash_kind: HashKind,
    /// Clone kind.
    pub clone_kind: CloneKind,
    /// Inferred signature.
    pub signature: TypeSignature,
    /// Import the emitted declaration needs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_import: Option<String>,
    /// Listed in the schema's `required`.
    pub is_required: bool,
    /// Schema default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    /// Record or enum generated in this run, possibly under list layers.
    pub is_schema_defined_type: bool,
    /// Position in the schema's property order.
    pub declaration_order: usize,
    /// Declaration modifiers from hints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    /// Attribute declarations from hints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeHint>,
}

impl TypeDescriptor {
    /// Creates a descriptor whose kinds follow from `signature`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        serialized_name: impl Into<String>,
        signature: TypeSignature,
        declaration_order: usize,
    ) -> Self {
        Self {
            name: name.into(),
            serialized_name: serialized_name.into(),
            description: None,
            comparison_kind: ComparisonKind::of(&signature),
            hash_kind: HashKind::of(&signature),
            clone_kind: CloneKind::of(&signature),
            required_import: required_import(&signature).map(str::to_string),
            is_required: false,
            default_value: None,
            is_schema_defined_type: signature.leaf_through_lists().is_named(),
            declaration_order,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            signature,
        }
    }

    /// Returns true unless the modifiers name a non-public access level.
    #[must_use]
    pub fn is_public(&self) -> bool {
        let mut access = self.modifiers.iter().filter(|m| m.is_access()).peekable();
        access.peek().is_none() || self.modifiers.contains(&Modifier::Public)
    }

    /// Record the visitor rewrites through this property, if any.
    ///
    /// Only list layers are descended; map values are not visited.
    #[must_use]
    pub fn visited_record(&self) -> Option<&str> {
        if self.is_schema_defined_type {
            self.signature.leaf_through_lists().record_name()
        } else {
            None
        }
    }
}

fn required_import(signature: &TypeSignature) -> Option<&'static str> {
    match signature {
        TypeSignature::List(_) | TypeSignature::Map { .. } => Some("collections"),
        TypeSignature::Scalar(ScalarKind::DateTime) => Some("datetime"),
        TypeSignature::Scalar(ScalarKind::Uri) => Some("uri"),
        _ => None,
    }
}
