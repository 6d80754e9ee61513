//! Synthesized algorithm programs.
//!
//! Each generated record carries three programs: equality, hash and
//! init (the routine behind the copy and default constructors). A program is
//! a list of per-property steps; each step is a small operation tree whose
//! shape follows the property's container nesting. A list of maps of records
//! is `Collection(Dictionary(...))` all the way down, so one routine handles
//! every depth and every combination of container kinds.

use crate::signature::TypeSignature;
use serde::Serialize;

/// Initial value of every record hash.
pub const HASH_SEED: i32 = 17;

/// Multiplier applied before each hash contribution.
pub const HASH_MULTIPLIER: i32 = 31;

/// Equality operation for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// Scalar `==`.
    ValueEquals,
    /// Null-aware delegation to the value's own equality.
    StructuralEquals,
    /// Order-sensitive element-wise comparison.
    Collection(Box<CompareOp>),
    /// Order-independent keyed comparison.
    Dictionary(Box<CompareOp>),
}

/// Hash contribution for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HashOp {
    /// Value type; always contributes.
    ScalarValue,
    /// Reference type; contributes only when non-null.
    ScalarRef,
    /// Ordered multiply-accumulate over elements.
    Collection(Box<HashOp>),
    /// Xor of key and value hashes, folded in once.
    Dictionary(Box<HashOp>),
}

/// Clone operation for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CloneOp {
    /// Store the value as is.
    Assign,
    /// Null-guarded copy construction of the named record.
    Clone(String),
    /// Fresh ordered container of cloned elements.
    Collection(Box<CloneOp>),
    /// Fresh map of cloned values.
    Dictionary(Box<CloneOp>),
    /// Rebuild from the original string, keeping the runtime absolute/relative kind.
    Uri,
}

/// Rewrite operation for one layer of a visitor method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RewriteOp {
    /// Null-checked call to the dispatcher; the result replaces the value.
    Dispatch,
    /// Rewrite every element, bounded by the container's live length.
    EachElement(Box<RewriteOp>),
}

/// One property's operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyStep<Op> {
    /// Generated property name.
    pub property: String,
    /// Operation tree.
    pub op: Op,
}

impl<Op> PropertyStep<Op> {
    /// Creates a step.
    #[must_use]
    pub fn new(property: impl Into<String>, op: Op) -> Self {
        Self {
            property: property.into(),
            op,
        }
    }
}

/// Declared property of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySlot {
    /// Generated property name.
    pub name: String,
    /// Name used in serialized instances.
    pub serialized_name: String,
    /// Property signature.
    pub signature: TypeSignature,
    /// Schema default, applied by the default constructor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

/// Hash program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashProgram {
    /// Initial accumulator.
    pub seed: i32,
    /// Multiplier.
    pub multiplier: i32,
    /// Contributions in declaration order.
    pub steps: Vec<PropertyStep<HashOp>>,
}

/// All synthesized programs of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordProgram {
    /// Record name.
    pub type_name: String,
    /// Properties in declaration order.
    pub slots: Vec<PropertySlot>,
    /// Equality steps.
    pub equality: Vec<PropertyStep<CompareOp>>,
    /// Hash program.
    pub hash: HashProgram,
    /// Init steps, absent when cloning code is not generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<Vec<PropertyStep<CloneOp>>>,
}

/// Dispatch tag of a record in the rewriting visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeKind {
    /// Tag, assigned in name-sorted order starting at zero.
    pub tag: u32,
    /// Record name.
    pub type_name: String,
}

/// Visitor method for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitMethod {
    /// Record name.
    pub type_name: String,
    /// Method name (`Visit<Record>`).
    pub method_name: String,
    /// Properties rewritten in place, in declaration order.
    pub rewrites: Vec<PropertyStep<RewriteOp>>,
}

/// Rewriting visitor program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorProgram {
    /// Visitor name.
    pub name: String,
    /// Dispatch tags sorted by record name.
    pub node_kinds: Vec<NodeKind>,
    /// Methods indexed by tag.
    pub methods: Vec<VisitMethod>,
}

impl VisitorProgram {
    /// Looks up the dispatch tag of a record.
    #[must_use]
    pub fn kind_of(&self, type_name: &str) -> Option<&NodeKind> {
        self.node_kinds
            .binary_search_by(|k| k.type_name.as_str().cmp(type_name))
            .ok()
            .map(|index| &self.node_kinds[index])
    }

    /// Returns the method for a tag.
    #[must_use]
    pub fn method(&self, kind: &NodeKind) -> Option<&VisitMethod> {
        self.methods.get(kind.tag as usize)
    }
}

/// Source of programs for the interpreter.
pub trait ProgramSource {
    /// Returns the programs of a record.
    fn record_program(&self, type_name: &str) -> Option<&RecordProgram>;

    /// Returns the rewriting visitor, if one was generated.
    fn visitor_program(&self) -> Option<&VisitorProgram>;
}
