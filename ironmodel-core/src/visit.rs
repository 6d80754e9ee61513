//! Rewriting visitor interpreter.
//!
//! The visitor walks a record graph through the generated dispatch table.
//! Every record-typed property, including records nested in lists, is
//! replaced by the result of visiting it. Map values are not traversed.

use crate::error::{Result, RuntimeError};
use crate::program::{NodeKind, ProgramSource, RewriteOp, VisitorProgram};
use crate::value::{Record, Value};
use std::mem;

/// Overridable per-node behaviour of a [`RewritingVisitor`].
///
/// `enter` runs before a node's properties are rewritten and `leave` after.
/// Both default to returning the node unchanged.
pub trait VisitHook {
    /// Called before the node's properties are visited.
    fn enter(&mut self, kind: &NodeKind, node: Record) -> Record {
        let _ = kind;
        node
    }

    /// Called after the node's properties are visited.
    fn leave(&mut self, kind: &NodeKind, node: Record) -> Record {
        let _ = kind;
        node
    }
}

/// Hook that leaves every node unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHook;

impl VisitHook for IdentityHook {}

/// Executes a generated [`VisitorProgram`].
pub struct RewritingVisitor<'a, H: VisitHook> {
    program: &'a VisitorProgram,
    hook: H,
}

impl<'a, H: VisitHook> RewritingVisitor<'a, H> {
    /// Creates a visitor over the program exposed by `source`.
    ///
    /// # Errors
    /// Returns `RuntimeError::VisitorNotGenerated` if the source has none.
    pub fn new<S: ProgramSource + ?Sized>(source: &'a S, hook: H) -> Result<Self> {
        let program = source
            .visitor_program()
            .ok_or(RuntimeError::VisitorNotGenerated)?;
        Ok(Self { program, hook })
    }

    /// Returns the hook.
    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Consumes the visitor, returning the hook.
    pub fn into_hook(self) -> H {
        self.hook
    }

    /// Visits a value. Null and non-record values come back unchanged.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` if a rewritten property does not
    /// hold the shape its program expects.
    pub fn visit(&mut self, value: Value) -> Result<Value> {
        match value {
            Value::Record(record) => Ok(Value::from(self.dispatch(*record)?)),
            other => Ok(other),
        }
    }

    fn dispatch(&mut self, node: Record) -> Result<Record> {
        let program = self.program;
        let Some(kind) = program.kind_of(node.type_name()) else {
            return Ok(node);
        };
        if program.method(kind).is_none() {
            return Ok(node);
        }

        // `enter` may hand back a node of another kind
        let mut node = self.hook.enter(kind, node);
        let Some(kind) = program.kind_of(node.type_name()) else {
            return Ok(node);
        };
        let Some(method) = program.method(kind) else {
            return Ok(node);
        };

        for step in &method.rewrites {
            let Some(current) = node.take(&step.property) else {
                continue;
            };
            let rewritten = self.rewrite(&step.op, current)?;
            node.set(&step.property, rewritten);
        }
        Ok(self.hook.leave(kind, node))
    }

    fn rewrite(&mut self, op: &RewriteOp, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match op {
            RewriteOp::Dispatch => self.visit(value),
            RewriteOp::EachElement(element) => {
                let Value::List(mut items) = value else {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "list".to_string(),
                        actual: value.shape().to_string(),
                    });
                };
                // bound re-read each pass
                let mut index = 0;
                while index < items.len() {
                    let current = mem::replace(&mut items[index], Value::Null);
                    items[index] = self.rewrite(element, current)?;
                    index += 1;
                }
                Ok(Value::List(items))
            }
        }
    }
}
