//! # IronModel Core
//!
//! Core types shared by the IronModel generator and its runtime.
//!
//! This crate provides:
//! - Property type signatures ([`TypeSignature`])
//! - Synthesized equality, hash, clone and rewrite programs
//! - An interpreter executing those programs against runtime values
//! - The rewriting visitor and its per-node hooks

pub mod error;
pub mod eval;
pub mod program;
pub mod signature;
pub mod value;
pub mod visit;

pub use error::{Result, RuntimeError};
pub use eval::ObjectModel;
pub use program::{
    CloneOp, CompareOp, HASH_MULTIPLIER, HASH_SEED, HashOp, HashProgram, NodeKind, ProgramSource,
    PropertySlot, PropertyStep, RecordProgram, RewriteOp, VisitMethod, VisitorProgram,
};
pub use signature::{ScalarKind, TypeSignature};
pub use value::{Record, UriKind, UriValue, Value};
pub use visit::{IdentityHook, RewritingVisitor, VisitHook};
