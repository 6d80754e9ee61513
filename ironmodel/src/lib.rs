//! # IronModel
//!
//! Object model generation from JSON schemas.
//!
//! IronModel compiles a reference-resolved JSON schema, plus a document of
//! customization hints, into a generated object model: records, enums and
//! interfaces, and for every record the structural algorithms that go with
//! it: equality, hashing, deep cloning and a rewriting visitor.
//!
//! ## Features
//!
//! - **Type inference** - Property types inferred from schema shape, overridable by hints
//! - **Arbitrary nesting** - Lists of maps of lists of records handled by one recursive rule
//! - **Executable programs** - Synthesized algorithms run directly through [`ObjectModel`]
//! - **Fixed-point generation** - Types discovered mid-build are generated before the visitor
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironmodel::prelude::*;
//!
//! let settings = GeneratorSettings::default().generate_rewriting_visitor(true);
//! let types = generate_from_json(schema_json, hints_json, &settings)?;
//!
//! let model = ObjectModel::new(&types);
//! let log = model.read_json("Root", &instance)?;
//! let copy = model.copy("Root", Some(&log))?;
//! assert!(model.equals(&log, Some(&copy))?);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Type signatures, synthesized programs and their interpreter
//! - [`schema`] - Schema tree and hint resolution
//! - [`codegen`] - Type model builder, synthesizers and the generation driver

pub mod prelude;

/// Type signatures, synthesized programs and their interpreter.
pub mod core {
    pub use ironmodel_core::*;
}

/// Schema tree and hint resolution.
pub mod schema {
    pub use ironmodel_schema::*;
}

/// Type model builder, synthesizers and the generation driver.
pub mod codegen {
    pub use ironmodel_codegen::*;
}

// Re-export commonly used items at the crate root
pub use ironmodel_codegen::{
    CodegenError, GeneratedTypes, Generator, GeneratorSettings, generate_from_files,
    generate_from_json,
};
pub use ironmodel_core::{ObjectModel, Record, RewritingVisitor, RuntimeError, Value, VisitHook};
pub use ironmodel_schema::{HintDictionary, JsonSchema, parse_schema};
