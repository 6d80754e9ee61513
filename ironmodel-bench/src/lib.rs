//! # IronModel Bench
//!
//! Benchmarking utilities for IronModel: synthetic schemas, hint documents
//! and instances of configurable size.

pub mod workload;

pub use workload::{Workload, synthetic_instance};
