//! Concrete collaborators for `lineage_tree`.
//!
//! - [`ClassRegistry`]: an in-memory type system (names, supertypes, packages,
//!   flags) implementing [`TypeSystem`](lineage_tree::TypeSystem)
//! - [`build_tree`] / [`build_tree_from`]: the population driver that files
//!   every registered class
//! - [`filters`]: ready-made predicates for filtered copies and enumeration
//! - [`init_tracing`]: subscriber setup driven by the environment

pub mod filters;
mod logging;
mod populate;
mod registry;

pub use logging::{init_tracing, init_tracing_with, LogConfig, LogFormat};
pub use populate::{build_tree, build_tree_from};
pub use registry::{ClassDef, ClassFlags, ClassId, ClassRegistry, RegistryError};
