//! Class inheritance tree index.
//!
//! Organizes a growing set of class handles into a single-rooted tree that
//! mirrors their inheritance relation, so that lookup, browsing, and filtered
//! views never re-derive inheritance from scratch.
//!
//! # Architecture
//!
//! ```text
//! TypeSystem (external: names, supertypes, is-descendant-of)
//!     └── ClassTree<C> (arena of nodes, NodeId handles)
//!           ├── insertion + splice    (add_class, change_parent)
//!           ├── queries               (find_node, children, subtree_len)
//!           ├── export                (filtered_copy, dump, display)
//!           └── validation            (validate, debug_validate)
//! InstanceTable<T> (side table keyed by NodeId, outside the invariants)
//! ```
//!
//! # Design Decisions
//!
//! - Nodes live in a flat arena and are referenced by `NodeId(u32)`; the parent
//!   link is a plain index used only for upward walks.
//! - Insertion order does not matter: discovering an ancestor after its
//!   descendants splices it in between.
//! - Recursive queries take their accumulator explicitly, so there is no
//!   hidden state between calls.

mod error;
mod instances;
mod name_order;
mod node_id;
mod stack;
mod tree;
mod type_system;

pub use error::HierarchyError;
pub use instances::InstanceTable;
pub use name_order::cmp_ignore_case;
pub use node_id::NodeId;
pub use tree::{Accumulate, Ancestors, ClassTree, NodeRef, SearchMode, TreeDisplay};
pub use type_system::TypeSystem;
