//! Invariant violations reported by [`ClassTree::validate`](crate::ClassTree::validate).

use thiserror::Error;

/// A broken structural invariant.
///
/// These never occur when the type system is self-consistent; seeing one means
/// the collaborator reported contradictory inheritance, or a supertype changed
/// without a matching `change_parent` call. Class names are captured as owned
/// strings so the error outlives the borrow of the type system.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The root class has a supertype.
    #[error("root class `{root}` has supertype `{super_class}`")]
    RootHasSuper { root: String, super_class: String },

    /// A node sits under a parent that is not its supertype.
    #[error("class `{class}` is filed under `{parent}` but its supertype is {}", describe_super(.expected.as_deref()))]
    ParentMismatch {
        class: String,
        parent: String,
        expected: Option<String>,
    },

    /// A top-level class has an ancestor among its root-level siblings.
    #[error("class `{class}` is filed under the root next to its own ancestor `{ancestor}`")]
    HiddenAncestor { class: String, ancestor: String },

    /// Two adjacent siblings are out of case-insensitive name order.
    #[error("children of `{parent}` are unsorted: `{first}` precedes `{second}`")]
    UnsortedChildren {
        parent: String,
        first: String,
        second: String,
    },

    /// The same class appears twice under one parent.
    #[error("class `{class}` appears more than once under `{parent}`")]
    DuplicateChild { parent: String, class: String },

    /// A child's parent link does not point back at the node listing it.
    #[error("class `{class}` is listed under `{parent}` but links to a different parent")]
    BrokenBackLink { class: String, parent: String },
}

fn describe_super(expected: Option<&str>) -> String {
    match expected {
        Some(name) => format!("`{name}`"),
        None => "absent".to_owned(),
    }
}
