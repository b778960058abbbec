//! Ready-made node predicates.
//!
//! Each returns a closure usable with
//! [`ClassTree::filtered_copy`](lineage_tree::ClassTree::filtered_copy),
//! [`ClassTree::child_classes_where`](lineage_tree::ClassTree::child_classes_where),
//! and the other `*_where` queries.

use lineage_tree::NodeRef;

use crate::{ClassFlags, ClassId, ClassRegistry};

/// Classes whose interface flag equals `want`.
pub fn interfaces(
    registry: &ClassRegistry,
    want: bool,
) -> impl Fn(NodeRef<'_, ClassId>) -> bool + '_ {
    move |node: NodeRef<'_, ClassId>| {
        registry.has_flags(node.class(), ClassFlags::INTERFACE) == want
    }
}

/// Classes declared in `package`. The root always passes so that a filtered
/// copy keeps its anchor.
pub fn in_package<'a>(
    registry: &'a ClassRegistry,
    package: &'a str,
) -> impl Fn(NodeRef<'_, ClassId>) -> bool + 'a {
    move |node: NodeRef<'_, ClassId>| {
        node.is_root()
            || registry
                .get(node.class())
                .is_some_and(|def| def.package == package)
    }
}

/// Classes the editor may place: placeable, not abstract, not deprecated.
pub fn placeable(registry: &ClassRegistry) -> impl Fn(NodeRef<'_, ClassId>) -> bool + '_ {
    move |node: NodeRef<'_, ClassId>| {
        registry.get(node.class()).is_some_and(|def| {
            def.flags.contains(ClassFlags::PLACEABLE)
                && !def
                    .flags
                    .intersects(ClassFlags::ABSTRACT | ClassFlags::DEPRECATED)
        })
    }
}
