//! Filtered copies.

use std::fmt;
use std::hash::Hash;

use super::{ClassTree, NodeRef};
use crate::stack::ensure_sufficient_stack;
use crate::NodeId;

impl<C> ClassTree<C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    /// Build an independent copy holding only the nodes `pred` accepts.
    ///
    /// Filtering prunes: once a node is rejected its whole subtree is left
    /// out, including descendants that would pass on their own. They are not
    /// reattached to the nearest accepted ancestor. Returns `None` when the
    /// root itself is rejected.
    ///
    /// Node ids in the copy are fresh and unrelated to ids in `self`.
    pub fn filtered_copy<F>(&self, mut pred: F) -> Option<ClassTree<C>>
    where
        F: FnMut(NodeRef<'_, C>) -> bool,
    {
        if !pred(self.node(self.root)) {
            return None;
        }
        let mut copy = ClassTree::new(self.class(self.root));
        let root = copy.root;
        self.copy_children(self.root, &mut copy, root, &mut pred);
        tracing::debug!(
            kept = copy.nodes.len(),
            of = self.node_count(),
            "built filtered copy"
        );
        Some(copy)
    }

    fn copy_children<F>(
        &self,
        from: NodeId,
        copy: &mut ClassTree<C>,
        into: NodeId,
        pred: &mut F,
    ) where
        F: FnMut(NodeRef<'_, C>) -> bool,
    {
        ensure_sufficient_stack(|| {
            // Source siblings are already sorted, so appending keeps the order.
            for &child in self.children(from) {
                if !pred(self.node(child)) {
                    continue;
                }
                let id = copy.alloc(self.class(child));
                copy.nodes[id.index()].parent = Some(into);
                copy.nodes[into.index()].children.push(id);
                self.copy_children(child, copy, id, pred);
            }
        });
    }
}
