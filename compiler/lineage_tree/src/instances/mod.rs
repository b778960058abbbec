//! Per-node payload lists kept outside the tree.
//!
//! A browser or tool often wants to hang objects off a class node (live
//! instances, cached thumbnails, counters). Keeping them in a side table keyed
//! by [`NodeId`] means they never take part in ordering, splicing, or
//! validation, and the tree stays `Clone` without cloning payloads. Node ids
//! survive splices and reparenting, so attachments follow their class.


use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::NodeId;

/// Side table of payloads attached to tree nodes.
#[derive(Clone, Debug)]
pub struct InstanceTable<T> {
    by_node: FxHashMap<NodeId, SmallVec<[T; 2]>>,
}

impl<T> Default for InstanceTable<T> {
    fn default() -> Self {
        Self {
            by_node: FxHashMap::default(),
        }
    }
}

impl<T> InstanceTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `item` to `node`, after anything already attached.
    pub fn attach(&mut self, node: NodeId, item: T) {
        self.by_node.entry(node).or_default().push(item);
    }

    /// Items attached to `node`, in attachment order.
    pub fn instances(&self, node: NodeId) -> &[T] {
        self.by_node
            .get(&node)
            .map(SmallVec::as_slice)
            .unwrap_or(&[])
    }

    /// Remove and return everything attached to `node`.
    pub fn take(&mut self, node: NodeId) -> Vec<T> {
        self.by_node
            .remove(&node)
            .map(SmallVec::into_vec)
            .unwrap_or_default()
    }

    /// Drop the items attached to `node` that fail `keep`.
    pub fn retain(&mut self, node: NodeId, keep: impl FnMut(&mut T) -> bool) {
        if let Some(items) = self.by_node.get_mut(&node) {
            items.retain(keep);
            if items.is_empty() {
                self.by_node.remove(&node);
            }
        }
    }

    /// Nodes with at least one attachment, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.by_node.keys().copied()
    }

    /// Total number of attached items.
    pub fn len(&self) -> usize {
        self.by_node.values().map(SmallVec::len).sum()
    }

    /// Whether no node has anything attached.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Detach everything.
    pub fn clear(&mut self) {
        self.by_node.clear();
    }
}
