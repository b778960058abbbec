//! The class tree arena and its read-only queries.
//!
//! # Design
//!
//! - All nodes live in one `Vec<Node<C>>`; `NodeId` is an index into it
//! - Children are owned by position in their parent's sorted child list
//! - The parent link is used for upward walks only
//! - Nodes are never freed individually: splices and reparents relink them

mod dump;
mod filter;
mod insert;
mod validate;


use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::name_order::cmp_ignore_case;
use crate::stack::ensure_sufficient_stack;
use crate::{NodeId, TypeSystem};

pub use dump::TreeDisplay;

/// How [`ClassTree::find_node`] walks the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Skip every branch whose class is not an ancestor of the target.
    ///
    /// Fast, but only correct when the tree already reflects the target's
    /// current ancestry.
    Pruned,
    /// Visit every node. Use when the target's supertype may have changed
    /// since it was filed.
    Exhaustive,
}

/// Whether [`ClassTree::collect_children`] clears its output first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Accumulate {
    /// Clear the output vector before collecting.
    Fresh,
    /// Keep what the output vector already holds and push after it.
    Append,
}

#[derive(Clone, Debug)]
struct Node<C> {
    class: C,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Single-rooted tree mirroring the inheritance relation of its classes.
///
/// Every non-root node's parent holds the node's supertype (or, for classes
/// whose real supertype has not been inserted yet, the nearest inserted
/// ancestor). Siblings are kept in case-insensitive name order and never
/// repeat a class.
#[derive(Clone, Debug)]
pub struct ClassTree<C> {
    nodes: Vec<Node<C>>,
    root: NodeId,
}

impl<C> ClassTree<C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    /// Create a tree holding only `root`.
    ///
    /// `root` should be the universal base class: the one class in the
    /// hierarchy without a supertype.
    pub fn new(root: C) -> Self {
        let mut tree = ClassTree {
            nodes: Vec::new(),
            root: NodeId::new(0),
        };
        tree.root = tree.alloc(root);
        tree
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// A read-only view of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> NodeRef<'_, C> {
        assert!(id.index() < self.nodes.len(), "{id:?} is not in this tree");
        NodeRef { tree: self, id }
    }

    /// The class held by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn class(&self, id: NodeId) -> C {
        self.nodes[id.index()].class
    }

    /// The parent of `id`, or `None` for the root.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Direct children of `id`, in sibling order.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Walk from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, C> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.subtree_len(self.root)
    }

    /// Number of nodes in the subtree rooted at `id`, including `id` itself.
    pub fn subtree_len(&self, id: NodeId) -> usize {
        ensure_sufficient_stack(|| {
            1 + self
                .children(id)
                .iter()
                .map(|&child| self.subtree_len(child))
                .sum::<usize>()
        })
    }

    /// Find the node holding `class`.
    ///
    /// With [`SearchMode::Pruned`] only branches whose class is an ancestor of
    /// `class` are entered. [`SearchMode::Exhaustive`] visits every node and is
    /// the one to use right after `class`'s supertype changed.
    pub fn find_node<S>(&self, ts: &S, class: C, mode: SearchMode) -> Option<NodeId>
    where
        S: TypeSystem<Class = C>,
    {
        self.find_in(ts, self.root, class, mode)
    }

    /// Whether `class` is in the tree, searching exhaustively.
    pub fn contains<S>(&self, ts: &S, class: C) -> bool
    where
        S: TypeSystem<Class = C>,
    {
        self.find_node(ts, class, SearchMode::Exhaustive).is_some()
    }

    fn find_in<S>(&self, ts: &S, id: NodeId, class: C, mode: SearchMode) -> Option<NodeId>
    where
        S: TypeSystem<Class = C>,
    {
        ensure_sufficient_stack(|| {
            let here = self.class(id);
            if here == class {
                return Some(id);
            }
            if mode == SearchMode::Pruned && !ts.is_descendant_of(class, here) {
                return None;
            }
            self.children(id)
                .iter()
                .find_map(|&child| self.find_in(ts, child, class, mode))
        })
    }

    /// Children of `id`, or every descendant in pre-order when `recursive`.
    pub fn children_of(&self, id: NodeId, recursive: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_children(id, recursive, &mut out, Accumulate::Fresh);
        out
    }

    /// Push the children of `id` (pre-order descendants when `recursive`) onto
    /// `out`.
    pub fn collect_children(
        &self,
        id: NodeId,
        recursive: bool,
        out: &mut Vec<NodeId>,
        accumulate: Accumulate,
    ) {
        let mut all = |_: NodeRef<'_, C>| true;
        self.collect_children_where(id, recursive, out, accumulate, &mut all);
    }

    /// Like [`collect_children`](Self::collect_children), but only nodes
    /// accepted by `pred` are pushed.
    ///
    /// Rejected nodes are still descended into: this filters what is emitted,
    /// it does not prune the walk. Use [`filtered_copy`](Self::filtered_copy)
    /// for pruning semantics.
    pub fn collect_children_where<F>(
        &self,
        id: NodeId,
        recursive: bool,
        out: &mut Vec<NodeId>,
        accumulate: Accumulate,
        pred: &mut F,
    ) where
        F: FnMut(NodeRef<'_, C>) -> bool,
    {
        if accumulate == Accumulate::Fresh {
            out.clear();
        }
        ensure_sufficient_stack(|| {
            for &child in self.children(id) {
                if pred(self.node(child)) {
                    out.push(child);
                }
                if recursive {
                    self.collect_children_where(child, true, out, Accumulate::Append, pred);
                }
            }
        });
    }

    /// Classes of the children of `id` accepted by `pred`, pre-order when
    /// `recursive`.
    pub fn child_classes_where<F>(&self, id: NodeId, recursive: bool, mut pred: F) -> Vec<C>
    where
        F: FnMut(NodeRef<'_, C>) -> bool,
    {
        let mut ids = Vec::new();
        self.collect_children_where(id, recursive, &mut ids, Accumulate::Fresh, &mut pred);
        ids.into_iter().map(|child| self.class(child)).collect()
    }

    /// Whether any direct child of `id` satisfies `pred`.
    pub fn has_child_where<F>(&self, id: NodeId, mut pred: F) -> bool
    where
        F: FnMut(NodeRef<'_, C>) -> bool,
    {
        self.children(id).iter().any(|&child| pred(self.node(child)))
    }

    // === Arena Plumbing ===

    fn alloc(&mut self, class: C) -> NodeId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "class counts stay far below u32::MAX"
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            class,
            parent: None,
            children: SmallVec::new(),
        });
        id
    }

    /// Unlink `child` from `parent`'s child list. The child keeps its subtree.
    fn detach(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.index()].children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
        }
        self.nodes[child.index()].parent = None;
    }

    /// Link a detached `child` under `parent`, keeping siblings sorted.
    ///
    /// Returns the child's position. If `parent` already has a child holding
    /// the same class, nothing is linked and that child's position is
    /// returned instead.
    fn attach_sorted<S>(&mut self, parent: NodeId, child: NodeId, ts: &S) -> usize
    where
        S: TypeSystem<Class = C>,
    {
        let class = self.class(child);
        let siblings = self.children(parent);
        if let Some(existing) = siblings.iter().position(|&c| self.class(c) == class) {
            return existing;
        }

        let name = ts.name(class);
        let pos = siblings.partition_point(|&c| {
            cmp_ignore_case(ts.name(self.class(c)), name) != Ordering::Greater
        });
        self.nodes[parent.index()].children.insert(pos, child);
        self.nodes[child.index()].parent = Some(parent);
        tracing::trace!(?class, ?parent, pos, "attached class");
        pos
    }
}

/// Borrowed view of one node.
pub struct NodeRef<'a, C> {
    tree: &'a ClassTree<C>,
    id: NodeId,
}

impl<C> Clone for NodeRef<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for NodeRef<'_, C> {}

impl<'a, C> NodeRef<'a, C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    /// This node's id.
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The class this node holds.
    #[inline]
    pub fn class(self) -> C {
        self.tree.class(self.id)
    }

    /// The parent node, or `None` for the root.
    pub fn parent(self) -> Option<NodeRef<'a, C>> {
        self.tree.parent(self.id).map(|id| self.tree.node(id))
    }

    /// Direct children in sibling order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a, C>> {
        let tree = self.tree;
        tree.children(self.id).iter().map(move |&id| tree.node(id))
    }

    /// Number of direct children.
    #[inline]
    pub fn child_count(self) -> usize {
        self.tree.children(self.id).len()
    }

    /// Whether this is the tree's root.
    #[inline]
    pub fn is_root(self) -> bool {
        self.id == self.tree.root
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(self) -> usize {
        self.tree.subtree_len(self.id)
    }
}

impl<C: fmt::Debug> fmt::Debug for NodeRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.tree.nodes[self.id.index()];
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("class", &node.class)
            .field("parent", &node.parent)
            .field("children", &node.children.len())
            .finish()
    }
}

/// Iterator over a node's ancestors, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a, C> {
    tree: &'a ClassTree<C>,
    next: Option<NodeId>,
}

impl<C> Iterator for Ancestors<'_, C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
