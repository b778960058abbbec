//! Insertion, splicing, and reparenting.
//!
//! Insertion always starts at the root and walks down through ancestors of the
//! new class. Whenever the walk meets a node that turns out to be a
//! *descendant* of the new class, the new class is an ancestor that was
//! discovered late and gets spliced in above it. That is what makes the final
//! shape independent of insertion order.

use std::fmt;
use std::hash::Hash;

use smallvec::SmallVec;

use super::{ClassTree, SearchMode};
use crate::stack::ensure_sufficient_stack;
use crate::{NodeId, TypeSystem};

impl<C> ClassTree<C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    /// File `class` at its place in the hierarchy.
    ///
    /// Returns `true` if the class is in the tree afterwards (inserting a
    /// class that is already present is a no-op). Returns `false`, leaving the
    /// tree untouched, when `class` does not descend from the root class.
    #[tracing::instrument(level = "trace", skip(self, ts), fields(name = ts.name(class)))]
    pub fn add_class<S>(&mut self, ts: &S, class: C) -> bool
    where
        S: TypeSystem<Class = C>,
    {
        let accepted = self.try_accept(ts, self.root, class);
        if !accepted {
            tracing::warn!(name = ts.name(class), "class does not descend from the root");
        }
        accepted
    }

    /// Try to file `class` within the branch rooted at `id`.
    ///
    /// Only returns `false` without having modified anything, so callers may
    /// probe siblings one after another.
    fn try_accept<S>(&mut self, ts: &S, id: NodeId, class: C) -> bool
    where
        S: TypeSystem<Class = C>,
    {
        ensure_sufficient_stack(|| {
            let here = self.class(id);
            if class == here {
                return true;
            }

            if !ts.is_descendant_of(class, here) {
                // `class` may be an undiscovered ancestor sitting between this
                // node and its parent.
                if let Some(parent) = self.parent(id) {
                    if class != self.class(parent) && ts.is_descendant_of(here, class) {
                        self.splice(ts, parent, class, id);
                        return true;
                    }
                }
                return false;
            }

            let mut i = 0;
            while i < self.children(id).len() {
                let child = self.children(id)[i];
                if self.try_accept(ts, child, class) {
                    return true;
                }
                i += 1;
            }

            let node = self.alloc(class);
            self.attach_sorted(id, node, ts);
            true
        })
    }

    /// Interpose a new node for `class` between `parent` and `child`.
    ///
    /// Any other child of `parent` that also descends from `class` moves under
    /// the new node with it.
    fn splice<S>(&mut self, ts: &S, parent: NodeId, class: C, child: NodeId)
    where
        S: TypeSystem<Class = C>,
    {
        let node = self.alloc(class);
        self.detach(parent, child);

        let moved: SmallVec<[NodeId; 8]> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|&sibling| ts.is_descendant_of(self.class(sibling), class))
            .collect();
        for &sibling in &moved {
            self.detach(parent, sibling);
            self.attach_sorted(node, sibling, ts);
        }

        self.attach_sorted(parent, node, ts);
        self.attach_sorted(node, child, ts);

        tracing::debug!(
            name = ts.name(class),
            parent = ts.name(self.class(parent)),
            below = ts.name(self.class(child)),
            siblings_moved = moved.len(),
            "spliced in late ancestor"
        );
    }

    /// Move `class` under its current supertype after the type system changed
    /// it.
    ///
    /// The new supertype is inserted first if the tree does not hold it yet.
    /// If `class` itself is missing it is simply inserted. Returns `false`
    /// when `class` has no supertype or is the root, when the new supertype
    /// cannot be filed, or when it sits inside `class`'s own subtree. The tree
    /// is unchanged in those cases.
    #[tracing::instrument(level = "debug", skip(self, ts), fields(name = ts.name(class)))]
    pub fn change_parent<S>(&mut self, ts: &S, class: C) -> bool
    where
        S: TypeSystem<Class = C>,
    {
        let Some(super_class) = ts.super_class(class) else {
            tracing::warn!("class has no supertype to move under");
            return false;
        };

        // The old position no longer reflects `class`'s ancestry, so a pruned
        // walk could miss it.
        let Some(node) = self.find_node(ts, class, SearchMode::Exhaustive) else {
            if self.resolve_or_insert(ts, super_class).is_none() {
                tracing::warn!(
                    super_class = ts.name(super_class),
                    "new supertype cannot be filed"
                );
                return false;
            }
            return self.add_class(ts, class);
        };

        let Some(old_parent) = self.parent(node) else {
            tracing::warn!("refusing to move the root");
            return false;
        };

        if self
            .find_in(ts, node, super_class, SearchMode::Exhaustive)
            .is_some()
        {
            tracing::warn!(
                super_class = ts.name(super_class),
                "refusing to move class beneath its own subtree"
            );
            return false;
        }

        // Take the stale subtree out first so resolving the supertype cannot
        // splice it in next to the old position.
        self.detach(old_parent, node);
        let Some(new_parent) = self.resolve_or_insert(ts, super_class) else {
            self.attach_sorted(old_parent, node, ts);
            tracing::warn!(
                super_class = ts.name(super_class),
                "new supertype cannot be filed"
            );
            return false;
        };

        self.attach_sorted(new_parent, node, ts);
        tracing::debug!(super_class = ts.name(super_class), "reparented class");
        true
    }

    fn resolve_or_insert<S>(&mut self, ts: &S, class: C) -> Option<NodeId>
    where
        S: TypeSystem<Class = C>,
    {
        if let Some(id) = self
            .find_node(ts, class, SearchMode::Pruned)
            .or_else(|| self.find_node(ts, class, SearchMode::Exhaustive))
        {
            return Some(id);
        }
        if !self.add_class(ts, class) {
            return None;
        }
        self.find_node(ts, class, SearchMode::Pruned)
    }
}
