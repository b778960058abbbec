//! Indented text dumps for debugging.

use std::fmt;
use std::hash::Hash;

use super::ClassTree;
use crate::stack::ensure_sufficient_stack;
use crate::{NodeId, TypeSystem};

/// Spaces per nesting level.
const INDENT: usize = 2;

impl<C> ClassTree<C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    /// Write one line per node in pre-order, indented by depth.
    ///
    /// ```text
    /// Object
    ///   Actor
    ///     Pawn
    /// ```
    pub fn dump<S, W>(&self, ts: &S, out: &mut W) -> fmt::Result
    where
        S: TypeSystem<Class = C>,
        W: fmt::Write,
    {
        self.dump_node(ts, self.root, 0, out)
    }

    fn dump_node<S, W>(&self, ts: &S, id: NodeId, depth: usize, out: &mut W) -> fmt::Result
    where
        S: TypeSystem<Class = C>,
        W: fmt::Write,
    {
        ensure_sufficient_stack(|| {
            writeln!(out, "{:width$}{}", "", ts.name(self.class(id)), width = depth * INDENT)?;
            for &child in self.children(id) {
                self.dump_node(ts, child, depth + 1, out)?;
            }
            Ok(())
        })
    }

    /// Adapter that formats the tree with [`dump`](Self::dump).
    pub fn display<'a, S>(&'a self, ts: &'a S) -> TreeDisplay<'a, C, S>
    where
        S: TypeSystem<Class = C>,
    {
        TreeDisplay { tree: self, ts }
    }

    /// Emit the dump as `debug` events, one per node.
    pub fn log_dump<S>(&self, ts: &S)
    where
        S: TypeSystem<Class = C>,
    {
        let mut ids = vec![(self.root, 0usize)];
        while let Some((id, depth)) = ids.pop() {
            tracing::debug!(depth, "{:width$}{}", "", ts.name(self.class(id)), width = depth * INDENT);
            // Reverse so siblings pop in order.
            ids.extend(self.children(id).iter().rev().map(|&child| (child, depth + 1)));
        }
    }
}

/// [`fmt::Display`] for a [`ClassTree`], produced by [`ClassTree::display`].
pub struct TreeDisplay<'a, C, S> {
    tree: &'a ClassTree<C>,
    ts: &'a S,
}

impl<C, S> fmt::Display for TreeDisplay<'_, C, S>
where
    C: Copy + Eq + Hash + fmt::Debug,
    S: TypeSystem<Class = C>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.dump(self.ts, f)
    }
}

impl<C: fmt::Debug, S> fmt::Debug for TreeDisplay<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeDisplay")
            .field("root", &self.tree.root)
            .finish_non_exhaustive()
    }
}
