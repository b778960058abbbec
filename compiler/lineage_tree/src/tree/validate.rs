//! Structural self-checks.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use super::ClassTree;
use crate::name_order::cmp_ignore_case;
use crate::{HierarchyError, NodeId, TypeSystem};

impl<C> ClassTree<C>
where
    C: Copy + Eq + Hash + fmt::Debug,
{
    /// Check every invariant against `ts`.
    ///
    /// - The root class has no supertype.
    /// - Every non-root node is filed under its supertype. Top-level classes
    ///   are exempt, since the root is the universal base and their real
    ///   supertype may not be inserted yet; instead none of their root-level
    ///   siblings may be one of their ancestors.
    /// - Child lists and parent links agree.
    /// - Siblings are sorted by name ignoring case and never repeat a class.
    pub fn validate<S>(&self, ts: &S) -> Result<(), HierarchyError>
    where
        S: TypeSystem<Class = C>,
    {
        let root_class = self.class(self.root);
        if let Some(super_class) = ts.super_class(root_class) {
            return Err(HierarchyError::RootHasSuper {
                root: ts.name(root_class).to_owned(),
                super_class: ts.name(super_class).to_owned(),
            });
        }

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            self.validate_children(ts, id)?;
            stack.extend(self.children(id).iter().copied());
        }
        Ok(())
    }

    fn validate_children<S>(&self, ts: &S, id: NodeId) -> Result<(), HierarchyError>
    where
        S: TypeSystem<Class = C>,
    {
        let name_of = |node: NodeId| ts.name(self.class(node)).to_owned();
        let here = self.class(id);
        let children = self.children(id);

        for (i, &child) in children.iter().enumerate() {
            let class = self.class(child);

            if self.parent(child) != Some(id) {
                return Err(HierarchyError::BrokenBackLink {
                    class: name_of(child),
                    parent: name_of(id),
                });
            }

            if children[..i].iter().any(|&prev| self.class(prev) == class) {
                return Err(HierarchyError::DuplicateChild {
                    parent: name_of(id),
                    class: name_of(child),
                });
            }

            if let Some(&next) = children.get(i + 1) {
                let order = cmp_ignore_case(ts.name(class), ts.name(self.class(next)));
                if order == Ordering::Greater {
                    return Err(HierarchyError::UnsortedChildren {
                        parent: name_of(id),
                        first: name_of(child),
                        second: name_of(next),
                    });
                }
            }

            if id == self.root {
                let hidden = children.iter().find(|&&other| {
                    other != child && ts.is_descendant_of(class, self.class(other))
                });
                if let Some(&ancestor) = hidden {
                    return Err(HierarchyError::HiddenAncestor {
                        class: name_of(child),
                        ancestor: name_of(ancestor),
                    });
                }
            } else {
                let expected = ts.super_class(class);
                if expected != Some(here) {
                    return Err(HierarchyError::ParentMismatch {
                        class: name_of(child),
                        parent: name_of(id),
                        expected: expected.map(|s| ts.name(s).to_owned()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Run [`validate`](Self::validate) in debug builds and panic on the first
    /// violation. Does nothing in release builds.
    pub fn debug_validate<S>(&self, ts: &S)
    where
        S: TypeSystem<Class = C>,
    {
        if cfg!(debug_assertions) {
            if let Err(err) = self.validate(ts) {
                tracing::error!(%err, "class tree invariant violated");
                panic!("class tree invariant violated: {err}");
            }
        }
    }
}
