//! The type-system collaborator the tree organizes.

use std::fmt;
use std::hash::Hash;

/// Source of truth about class identity and inheritance.
///
/// The tree never infers or caches the inheritance relation; every structural
/// decision asks the type system. Implementations must be self-consistent:
/// `is_descendant_of` has to agree with the transitive closure of
/// `super_class`.
///
/// The type system is passed to each operation rather than stored, so callers
/// may change a class's supertype between calls and then ask the tree to catch
/// up via [`ClassTree::change_parent`](crate::ClassTree::change_parent).
pub trait TypeSystem {
    /// Opaque class handle. Equality is class identity.
    type Class: Copy + Eq + Hash + fmt::Debug;

    /// Display name, used for sibling ordering and dumps.
    fn name(&self, class: Self::Class) -> &str;

    /// The immediate supertype, or `None` for a hierarchy root.
    fn super_class(&self, class: Self::Class) -> Option<Self::Class>;

    /// Transitive "is-a" test.
    ///
    /// Reflexive: `is_descendant_of(c, c)` is `true`. The tree never asks
    /// about a class and itself, so strict implementations work too.
    fn is_descendant_of(&self, class: Self::Class, ancestor: Self::Class) -> bool;
}
