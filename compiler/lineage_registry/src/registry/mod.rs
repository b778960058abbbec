//! In-memory class registry.
//!
//! # Design
//!
//! - Classes stored in a single `Vec<ClassDef>`, indexed by `ClassId`
//! - Name lookup is case-insensitive (keys are lowercased on insert)
//! - Supertypes may change after definition; cycles are rejected up front,
//!   which keeps `is_descendant_of` a simple terminating walk

#[cfg(test)]
mod tests;

use std::fmt;

use bitflags::bitflags;
use lineage_tree::TypeSystem;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Handle to a class in a [`ClassRegistry`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

bitflags! {
    /// Class properties consulted by browsing and export filters.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u32 {
        /// Cannot be instantiated directly.
        const ABSTRACT = 1 << 0;
        /// An interface rather than a concrete class.
        const INTERFACE = 1 << 1;
        /// May be placed into a level by the editor.
        const PLACEABLE = 1 << 2;
        /// Backed by native code.
        const NATIVE = 1 << 3;
        /// Kept for compatibility; hidden from new content.
        const DEPRECATED = 1 << 4;
    }
}

/// A registered class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    /// Class name, unique ignoring case.
    pub name: String,
    /// Immediate supertype, `None` for the universal base.
    pub super_class: Option<ClassId>,
    /// Package (module) the class was declared in.
    pub package: String,
    /// Class properties.
    pub flags: ClassFlags,
}

/// Registry errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A class with this name (ignoring case) already exists.
    #[error("class `{name}` is already defined")]
    DuplicateName { name: String },

    /// The id does not belong to this registry.
    #[error("class id {id} is not registered")]
    UnknownClass { id: u32 },

    /// The new supertype descends from the class itself.
    #[error("making `{super_class}` the supertype of `{class}` would create a cycle")]
    CyclicSuper { class: String, super_class: String },

    /// No class lacks a supertype.
    #[error("no universal base class is registered")]
    NoUniversalBase,

    /// More than one class lacks a supertype.
    #[error("classes `{first}` and `{second}` both lack a supertype")]
    MultipleRoots { first: String, second: String },
}

/// Registry of class definitions; the source of truth for inheritance.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    /// All classes, in definition order.
    classes: Vec<ClassDef>,

    /// Lowercased name → class.
    by_name: FxHashMap<String, ClassId>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // === Definition ===

    /// Define a class with no package and no flags.
    pub fn define(
        &mut self,
        name: &str,
        super_class: Option<ClassId>,
    ) -> Result<ClassId, RegistryError> {
        let key = name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(RegistryError::DuplicateName {
                name: name.to_owned(),
            });
        }
        if let Some(super_class) = super_class {
            self.get_checked(super_class)?;
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "class counts stay far below u32::MAX"
        )]
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassDef {
            name: name.to_owned(),
            super_class,
            package: String::new(),
            flags: ClassFlags::empty(),
        });
        self.by_name.insert(key, id);
        Ok(id)
    }

    /// Replace the flags of `class`.
    pub fn set_flags(&mut self, class: ClassId, flags: ClassFlags) -> Result<(), RegistryError> {
        self.get_mut_checked(class)?.flags = flags;
        Ok(())
    }

    /// Set the package `class` belongs to.
    pub fn set_package(&mut self, class: ClassId, package: &str) -> Result<(), RegistryError> {
        package.clone_into(&mut self.get_mut_checked(class)?.package);
        Ok(())
    }

    /// Change the supertype of `class`.
    ///
    /// A tree built earlier still files `class` under its old supertype until
    /// [`ClassTree::change_parent`](lineage_tree::ClassTree::change_parent) is
    /// called.
    pub fn set_super(&mut self, class: ClassId, super_class: ClassId) -> Result<(), RegistryError> {
        self.get_checked(class)?;
        self.get_checked(super_class)?;
        if self.is_descendant_of(super_class, class) {
            return Err(RegistryError::CyclicSuper {
                class: self.name(class).to_owned(),
                super_class: self.name(super_class).to_owned(),
            });
        }
        self.classes[class.index()].super_class = Some(super_class);
        tracing::debug!(
            class = self.name(class),
            super_class = self.name(super_class),
            "supertype changed"
        );
        Ok(())
    }

    // === Lookup ===

    /// Look up a class by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// The definition of `class`.
    #[inline]
    pub fn get(&self, class: ClassId) -> Option<&ClassDef> {
        self.classes.get(class.index())
    }

    /// Every class, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = ClassId> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "class counts stay far below u32::MAX"
        )]
        let len = self.classes.len() as u32;
        (0..len).map(ClassId)
    }

    /// Number of registered classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether `class` carries every flag in `flags`.
    pub fn has_flags(&self, class: ClassId, flags: ClassFlags) -> bool {
        self.get(class).is_some_and(|def| def.flags.contains(flags))
    }

    /// The one class without a supertype.
    pub fn universal_base(&self) -> Result<ClassId, RegistryError> {
        let mut roots = self.iter().filter(|&id| self.classes[id.index()].super_class.is_none());
        let Some(first) = roots.next() else {
            return Err(RegistryError::NoUniversalBase);
        };
        if let Some(second) = roots.next() {
            return Err(RegistryError::MultipleRoots {
                first: self.name(first).to_owned(),
                second: self.name(second).to_owned(),
            });
        }
        Ok(first)
    }

    fn get_checked(&self, class: ClassId) -> Result<&ClassDef, RegistryError> {
        self.get(class)
            .ok_or(RegistryError::UnknownClass { id: class.raw() })
    }

    fn get_mut_checked(&mut self, class: ClassId) -> Result<&mut ClassDef, RegistryError> {
        self.classes
            .get_mut(class.index())
            .ok_or(RegistryError::UnknownClass { id: class.raw() })
    }
}

impl TypeSystem for ClassRegistry {
    type Class = ClassId;

    fn name(&self, class: ClassId) -> &str {
        &self.classes[class.index()].name
    }

    fn super_class(&self, class: ClassId) -> Option<ClassId> {
        self.classes[class.index()].super_class
    }

    fn is_descendant_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.classes[c.index()].super_class;
        }
        false
    }
}
