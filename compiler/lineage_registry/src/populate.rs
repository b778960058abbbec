//! Population driver: file every registered class into a fresh tree.

use lineage_tree::{ClassTree, TypeSystem};

use crate::{ClassId, ClassRegistry, RegistryError};

/// Build a tree holding every class in `registry`, inserted in definition
/// order.
pub fn build_tree(registry: &ClassRegistry) -> Result<ClassTree<ClassId>, RegistryError> {
    build_tree_from(registry, registry.iter())
}

/// Build a tree rooted at the registry's universal base and insert `order`.
///
/// The resulting shape does not depend on `order`; classes missing from it
/// are simply absent from the tree.
#[tracing::instrument(level = "debug", skip_all, fields(classes = registry.len()))]
pub fn build_tree_from(
    registry: &ClassRegistry,
    order: impl IntoIterator<Item = ClassId>,
) -> Result<ClassTree<ClassId>, RegistryError> {
    let base = registry.universal_base()?;
    let mut tree = ClassTree::new(base);

    let mut rejected = 0usize;
    for class in order {
        if !tree.add_class(registry, class) {
            rejected += 1;
            tracing::warn!(name = registry.name(class), "class left out of the tree");
        }
    }

    tree.debug_validate(registry);
    tracing::debug!(nodes = tree.node_count(), rejected, "class tree built");
    Ok(tree)
}
