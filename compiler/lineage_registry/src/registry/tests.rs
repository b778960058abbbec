use pretty_assertions::assert_eq;

use super::*;

#[test]
fn define_and_lookup_ignoring_case() {
    let mut registry = ClassRegistry::new();
    let object = registry.define("Object", None).expect("fresh name");
    let actor = registry.define("Actor", Some(object)).expect("fresh name");

    assert_eq!(registry.lookup("actor"), Some(actor));
    assert_eq!(registry.lookup("OBJECT"), Some(object));
    assert_eq!(registry.lookup("Pawn"), None);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec![object, actor]);
}

#[test]
fn duplicate_name_rejected() {
    let mut registry = ClassRegistry::new();
    registry.define("Object", None).expect("fresh name");

    assert_eq!(
        registry.define("OBJECT", None),
        Err(RegistryError::DuplicateName {
            name: "OBJECT".to_owned()
        })
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn unknown_super_rejected() {
    let mut other = ClassRegistry::new();
    other.define("A", None).expect("fresh name");
    let foreign = other.define("B", None).expect("fresh name");

    let mut registry = ClassRegistry::new();
    let err = registry
        .define("Object", Some(foreign))
        .expect_err("foreign id");
    assert_eq!(err.to_string(), "class id 1 is not registered");
    assert!(registry.is_empty());
}

#[test]
fn descendant_relation_is_reflexive_and_transitive() {
    let mut registry = ClassRegistry::new();
    let object = registry.define("Object", None).expect("fresh name");
    let actor = registry.define("Actor", Some(object)).expect("fresh name");
    let pawn = registry.define("Pawn", Some(actor)).expect("fresh name");

    assert!(registry.is_descendant_of(pawn, pawn));
    assert!(registry.is_descendant_of(pawn, object));
    assert!(!registry.is_descendant_of(object, pawn));
    assert_eq!(registry.super_class(pawn), Some(actor));
    assert_eq!(registry.name(pawn), "Pawn");
}

#[test]
fn set_super_rejects_cycles() {
    let mut registry = ClassRegistry::new();
    let object = registry.define("Object", None).expect("fresh name");
    let actor = registry.define("Actor", Some(object)).expect("fresh name");
    let pawn = registry.define("Pawn", Some(actor)).expect("fresh name");
    let controller = registry.define("Controller", Some(actor)).expect("fresh name");

    assert_eq!(
        registry.set_super(actor, pawn),
        Err(RegistryError::CyclicSuper {
            class: "Actor".to_owned(),
            super_class: "Pawn".to_owned(),
        })
    );
    assert!(registry.set_super(actor, actor).is_err());

    registry.set_super(pawn, controller).expect("no cycle");
    assert_eq!(registry.super_class(pawn), Some(controller));
}

#[test]
fn flags_and_packages() {
    let mut registry = ClassRegistry::new();
    let object = registry.define("Object", None).expect("fresh name");
    registry
        .set_flags(object, ClassFlags::NATIVE | ClassFlags::ABSTRACT)
        .expect("known class");
    registry.set_package(object, "Core").expect("known class");

    assert!(registry.has_flags(object, ClassFlags::NATIVE));
    assert!(!registry.has_flags(object, ClassFlags::PLACEABLE));
    let def = registry.get(object).expect("known class");
    assert_eq!(def.package, "Core");
    assert_eq!(def.super_class, None);
}

#[test]
fn universal_base_must_be_unique() {
    let mut registry = ClassRegistry::new();
    assert_eq!(registry.universal_base(), Err(RegistryError::NoUniversalBase));

    let object = registry.define("Object", None).expect("fresh name");
    registry.define("Actor", Some(object)).expect("fresh name");
    assert_eq!(registry.universal_base(), Ok(object));

    registry.define("Stray", None).expect("fresh name");
    assert_eq!(
        registry.universal_base(),
        Err(RegistryError::MultipleRoots {
            first: "Object".to_owned(),
            second: "Stray".to_owned(),
        })
    );
}
