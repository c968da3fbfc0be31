//! Component Lifecycle Integration Tests
//!
//! Tests focused on attaching, replacing, reading and removing components,
//! through both the world and entity handles.

use sparse_ecs::{Component, ComponentType, EcsError, World};

#[derive(Clone, Debug, PartialEq)]
struct C1 {
    v: i32,
}
impl Component for C1 {}

#[derive(Clone, Debug, PartialEq, Default)]
struct Armor {
    rating: u32,
}
impl Component for Armor {}

#[derive(Clone, Debug, PartialEq)]
struct Poisoned;
impl Component for Poisoned {}

#[test]
fn test_set_twice_keeps_component_present() {
    let mut world = World::new();
    let mut entity = world.spawn();

    entity.set(C1 { v: 1 }).unwrap();
    assert!(entity.has::<C1>());
    entity.set(C1 { v: 2 }).unwrap();
    assert!(entity.has::<C1>());

    assert_eq!(entity.get::<C1>().unwrap(), C1 { v: 2 });
}

#[test]
fn test_double_add_fails_without_side_effects() {
    let mut world = World::new();
    let entity = world.new_entity();
    world.add_component(entity, C1 { v: 1 }).unwrap();

    let err = world.add_component(entity, C1 { v: 9 }).unwrap_err();

    assert!(matches!(err, EcsError::ComponentAlreadyExists { .. }));
    assert_eq!(world.get_component::<C1>(entity).unwrap().v, 1);
    assert_eq!(world.count_components::<C1>(), 1);
}

#[test]
fn test_get_missing_component_fails_loudly() {
    let mut world = World::new();
    let entity = world.spawn().add(Poisoned).unwrap().id();

    let err = world.entity_mut(entity).get::<C1>().unwrap_err();

    assert_eq!(
        err,
        EcsError::ComponentNotFound {
            entity,
            component: std::any::type_name::<C1>(),
        }
    );
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_mutable_reference_edits_storage() {
    let mut world = World::new();
    let entity = world.new_entity();
    world.add_component(entity, C1 { v: 123 }).unwrap();

    {
        let c1 = world.get_component_mut::<C1>(entity).unwrap();
        c1.v += 1;
    }

    assert_eq!(world.get_component::<C1>(entity).unwrap().v, 124);
}

#[test]
fn test_guarded_removal_never_fails() {
    let mut world = World::new();
    let entity = world.new_entity();
    world.add_component(entity, Poisoned).unwrap();
    world.add_component(entity, C1 { v: 0 }).unwrap();

    assert!(world.remove_component::<Poisoned>(entity).is_ok());
    assert!(world.remove_component::<Poisoned>(entity).is_err());
    assert_eq!(world.remove_component_if_present::<Poisoned>(entity), None);
    assert!(!world.remove_component_of_if_present(entity, ComponentType::of::<Poisoned>()));

    assert!(world.has_component::<C1>(entity));
}

#[test]
fn test_runtime_typed_operations() {
    let mut world = World::new();
    world.register::<Armor>();
    let armor = ComponentType::of::<Armor>();
    let entity = world.spawn().add(C1 { v: 0 }).unwrap().id();

    world.add_default_of(entity, armor).unwrap();
    assert!(world.has_component_of(entity, armor));
    assert_eq!(world.get_component::<Armor>(entity).unwrap(), &Armor::default());

    assert!(matches!(
        world.add_default_of(entity, armor),
        Err(EcsError::ComponentAlreadyExists { .. })
    ));

    world.remove_component_of(entity, armor).unwrap();
    assert!(!world.has_component_of(entity, armor));
    assert!(world.is_alive(entity));
}

#[test]
fn test_add_default_needs_registration() {
    let mut world = World::new();
    let entity = world.new_entity();

    let err = world
        .add_default_of(entity, ComponentType::of::<Poisoned>())
        .unwrap_err();

    assert_eq!(
        err,
        EcsError::NoDefaultConstructor(std::any::type_name::<Poisoned>())
    );
    assert_eq!(ComponentType::of::<Poisoned>().name(), std::any::type_name::<Poisoned>());
}

#[test]
fn test_swap_remove_keeps_other_components_reachable() {
    let mut world = World::new();
    let entities: Vec<_> = (0..6)
        .map(|i| world.spawn().add(C1 { v: i }).unwrap().id())
        .collect();

    world.remove_component::<C1>(entities[0]).unwrap();
    world.remove_component::<C1>(entities[3]).unwrap();

    let pool = world.storage::<C1>().unwrap();
    assert_eq!(pool.count(), 4);
    for (i, &entity) in entities.iter().enumerate() {
        if i == 0 || i == 3 {
            assert!(!pool.has(entity));
            continue;
        }
        let index = pool.index_of(entity).unwrap();
        assert_eq!(pool.entity_at(index), Some(entity));
        assert_eq!(pool.get(entity).unwrap().v, i as i32);
    }
}
