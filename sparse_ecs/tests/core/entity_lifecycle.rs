//! Entity Lifecycle Integration Tests
//!
//! Tests focused on entity creation, destruction and liveness tracking
//! across the entity lifecycle.

use sparse_ecs::{Component, EcsError, World};

// Test Components
#[derive(Clone, Debug, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Clone, Debug, PartialEq)]
struct Health {
    value: u32,
}
impl Component for Health {}

#[derive(Clone, Debug, PartialEq)]
struct Tag {
    name: String,
}
impl Component for Tag {}

#[test]
fn test_entity_spawn_destroy_cycle() {
    let mut world = World::new();

    let mut entities = Vec::new();
    for i in 0..10 {
        let entity = world.new_entity();
        world
            .add_component(
                entity,
                Position {
                    x: i as f32,
                    y: i as f32,
                },
            )
            .unwrap();
        entities.push(entity);
    }
    assert_eq!(world.entities_count(), 10);

    // Destroy every other entity
    for entity in entities.iter().step_by(2) {
        world.destroy_entity(*entity);
    }

    assert_eq!(world.entities_count(), 5);
    assert_eq!(world.count_components::<Position>(), 5);
    for entity in entities.iter().step_by(2) {
        assert!(!world.has_component::<Position>(*entity));
        assert!(!world.is_alive(*entity));
    }
    for entity in entities.iter().skip(1).step_by(2) {
        assert!(world.has_component::<Position>(*entity));
    }
}

#[test]
fn test_destroyed_entity_is_indistinguishable_from_never_created() {
    let mut world = World::new();
    let destroyed = world.new_entity();
    world.add_component(destroyed, Health { value: 10 }).unwrap();
    world
        .add_component(
            destroyed,
            Tag {
                name: "goblin".to_string(),
            },
        )
        .unwrap();

    world.destroy_entity(destroyed);

    assert!(!world.has_component::<Health>(destroyed));
    assert!(!world.has_component::<Tag>(destroyed));
    assert!(world.entities().all(|e| e != destroyed));
    assert!(world.inc::<Health>().iter(&world).next().is_none());
    assert!(matches!(
        world.get_component::<Health>(destroyed),
        Err(EcsError::ComponentNotFound { .. })
    ));
    assert_eq!(
        world.add_component(destroyed, Health { value: 1 }),
        Err(EcsError::EntityNotAlive(destroyed))
    );
}

#[test]
fn test_destroy_is_idempotent() {
    let mut world = World::new();
    let entity = world.new_entity();
    world.add_component(entity, Health { value: 1 }).unwrap();
    let survivor = world.new_entity();
    world.add_component(survivor, Health { value: 2 }).unwrap();

    for _ in 0..3 {
        world.destroy_entity(entity);
    }

    assert_eq!(world.entities_count(), 1);
    assert_eq!(world.get_component::<Health>(survivor).unwrap().value, 2);
}

#[test]
fn test_ids_are_never_reused() {
    let mut world = World::new();
    let first = world.new_entity();
    world.destroy_entity(first);
    world.delete_all();

    let second = world.new_entity();

    assert_ne!(first, second);
    assert!(second.id() > first.id());
    assert!(!world.is_alive(first));
}

#[test]
fn test_entity_alive_until_last_component_removed() {
    let mut world = World::new();
    let entity = world.new_entity();
    assert!(world.is_alive(entity));

    world.add_component(entity, Health { value: 5 }).unwrap();
    world.add_component(entity, Position { x: 0.0, y: 0.0 }).unwrap();

    world.remove_component_if_present::<Health>(entity);
    assert!(world.is_alive(entity));
    world.remove_component_if_present::<Position>(entity);
    assert!(!world.is_alive(entity));

    // A dropped entity cannot be revived
    assert!(world.set_component(entity, Health { value: 1 }).is_err());
}

#[test]
fn test_each_entity_walks_live_set_in_id_order() {
    let mut world = World::new();
    let entities: Vec<_> = (0..5).map(|_| world.new_entity()).collect();
    world.destroy_entity(entities[1]);

    let mut visited = Vec::new();
    let mut cursor = world.each_entity();
    while let Some(entity) = cursor.next(&world) {
        visited.push(entity);
        if entity == entities[2] {
            // Spawned during the walk, above the cursor
            world.new_entity();
        }
    }

    assert_eq!(visited.len(), 5);
    assert_eq!(&visited[..4], &[entities[0], entities[2], entities[3], entities[4]]);
}

#[test]
fn test_entities_from_two_worlds_never_mix() {
    let mut world_a = World::new();
    let mut world_b = World::new();
    let a = world_a.new_entity();
    let b = world_b.new_entity();
    world_a.add_component(a, Health { value: 1 }).unwrap();

    assert_eq!(a.id(), b.id());
    assert_ne!(a, b);
    assert!(!world_a.has_component::<Health>(b));
    assert_eq!(
        world_a.add_component(b, Health { value: 2 }),
        Err(EcsError::ForeignEntity(b))
    );
    world_a.destroy_entity(b);
    assert!(world_a.is_alive(a));
}

#[test]
fn test_destroyed_entity_cannot_regain_components() {
    let mut world = World::new();
    let destroyed = world.spawn().add(Position { x: 0.0, y: 0.0 }).unwrap().id();
    let emptied = world.spawn().add(Position { x: 1.0, y: 1.0 }).unwrap().id();
    world.destroy_entity(destroyed);
    world.remove_component::<Position>(emptied).unwrap();

    for entity in [destroyed, emptied] {
        assert_eq!(
            world.add_component(entity, Health { value: 1 }),
            Err(EcsError::EntityNotAlive(entity))
        );
        assert!(world.set_component(entity, Health { value: 2 }).is_err());
        assert!(world.entity_mut(entity).add(Health { value: 3 }).is_err());
        assert!(!world.has_component::<Health>(entity));
        assert!(!world.is_alive(entity));
    }

    assert_eq!(world.inc::<Health>().count(&world), 0);
    assert_eq!(world.inc::<Position>().count(&world), 0);
    assert_eq!(world.count_components::<Health>(), 0);
    assert_eq!(world.entities_count(), 0);
    assert_eq!(world.each_entity().next(&world), None);
}
