//! World Operations Integration Tests
//!
//! Tests for world-wide operations: pool creation, counting, singletons,
//! bulk clearing and configuration.

use sparse_ecs::{Component, ComponentType, EcsError, World, WorldConfig};

#[derive(Clone, Debug, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Clone, Debug, PartialEq)]
struct Velocity {
    x: f32,
    y: f32,
}
impl Component for Velocity {}

#[derive(Clone, Debug, PartialEq)]
struct Clock {
    now: f32,
}
impl Component for Clock {}

fn spawn_movers(world: &mut World, count: usize) {
    for i in 0..count {
        let entity = world.new_entity();
        world
            .add_component(
                entity,
                Position {
                    x: i as f32,
                    y: 0.0,
                },
            )
            .unwrap();
        if i % 2 == 0 {
            world
                .add_component(entity, Velocity { x: 1.0, y: 1.0 })
                .unwrap();
        }
    }
}

#[test]
fn test_pools_are_created_lazily() {
    let mut world = World::new();
    assert!(world.storage::<Position>().is_none());

    let entity = world.new_entity();
    world.add_component(entity, Position { x: 0.0, y: 0.0 }).unwrap();
    world.remove_component::<Position>(entity).unwrap();

    assert!(world.storage::<Position>().is_some());
    assert_eq!(world.count_components::<Position>(), 0);
    assert_eq!(world.entities_count(), 0);
}

#[test]
fn test_count_components_by_type_and_handle() {
    let mut world = World::new();
    spawn_movers(&mut world, 7);

    assert_eq!(world.count_components::<Position>(), 7);
    assert_eq!(world.count_components::<Velocity>(), 4);
    assert_eq!(world.count_components_of(ComponentType::of::<Velocity>()), 4);
    assert_eq!(world.entities_count(), 7);
}

#[test]
fn test_delete_all_resets_pools_and_live_set() {
    let mut world = World::new();
    spawn_movers(&mut world, 10);
    let before = world.new_entity();

    world.delete_all();

    assert_eq!(world.entities_count(), 0);
    assert_eq!(world.count_components::<Position>(), 0);
    assert_eq!(world.count_components::<Velocity>(), 0);
    assert!(world.new_entity().id() > before.id());
}

#[test]
fn test_singleton_component_access() {
    let mut world = World::new();
    assert!(matches!(
        world.first_component::<Clock>(),
        Err(EcsError::EmptySingleton(_))
    ));

    let holder = world.new_entity();
    world.add_component(holder, Clock { now: 0.0 }).unwrap();
    for _ in 0..4 {
        world.first_component_mut::<Clock>().unwrap().now += 0.25;
    }

    assert_eq!(world.first_component::<Clock>().unwrap().now, 1.0);
}

#[test]
fn test_clear_components_drops_entities_left_empty() {
    let mut world = World::new();
    spawn_movers(&mut world, 6);

    assert_eq!(world.clear_components::<Position>(), 6);

    // Only the entities that also had a velocity survive
    assert_eq!(world.entities_count(), 3);
    assert_eq!(world.count_components::<Velocity>(), 3);
}

#[test]
fn test_world_config() {
    let config = WorldConfig::default().with_initial_pool_capacity(2);
    let mut world = World::with_config(config);
    spawn_movers(&mut world, 20);

    assert_eq!(world.config(), &config);
    assert_eq!(world.count_components::<Position>(), 20);
}

#[test]
fn test_entity_handles_display() {
    let mut world = World::new();
    let entity = world.new_entity();

    let shown = entity.to_string();

    assert!(shown.contains(&entity.id().to_string()));
    assert!(shown.contains(&world.id().to_string()));
}
