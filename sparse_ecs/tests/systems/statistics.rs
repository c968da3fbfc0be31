//! Scheduler Statistics Tests
//!
//! Tests for the per-system and whole-frame timings published after every
//! frame.

use std::thread::sleep;
use std::time::Duration;

use sparse_ecs::{
    Component, EcsResult, Entity, Filter, System, Systems, SystemsConfig, World, TOTAL_STATISTIC,
};

#[derive(Clone, Debug, PartialEq)]
struct C1 {
    v: i32,
}
impl Component for C1 {}

/// Sleeps 10ms in each of its three frame phases.
struct Sleepy;

impl System for Sleepy {
    fn init(&mut self, world: &mut World) -> EcsResult<()> {
        let entity = world.new_entity();
        world.add_component(entity, C1 { v: 0 })
    }

    fn filter(&mut self, world: &World) -> Option<Filter> {
        Some(world.inc::<C1>())
    }

    fn pre_process(&mut self, _world: &mut World) -> EcsResult<()> {
        sleep(Duration::from_millis(10));
        Ok(())
    }

    fn process(&mut self, _world: &mut World, _entity: Entity) -> EcsResult<()> {
        sleep(Duration::from_millis(10));
        Ok(())
    }

    fn execute(&mut self, _world: &mut World) -> EcsResult<()> {
        sleep(Duration::from_millis(10));
        Ok(())
    }
}

struct Idle;
impl System for Idle {}

#[test]
fn test_statistic_covers_all_three_phases() {
    let mut world = World::new();
    let mut systems = Systems::new();
    systems.add(Sleepy).add(Idle);
    systems.init(&mut world).unwrap();

    systems.execute(&mut world).unwrap();

    let sleepy = systems
        .statistic(std::any::type_name::<Sleepy>())
        .unwrap();
    let idle = systems.statistic(std::any::type_name::<Idle>()).unwrap();
    let total = systems.statistic(TOTAL_STATISTIC).unwrap();

    assert!(sleepy >= 29.5, "sleepy took {sleepy}ms");
    assert!(idle < sleepy);
    assert!(total >= sleepy);
    assert!(total >= idle);
}

#[test]
fn test_statistics_are_per_frame() {
    let mut world = World::new();
    let mut systems = Systems::new();
    systems.add(Sleepy);
    systems.init(&mut world).unwrap();

    systems.execute(&mut world).unwrap();
    systems.execute(&mut world).unwrap();

    let sleepy = systems
        .statistic(std::any::type_name::<Sleepy>())
        .unwrap();
    // Two frames would be at least 60ms if timings accumulated
    assert!(sleepy >= 29.5);
    assert!(systems.statistic(TOTAL_STATISTIC).unwrap() >= sleepy);
}

#[test]
fn test_statistics_keys_after_init() {
    let mut world = World::new();
    let mut systems = Systems::with_config(SystemsConfig::default().with_log_statistics(true));
    systems.add(Idle).add(Idle);

    systems.init(&mut world).unwrap();

    // Both children share one name
    assert_eq!(systems.statistics().len(), 2);
    assert!(systems
        .statistics()
        .values()
        .all(|&elapsed| elapsed == 0.0));

    systems.execute(&mut world).unwrap();
    assert!(systems.statistic(std::any::type_name::<Idle>()).is_some());
    assert!(systems.statistic("missing").is_none());
}

#[test]
fn test_nested_collection_reports_its_own_total() {
    let mut world = World::new();
    let mut inner = Systems::new();
    inner.add(Sleepy);
    let mut outer = Systems::new();
    outer.add(inner);

    outer.init(&mut world).unwrap();
    outer.execute(&mut world).unwrap();

    let nested = outer
        .statistic(std::any::type_name::<Systems>())
        .unwrap();
    assert!(nested >= 29.5);
    assert!(outer.statistic(TOTAL_STATISTIC).unwrap() >= nested);
}
