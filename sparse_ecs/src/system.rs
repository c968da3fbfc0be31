use crate::{EcsResult, Entity, Filter, World};

/// A unit of per-frame behaviour driven by a [`Systems`](crate::Systems)
/// collection.
///
/// Every hook has an empty default, so a system implements only what it
/// needs. Within one collection the hooks run as follows:
///
/// 1. `init` on every system, then `filter` on every system, once
/// 2. each frame: all `pre_process`, then each system's `process` over the
///    entities its filter matches, then all `execute`
/// 3. `teardown` on every system, once
///
/// A system returning no filter is never asked to `process`.
///
/// # Example
/// ```
/// use sparse_ecs::{Component, EcsResult, Entity, Filter, System, Systems, World};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Position { x: f32, y: f32 }
/// impl Component for Position {}
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Velocity { x: f32, y: f32 }
/// impl Component for Velocity {}
///
/// struct Movement;
///
/// impl System for Movement {
///     fn filter(&mut self, world: &World) -> Option<Filter> {
///         Some(world.inc::<Position>().inc::<Velocity>())
///     }
///
///     fn process(&mut self, world: &mut World, entity: Entity) -> EcsResult<()> {
///         let velocity = world.get_component::<Velocity>(entity)?.clone();
///         let position = world.get_component_mut::<Position>(entity)?;
///         position.x += velocity.x;
///         position.y += velocity.y;
///         Ok(())
///     }
/// }
///
/// let mut world = World::new();
/// let ship = world.new_entity();
/// world.add_component(ship, Position { x: 0.0, y: 0.0 })?;
/// world.add_component(ship, Velocity { x: 1.0, y: 2.0 })?;
///
/// let mut systems = Systems::new();
/// systems.add(Movement);
/// systems.init(&mut world)?;
/// systems.execute(&mut world)?;
///
/// assert_eq!(world.get_component::<Position>(ship)?, &Position { x: 1.0, y: 2.0 });
/// # Ok::<(), sparse_ecs::EcsError>(())
/// ```
pub trait System {
    /// Name under which the collection records this system's timing.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once before the filter is requested. May create the entities
    /// or components the system depends on.
    fn init(&mut self, _world: &mut World) -> EcsResult<()> {
        Ok(())
    }

    /// Builds the filter selecting the entities to `process`.
    ///
    /// Requested once per `init` of the owning collection and cached.
    fn filter(&mut self, _world: &World) -> Option<Filter> {
        None
    }

    fn pre_process(&mut self, _world: &mut World) -> EcsResult<()> {
        Ok(())
    }

    /// Called once per matching entity, in the filter's enumeration order.
    ///
    /// The world may be mutated freely, including the entity being processed.
    fn process(&mut self, _world: &mut World, _entity: Entity) -> EcsResult<()> {
        Ok(())
    }

    fn execute(&mut self, _world: &mut World) -> EcsResult<()> {
        Ok(())
    }

    fn teardown(&mut self, _world: &mut World) -> EcsResult<()> {
        Ok(())
    }
}
