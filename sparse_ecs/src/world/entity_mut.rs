use crate::{Component, ComponentType, EcsResult, Entity};

use super::World;

/// A mutable handle to one entity, borrowing its world.
///
/// Component operations chain, so an entity can be assembled in one
/// expression. The borrow is released when the handle is dropped.
///
/// # Example
/// ```
/// use sparse_ecs::{Component, World};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Position { x: f32, y: f32 }
/// impl Component for Position {}
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Velocity { dx: f32, dy: f32 }
/// impl Component for Velocity {}
///
/// let mut world = World::new();
/// let entity = world
///     .spawn()
///     .add(Position { x: 0.0, y: 0.0 })?
///     .add(Velocity { dx: 1.0, dy: 0.5 })?
///     .id();
///
/// world.entity_mut(entity).get_mut::<Position>()?.x += 1.0;
/// assert_eq!(world.entity_mut(entity).get::<Position>()?.x, 1.0);
/// # Ok::<(), sparse_ecs::EcsError>(())
/// ```
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl World {
    /// Creates an entity and returns a handle to it.
    pub fn spawn(&mut self) -> EntityMut<'_> {
        let entity = self.new_entity();
        EntityMut {
            world: self,
            entity,
        }
    }

    /// Returns a handle for an existing entity.
    ///
    /// The handle is returned even for destroyed or foreign entities; its
    /// operations then report `false`, not found, or an error.
    pub fn entity_mut(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut {
            world: self,
            entity,
        }
    }
}

impl<'w> EntityMut<'w> {
    pub fn id(&self) -> Entity {
        self.entity
    }

    pub fn is_alive(&self) -> bool {
        self.world.is_alive(self.entity)
    }

    pub fn add<T: Component>(&mut self, component: T) -> EcsResult<&mut Self> {
        self.world.add_component(self.entity, component)?;
        Ok(self)
    }

    pub fn set<T: Component>(&mut self, component: T) -> EcsResult<&mut Self> {
        self.world.set_component(self.entity, component)?;
        Ok(self)
    }

    /// Returns a copy of the component.
    pub fn get<T: Component + Clone>(&self) -> EcsResult<T> {
        self.world.get_component::<T>(self.entity).cloned()
    }

    pub fn get_ref<T: Component>(&self) -> EcsResult<&T> {
        self.world.get_component::<T>(self.entity)
    }

    pub fn get_mut<T: Component>(&mut self) -> EcsResult<&mut T> {
        self.world.get_component_mut::<T>(self.entity)
    }

    pub fn has<T: Component>(&self) -> bool {
        self.world.has_component::<T>(self.entity)
    }

    pub fn remove<T: Component>(&mut self) -> EcsResult<&mut Self> {
        self.world.remove_component::<T>(self.entity)?;
        Ok(self)
    }

    pub fn remove_if_present<T: Component>(&mut self) -> &mut Self {
        self.world.remove_component_if_present::<T>(self.entity);
        self
    }

    pub fn has_of(&self, component: ComponentType) -> bool {
        self.world.has_component_of(self.entity, component)
    }

    pub fn remove_of(&mut self, component: ComponentType) -> EcsResult<&mut Self> {
        self.world.remove_component_of(self.entity, component)?;
        Ok(self)
    }

    pub fn remove_of_if_present(&mut self, component: ComponentType) -> &mut Self {
        self.world
            .remove_component_of_if_present(self.entity, component);
        self
    }

    pub fn add_default_of(&mut self, component: ComponentType) -> EcsResult<&mut Self> {
        self.world.add_default_of(self.entity, component)?;
        Ok(self)
    }

    /// Destroys the entity, consuming the handle.
    pub fn destroy(self) {
        self.world.destroy_entity(self.entity);
    }
}
