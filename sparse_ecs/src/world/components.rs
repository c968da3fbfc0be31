use tracing::trace;

use crate::{Component, ComponentType, EcsError, EcsResult, Entity};

use super::World;

impl World {
    /// Adds a component to an entity.
    ///
    /// Fails with `ComponentAlreadyExists` if the entity already has a
    /// component of this type, `EntityNotAlive` if the entity was destroyed,
    /// and `ForeignEntity` if it belongs to another world.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Position { x: f32, y: f32 }
    /// impl Component for Position {}
    ///
    /// let mut world = World::new();
    /// let entity = world.new_entity();
    ///
    /// assert!(world.add_component(entity, Position { x: 10.0, y: 20.0 }).is_ok());
    ///
    /// // Adding the same component type again fails
    /// assert!(world.add_component(entity, Position { x: 5.0, y: 5.0 }).is_err());
    /// ```
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> EcsResult<()> {
        self.ensure_alive(entity)?;
        self.storage_mut::<T>().add(entity, component)?;
        self.inc_component_count(entity);
        Ok(())
    }

    /// Attaches a component, replacing the stored value in place if the
    /// entity already has one.
    ///
    /// Returns the replaced value, or `None` when the component was added.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Position { x: f32, y: f32 }
    /// impl Component for Position {}
    ///
    /// let mut world = World::new();
    /// let entity = world.new_entity();
    ///
    /// assert_eq!(world.set_component(entity, Position { x: 1.0, y: 1.0 }).unwrap(), None);
    /// let old = world.set_component(entity, Position { x: 2.0, y: 2.0 }).unwrap();
    /// assert_eq!(old, Some(Position { x: 1.0, y: 1.0 }));
    /// assert_eq!(world.get_component::<Position>(entity).unwrap().x, 2.0);
    /// ```
    pub fn set_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> EcsResult<Option<T>> {
        self.check_owned(entity)?;
        if self.has_component::<T>(entity) {
            return Ok(self.storage_mut::<T>().set(entity, component));
        }

        self.add_component(entity, component)?;
        Ok(None)
    }

    /// Gets a reference to a component attached to an entity.
    ///
    /// Fails with `ComponentNotFound` when the entity has no `T`.
    pub fn get_component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        match self.storage::<T>() {
            Some(pool) if entity.world() == self.id => pool.get(entity),
            _ => Err(EcsError::ComponentNotFound {
                entity,
                component: std::any::type_name::<T>(),
            }),
        }
    }

    /// Gets a mutable reference to a component attached to an entity.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Health { value: u32 }
    /// impl Component for Health {}
    ///
    /// let mut world = World::new();
    /// let entity = world.new_entity();
    /// world.add_component(entity, Health { value: 100 }).unwrap();
    ///
    /// world.get_component_mut::<Health>(entity).unwrap().value -= 25;
    /// assert_eq!(world.get_component::<Health>(entity).unwrap().value, 75);
    /// ```
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        if entity.world() != self.id {
            return Err(EcsError::ComponentNotFound {
                entity,
                component: std::any::type_name::<T>(),
            });
        }
        self.storage_mut::<T>().get_mut(entity)
    }

    /// Checks if an entity has a specific component type.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        entity.world() == self.id
            && self
                .storage::<T>()
                .is_some_and(|storage| storage.has(entity))
    }

    /// Removes a component from an entity and returns it.
    ///
    /// Fails with `ComponentNotFound` if the entity has no `T`; see
    /// [`World::remove_component_if_present`] for the non-failing form.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> EcsResult<T> {
        self.check_owned(entity)?;
        let component = self.storage_mut::<T>().remove(entity)?;
        self.dec_component_count(entity);
        Ok(component)
    }

    /// Removes a component if the entity has one.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{World, Component};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Stunned;
    /// impl Component for Stunned {}
    ///
    /// let mut world = World::new();
    /// let entity = world.new_entity();
    ///
    /// assert_eq!(world.remove_component_if_present::<Stunned>(entity), None);
    /// world.add_component(entity, Stunned).unwrap();
    /// assert_eq!(world.remove_component_if_present::<Stunned>(entity), Some(Stunned));
    /// ```
    pub fn remove_component_if_present<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.has_component::<T>(entity) {
            return None;
        }
        self.remove_component(entity).ok()
    }

    /// Type-erased [`World::has_component`].
    pub fn has_component_of(&self, entity: Entity, component: ComponentType) -> bool {
        entity.world() == self.id
            && self
                .pool_of(component.type_id())
                .is_some_and(|pool| pool.has(entity))
    }

    /// Type-erased [`World::remove_component`]; the removed value is dropped.
    pub fn remove_component_of(&mut self, entity: Entity, component: ComponentType) -> EcsResult<()> {
        self.check_owned(entity)?;
        let removed = self
            .pool_of_mut(component.type_id())
            .is_some_and(|pool| pool.remove_entity(entity));

        if !removed {
            return Err(EcsError::ComponentNotFound {
                entity,
                component: component.name(),
            });
        }
        self.dec_component_count(entity);
        Ok(())
    }

    /// Type-erased [`World::remove_component_if_present`].
    ///
    /// Returns whether a component was removed.
    pub fn remove_component_of_if_present(
        &mut self,
        entity: Entity,
        component: ComponentType,
    ) -> bool {
        if !self.has_component_of(entity, component) {
            return false;
        }
        self.remove_component_of(entity, component).is_ok()
    }

    /// Attaches the default value of a runtime-typed component.
    ///
    /// The type must have been made constructible with
    /// [`World::register`]; otherwise this fails with `NoDefaultConstructor`.
    pub fn add_default_of(&mut self, entity: Entity, component: ComponentType) -> EcsResult<()> {
        self.ensure_alive(entity)?;
        let pool = self
            .pool_of_mut(component.type_id())
            .ok_or(EcsError::NoDefaultConstructor(component.name()))?;
        pool.add_default(entity)?;
        self.inc_component_count(entity);
        trace!(%entity, component = component.name(), "added default component");
        Ok(())
    }

    fn ensure_alive(&self, entity: Entity) -> EcsResult<()> {
        self.check_owned(entity)?;
        if !self.is_alive(entity) {
            return Err(EcsError::EntityNotAlive(entity));
        }
        Ok(())
    }
}
