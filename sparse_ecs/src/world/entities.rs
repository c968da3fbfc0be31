use std::ops::Bound;

use tracing::{debug, trace};

use crate::{EcsError, EcsResult, Entity};

use super::World;

impl World {
    /// Allocates a new entity, alive with zero components.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::World;
    ///
    /// let mut world = World::new();
    /// let entity1 = world.new_entity();
    /// let entity2 = world.new_entity();
    ///
    /// assert_ne!(entity1, entity2);
    /// assert_eq!(world.entities_count(), 2);
    /// ```
    pub fn new_entity(&mut self) -> Entity {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        self.component_counts.insert(id, 0);
        trace!(entity = id, world = %self.id, "spawned entity");
        Entity::new(self.id, id)
    }

    /// Number of live entities.
    pub fn entities_count(&self) -> usize {
        self.component_counts.len()
    }

    /// Whether `entity` was created by this world and is still alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.world() == self.id && self.component_counts.contains_key(&entity.id())
    }

    /// Iterates the live entities in id order.
    ///
    /// This borrows the world; use [`World::each_entity`] to walk the entities
    /// while mutating.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        let world = self.id;
        self.component_counts
            .keys()
            .map(move |&id| Entity::new(world, id))
    }

    /// Starts a whole-world enumeration that tolerates mutation.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{Component, World};
    ///
    /// #[derive(Debug, Clone)]
    /// struct Tag;
    /// impl Component for Tag {}
    ///
    /// let mut world = World::new();
    /// for _ in 0..3 {
    ///     let e = world.new_entity();
    ///     world.add_component(e, Tag).unwrap();
    /// }
    ///
    /// let mut cursor = world.each_entity();
    /// while let Some(entity) = cursor.next(&world) {
    ///     world.destroy_entity(entity);
    /// }
    /// assert_eq!(world.entities_count(), 0);
    /// ```
    pub fn each_entity(&self) -> EntityCursor {
        EntityCursor { last: None }
    }

    /// Removes every component the entity holds and forgets it.
    ///
    /// Destroying an entity twice, or one from another world, is a no-op.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if entity.world() != self.id {
            return;
        }

        let mut removed = 0;
        for pool in self.pools.values_mut() {
            if pool.remove_entity(entity) {
                removed += 1;
            }
        }

        if self.component_counts.remove(&entity.id()).is_some() {
            debug!(%entity, removed, "destroyed entity");
        }
    }

    /// Clears every pool and the live set. The id counter is kept, so new
    /// entities never collide with handles from before the reset.
    pub fn delete_all(&mut self) {
        for pool in self.pools.values_mut() {
            pool.clear();
        }
        self.component_counts.clear();
        debug!(world = %self.id, "deleted all entities");
    }

    /// Fails unless `entity` was created by this world.
    pub(crate) fn check_owned(&self, entity: Entity) -> EcsResult<()> {
        if entity.world() == self.id {
            Ok(())
        } else {
            Err(EcsError::ForeignEntity(entity))
        }
    }

    pub(crate) fn inc_component_count(&mut self, entity: Entity) {
        if let Some(count) = self.component_counts.get_mut(&entity.id()) {
            *count += 1;
        }
    }

    /// Drops the entity from the live set once its last component is gone.
    pub(crate) fn dec_component_count(&mut self, entity: Entity) {
        if let Some(count) = self.component_counts.get_mut(&entity.id()) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.component_counts.remove(&entity.id());
                trace!(%entity, "entity lost its last component");
            }
        }
    }
}

/// Cursor over the live entities of a world, in id order.
///
/// It holds no borrow, so the world can be mutated between steps: entities
/// destroyed before their turn are skipped and entities created during the
/// walk are reached as long as their id is above the cursor.
#[derive(Debug, Clone)]
pub struct EntityCursor {
    last: Option<u64>,
}

impl EntityCursor {
    pub fn next(&mut self, world: &World) -> Option<Entity> {
        let lower = match self.last {
            Some(last) => Bound::Excluded(last),
            None => Bound::Unbounded,
        };

        let (&id, _) = world
            .component_counts
            .range((lower, Bound::Unbounded))
            .next()?;
        self.last = Some(id);
        Some(Entity::new(world.id, id))
    }
}
