use std::any::Any;
use std::collections::HashMap;

use tracing::trace;

use crate::{Component, EcsError, EcsResult, Entity};

/// Default initial dense capacity of a pool.
pub const DEFAULT_POOL_CAPACITY: usize = 128;

/// Sparse-set storage for a single component type.
///
/// Values and their owning entities live in two parallel dense vectors with no
/// gaps; a sparse map points each entity at its dense slot. Membership, insert,
/// lookup and removal are all O(1). Removal moves the last element into the
/// freed slot, so insertion order is not preserved once something is removed.
///
/// # Examples
///
/// ```
/// use sparse_ecs::{Component, World};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Health { hp: u32 }
/// impl Component for Health {}
///
/// let mut world = World::new();
/// let a = world.new_entity();
/// let b = world.new_entity();
///
/// world.add_component(a, Health { hp: 10 }).unwrap();
/// world.add_component(b, Health { hp: 20 }).unwrap();
/// world.remove_component::<Health>(a).unwrap();
///
/// // `b` was moved into the slot `a` vacated
/// let pool = world.storage::<Health>().unwrap();
/// assert_eq!(pool.entity_at(0), Some(b));
/// assert_eq!(pool.count(), 1);
/// ```
///
/// Pools are only changed structurally through the [`World`](crate::World),
/// which keeps the live-entity counts in step.
pub struct Pool<T> {
    items: Vec<T>,
    entities: Vec<Entity>,
    index_by_entity: HashMap<Entity, usize>,
    default_ctor: Option<fn() -> T>,
}

impl<T: Component> Pool<T> {
    /// Creates an empty pool with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            index_by_entity: HashMap::with_capacity(capacity),
            default_ctor: None,
        }
    }

    /// Records how to build a default `T` for type-erased `add_default`.
    pub(crate) fn set_default_ctor(&mut self, ctor: fn() -> T) {
        self.default_ctor = Some(ctor);
    }

    pub fn has(&self, entity: Entity) -> bool {
        self.index_by_entity.contains_key(&entity)
    }

    /// Appends a component for `entity`.
    ///
    /// Fails with [`EcsError::ComponentAlreadyExists`] if the entity already
    /// holds one; use [`Pool::set`] for overwrite semantics.
    pub(crate) fn add(&mut self, entity: Entity, value: T) -> EcsResult<()> {
        if self.has(entity) {
            return Err(EcsError::ComponentAlreadyExists {
                entity,
                component: std::any::type_name::<T>(),
            });
        }

        let index = self.items.len();
        self.items.push(value);
        self.entities.push(entity);
        self.index_by_entity.insert(entity, index);
        Ok(())
    }

    /// Replaces the value held by `entity` in place, or appends it.
    ///
    /// Returns the previous value when there was one.
    pub(crate) fn set(&mut self, entity: Entity, value: T) -> Option<T> {
        match self.index_by_entity.get(&entity) {
            Some(&index) => Some(std::mem::replace(&mut self.items[index], value)),
            None => {
                let index = self.items.len();
                self.items.push(value);
                self.entities.push(entity);
                self.index_by_entity.insert(entity, index);
                None
            }
        }
    }

    /// Removes and returns the component held by `entity`.
    ///
    /// The former last element is moved into the freed slot.
    pub(crate) fn remove(&mut self, entity: Entity) -> EcsResult<T> {
        let index = self
            .index_by_entity
            .remove(&entity)
            .ok_or_else(|| Self::not_found(entity))?;

        let value = self.items.swap_remove(index);
        self.entities.swap_remove(index);

        if let Some(&moved) = self.entities.get(index) {
            self.index_by_entity.insert(moved, index);
            trace!(%entity, %moved, index, "swap-removed component");
        }

        Ok(value)
    }

    pub fn get(&self, entity: Entity) -> EcsResult<&T> {
        match self.index_by_entity.get(&entity) {
            Some(&index) => Ok(&self.items[index]),
            None => Err(Self::not_found(entity)),
        }
    }

    /// Mutable access to the component held by `entity`.
    ///
    /// The borrow ends before any further structural change to the pool can
    /// happen, so a stale reference can never be observed.
    pub fn get_mut(&mut self, entity: Entity) -> EcsResult<&mut T> {
        match self.index_by_entity.get(&entity) {
            Some(&index) => Ok(&mut self.items[index]),
            None => Err(Self::not_found(entity)),
        }
    }

    /// Dense slot currently holding `entity`'s component.
    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.index_by_entity.get(&entity).copied()
    }

    /// Entity owning the dense slot `index`.
    pub fn entity_at(&self, index: usize) -> Option<Entity> {
        self.entities.get(index).copied()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entities in dense order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The component in the first dense slot, if any.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.items.first_mut()
    }

    /// Iterates `(entity, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.items.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.items.iter_mut())
    }

    /// Drops every entry, keeping the allocated capacity.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.entities.clear();
        self.index_by_entity.clear();
    }

    fn not_found(entity: Entity) -> EcsError {
        EcsError::ComponentNotFound {
            entity,
            component: std::any::type_name::<T>(),
        }
    }
}

impl<T: Component> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`Pool`], used by the world to reach pools whose
/// component type is only known at runtime.
pub(crate) trait AnyPool {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn count(&self) -> usize;
    fn has(&self, entity: Entity) -> bool;
    fn entity_at(&self, index: usize) -> Option<Entity>;
    fn entities(&self) -> &[Entity];
    /// Drops `entity`'s component, returning whether there was one.
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn add_default(&mut self, entity: Entity) -> EcsResult<()>;
    fn clear(&mut self);
}

impl<T: Component> AnyPool for Pool<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn count(&self) -> usize {
        Pool::count(self)
    }

    fn has(&self, entity: Entity) -> bool {
        Pool::has(self, entity)
    }

    fn entity_at(&self, index: usize) -> Option<Entity> {
        Pool::entity_at(self, index)
    }

    fn entities(&self) -> &[Entity] {
        Pool::entities(self)
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        Pool::remove(self, entity).is_ok()
    }

    fn add_default(&mut self, entity: Entity) -> EcsResult<()> {
        let ctor = self
            .default_ctor
            .ok_or(EcsError::NoDefaultConstructor(std::any::type_name::<T>()))?;
        Pool::add(self, entity, ctor())
    }

    fn clear(&mut self) {
        Pool::clear(self)
    }
}
