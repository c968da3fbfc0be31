use std::any::TypeId;

use tracing::trace;

use crate::{pool::AnyPool, Component, ComponentType, EcsError, EcsResult, Pool};

use super::World;

impl World {
    /// Gets the pool for a component type, if it has been created.
    pub fn storage<T: Component>(&self) -> Option<&Pool<T>> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.as_any().downcast_ref::<Pool<T>>())
    }

    /// Gets the pool for a component type, creating it on first use.
    pub(crate) fn storage_mut<T: Component>(&mut self) -> &mut Pool<T> {
        let capacity = self.config.initial_pool_capacity;
        let pool = self.pools.entry(TypeId::of::<T>()).or_insert_with(|| {
            trace!(component = std::any::type_name::<T>(), "created pool");
            Box::new(Pool::<T>::with_capacity(capacity))
        });

        pool.as_any_mut()
            .downcast_mut::<Pool<T>>()
            .expect("pool registered under a foreign TypeId")
    }

    /// Creates the pool for `T` and records its default constructor, which
    /// makes `T` usable with [`World::add_default_of`].
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{Component, ComponentType, World};
    ///
    /// #[derive(Debug, Clone, Default, PartialEq)]
    /// struct Score { points: u32 }
    /// impl Component for Score {}
    ///
    /// let mut world = World::new();
    /// world.register::<Score>();
    ///
    /// let entity = world.new_entity();
    /// world.add_default_of(entity, ComponentType::of::<Score>()).unwrap();
    /// assert_eq!(world.get_component::<Score>(entity).unwrap().points, 0);
    /// ```
    pub fn register<T: Component + Default>(&mut self) {
        self.storage_mut::<T>().set_default_ctor(T::default);
    }

    pub(crate) fn pool_of(&self, type_id: TypeId) -> Option<&dyn AnyPool> {
        self.pools.get(&type_id).map(|pool| &**pool)
    }

    pub(crate) fn pool_of_mut(&mut self, type_id: TypeId) -> Option<&mut (dyn AnyPool + 'static)> {
        self.pools.get_mut(&type_id).map(|pool| &mut **pool)
    }

    /// Number of entities holding a `T`.
    pub fn count_components<T: Component>(&self) -> usize {
        self.count_components_of(ComponentType::of::<T>())
    }

    pub fn count_components_of(&self, component: ComponentType) -> usize {
        self.pool_of(component.type_id())
            .map_or(0, |pool| pool.count())
    }

    /// Reads the first `T` in the world.
    ///
    /// Meant for components kept as a single global instance; fails with
    /// [`EcsError::EmptySingleton`] when no entity holds one.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{Component, EcsError, World};
    ///
    /// #[derive(Debug, Clone)]
    /// struct Clock { now: f32 }
    /// impl Component for Clock {}
    ///
    /// let mut world = World::new();
    /// assert!(matches!(world.first_component::<Clock>(), Err(EcsError::EmptySingleton(_))));
    ///
    /// let holder = world.new_entity();
    /// world.add_component(holder, Clock { now: 0.0 }).unwrap();
    /// world.first_component_mut::<Clock>().unwrap().now += 1.5;
    /// assert_eq!(world.first_component::<Clock>().unwrap().now, 1.5);
    /// ```
    pub fn first_component<T: Component>(&self) -> EcsResult<&T> {
        self.storage::<T>()
            .and_then(|pool| pool.first())
            .ok_or(EcsError::EmptySingleton(std::any::type_name::<T>()))
    }

    pub fn first_component_mut<T: Component>(&mut self) -> EcsResult<&mut T> {
        self.pools
            .get_mut(&TypeId::of::<T>())
            .and_then(|pool| pool.as_any_mut().downcast_mut::<Pool<T>>())
            .and_then(|pool| pool.first_mut())
            .ok_or(EcsError::EmptySingleton(std::any::type_name::<T>()))
    }

    /// Removes every `T` in the world, updating the live-entity counts.
    ///
    /// Returns how many components were dropped.
    pub fn clear_components<T: Component>(&mut self) -> usize {
        self.clear_components_of(ComponentType::of::<T>())
    }

    pub fn clear_components_of(&mut self, component: ComponentType) -> usize {
        let holders = match self.pool_of_mut(component.type_id()) {
            Some(pool) => {
                let holders = pool.entities().to_vec();
                pool.clear();
                holders
            }
            None => return 0,
        };

        for &entity in &holders {
            self.dec_component_count(entity);
        }
        trace!(component = component.name(), count = holders.len(), "cleared pool");
        holders.len()
    }
}
