use std::any::{Any, TypeId};

use tracing::trace;

use super::World;

impl World {
    /// Inserts or replaces a global resource, returning the previous value.
    ///
    /// Resources hold world-wide state that belongs to no entity, such as a
    /// frame clock or configuration. They do not count toward entity
    /// liveness and are never visited by filters.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::World;
    ///
    /// struct GameTime { delta: f32 }
    ///
    /// let mut world = World::new();
    /// assert!(world.insert_resource(GameTime { delta: 0.016 }).is_none());
    /// let previous = world.insert_resource(GameTime { delta: 0.033 });
    /// assert_eq!(previous.unwrap().delta, 0.016);
    /// ```
    pub fn insert_resource<T: 'static>(&mut self, resource: T) -> Option<T> {
        trace!(resource = std::any::type_name::<T>(), "inserted resource");
        self.resources
            .insert(TypeId::of::<T>(), Box::new(resource))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Gets a global resource, or `None` if it was never inserted.
    pub fn get_resource<T: 'static>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|resource| resource.downcast_ref::<T>())
    }

    /// Gets a mutable reference to a global resource.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::World;
    ///
    /// struct Score(u32);
    ///
    /// let mut world = World::new();
    /// world.insert_resource(Score(10));
    /// if let Some(score) = world.get_resource_mut::<Score>() {
    ///     score.0 += 5;
    /// }
    /// assert_eq!(world.get_resource::<Score>().unwrap().0, 15);
    /// ```
    pub fn get_resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|resource| resource.downcast_mut::<T>())
    }

    /// Removes a global resource and returns its value.
    pub fn remove_resource<T: 'static>(&mut self) -> Option<T> {
        let resource: Box<dyn Any> = self.resources.remove(&TypeId::of::<T>())?;
        resource.downcast::<T>().ok().map(|resource| *resource)
    }

    pub fn has_resource<T: 'static>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }
}
