use std::any::TypeId;

use tracing::warn;

use crate::{entity::WorldId, Component, ComponentType, Entity, World};

/// An inclusion/exclusion predicate over component types, bound to a world.
///
/// An entity satisfies the filter when it holds every included type and none
/// of the excluded ones. Builder order does not matter, and a type listed on
/// both sides simply makes the filter unsatisfiable.
///
/// Enumeration is driven by the smallest included pool, so its cost is
/// bounded by the rarest required component rather than the world size.
///
/// # Basic Usage
/// ```
/// use sparse_ecs::{Component, Filter, World};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Position { x: f32, y: f32 }
/// impl Component for Position {}
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Velocity { x: f32, y: f32 }
/// impl Component for Velocity {}
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Dead;
/// impl Component for Dead {}
///
/// let mut world = World::new();
/// let moving = world.new_entity();
/// world.add_component(moving, Position { x: 0.0, y: 0.0 }).unwrap();
/// world.add_component(moving, Velocity { x: 1.0, y: 0.0 }).unwrap();
/// let corpse = world.new_entity();
/// world.add_component(corpse, Position { x: 5.0, y: 5.0 }).unwrap();
/// world.add_component(corpse, Velocity { x: 0.0, y: 0.0 }).unwrap();
/// world.add_component(corpse, Dead).unwrap();
///
/// let movers = world.inc::<Position>().inc::<Velocity>().exc::<Dead>();
/// let matched: Vec<_> = movers.iter(&world).collect();
/// assert_eq!(matched, vec![moving]);
/// ```
///
/// # Mutating while iterating
/// ```
/// use sparse_ecs::{Component, World};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Poisoned { ticks: u32 }
/// impl Component for Poisoned {}
///
/// let mut world = World::new();
/// for ticks in 1..=4 {
///     let e = world.new_entity();
///     world.add_component(e, Poisoned { ticks }).unwrap();
/// }
///
/// let poisoned = world.inc::<Poisoned>();
/// let mut cursor = poisoned.cursor(&world);
/// while let Some(entity) = cursor.next(&world) {
///     let status = world.get_component_mut::<Poisoned>(entity).unwrap();
///     status.ticks -= 1;
///     if status.ticks == 0 {
///         world.remove_component::<Poisoned>(entity).unwrap();
///     }
/// }
/// assert_eq!(world.count_components::<Poisoned>(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    world: WorldId,
    included: Vec<ComponentType>,
    excluded: Vec<ComponentType>,
}

impl Filter {
    /// Creates a filter bound to `world` with no constraints.
    ///
    /// A filter without included types enumerates nothing; start from
    /// [`World::inc`] in the usual case.
    pub fn new(world: &World) -> Self {
        Self {
            world: world.id(),
            included: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Requires `T` to be present.
    pub fn inc<T: Component>(self) -> Self {
        self.inc_of(ComponentType::of::<T>())
    }

    /// Requires `T` to be absent.
    pub fn exc<T: Component>(self) -> Self {
        self.exc_of(ComponentType::of::<T>())
    }

    pub fn inc_of(mut self, component: ComponentType) -> Self {
        if !self.included.contains(&component) {
            self.included.push(component);
        }
        self
    }

    pub fn exc_of(mut self, component: ComponentType) -> Self {
        if !self.excluded.contains(&component) {
            self.excluded.push(component);
        }
        self
    }

    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn included(&self) -> &[ComponentType] {
        &self.included
    }

    pub fn excluded(&self) -> &[ComponentType] {
        &self.excluded
    }

    /// Checks one entity against the filter.
    pub fn satisfy(&self, world: &World, entity: Entity) -> bool {
        entity.world() == self.world
            && self
                .included
                .iter()
                .all(|&component| world.has_component_of(entity, component))
            && !self
                .excluded
                .iter()
                .any(|&component| world.has_component_of(entity, component))
    }

    /// Plans an enumeration and returns a cursor over the matches.
    ///
    /// The driving pool is chosen now, from the pool sizes at this moment.
    pub fn cursor(&self, world: &World) -> FilterCursor<'_> {
        FilterCursor {
            filter: self,
            inner: ComponentCursor::new(self.driving_pool(world)),
        }
    }

    /// Borrowing iterator over the matches.
    pub fn iter<'w>(&'w self, world: &'w World) -> FilterIter<'w> {
        FilterIter {
            cursor: self.cursor(world),
            world,
        }
    }

    pub fn count(&self, world: &World) -> usize {
        self.iter(world).count()
    }

    /// Smallest included pool, first one on ties. `None` when nothing can
    /// match: no included types, an empty included pool, or a foreign world.
    fn driving_pool(&self, world: &World) -> Option<TypeId> {
        if world.id() != self.world {
            warn!(
                filter_world = %self.world,
                world = %world.id(),
                "filter used against a world it was not built for"
            );
            return None;
        }

        let mut best: Option<(TypeId, usize)> = None;
        for component in &self.included {
            let count = world.count_components_of(*component);
            if count == 0 {
                return None;
            }
            if best.map_or(true, |(_, min)| count < min) {
                best = Some((component.type_id(), count));
            }
        }
        best.map(|(type_id, _)| type_id)
    }
}

/// Cursor over one pool's dense order that tolerates structural changes
/// between steps.
///
/// It remembers the last entity it yielded. If that entity still sits at
/// the current slot the cursor moves on; otherwise the slot was refilled by a
/// swap-remove and the newcomer is yielded next. Every entity present when
/// the walk reaches it is visited once, including ones moved into the
/// current slot. An entity moved below the cursor by a removal at an earlier
/// slot is not revisited.
#[derive(Debug, Clone)]
pub struct ComponentCursor {
    driver: Option<TypeId>,
    index: usize,
    last: Option<Entity>,
}

impl ComponentCursor {
    fn new(driver: Option<TypeId>) -> Self {
        Self {
            driver,
            index: 0,
            last: None,
        }
    }

    pub fn next(&mut self, world: &World) -> Option<Entity> {
        let pool = world.pool_of(self.driver?)?;

        if let Some(last) = self.last {
            if pool.entity_at(self.index) == Some(last) {
                self.index += 1;
            }
        }

        let entity = pool.entity_at(self.index)?;
        self.last = Some(entity);
        Some(entity)
    }
}

/// Cursor over the entities matching a [`Filter`].
///
/// Like [`ComponentCursor`] it holds no borrow of the world, which may be
/// mutated between calls to [`FilterCursor::next`].
#[derive(Debug, Clone)]
pub struct FilterCursor<'f> {
    filter: &'f Filter,
    inner: ComponentCursor,
}

impl FilterCursor<'_> {
    pub fn next(&mut self, world: &World) -> Option<Entity> {
        loop {
            let entity = self.inner.next(world)?;
            if self.filter.satisfy(world, entity) {
                return Some(entity);
            }
        }
    }
}

/// Iterator over the entities matching a [`Filter`], borrowing the world.
pub struct FilterIter<'w> {
    cursor: FilterCursor<'w>,
    world: &'w World,
}

impl Iterator for FilterIter<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        self.cursor.next(self.world)
    }
}

impl World {
    /// Starts a filter requiring `T`.
    pub fn inc<T: Component>(&self) -> Filter {
        Filter::new(self).inc::<T>()
    }

    /// Walks every entity holding `T`, in the pool's dense order.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::{Component, World};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Coins(u32);
    /// impl Component for Coins {}
    ///
    /// let mut world = World::new();
    /// for amount in [5, 10, 20] {
    ///     let e = world.new_entity();
    ///     world.add_component(e, Coins(amount)).unwrap();
    /// }
    ///
    /// let mut total = 0;
    /// let mut cursor = world.each::<Coins>();
    /// while let Some(entity) = cursor.next(&world) {
    ///     total += world.get_component::<Coins>(entity).unwrap().0;
    /// }
    /// assert_eq!(total, 35);
    /// ```
    pub fn each<T: Component>(&self) -> ComponentCursor {
        self.each_of(ComponentType::of::<T>())
    }

    pub fn each_of(&self, component: ComponentType) -> ComponentCursor {
        ComponentCursor::new(Some(component.type_id()))
    }
}
