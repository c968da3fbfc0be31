use std::{
    any::{Any, TypeId},
    collections::{BTreeMap, HashMap},
};

use crate::{entity::WorldId, pool::AnyPool, WorldConfig};

mod components;
mod entities;
mod entity_mut;
mod resources;
mod storage;

pub use entities::EntityCursor;
pub use entity_mut::EntityMut;

/// The registry owning every entity, component pool and resource.
///
/// Entity ids are allocated from a counter that is never rewound, pools are
/// created lazily the first time a component type is touched, and a live map
/// tracks how many components each entity holds. An entity stays alive until
/// it is destroyed or its last component is removed.
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
/// world.add_component(entity, Position { x: 10.0, y: 20.0 }).unwrap();
/// assert!(world.has_component::<Position>(entity));
///
/// world.destroy_entity(entity);
/// assert!(!world.has_component::<Position>(entity));
/// ```
pub struct World {
    id: WorldId,
    config: WorldConfig,
    next_entity_id: u64,
    component_counts: BTreeMap<u64, usize>,
    pools: HashMap<TypeId, Box<dyn AnyPool>>,
    resources: HashMap<TypeId, Box<dyn Any>>,
}

impl World {
    /// Creates a new empty World.
    ///
    /// # Example
    /// ```
    /// use sparse_ecs::World;
    ///
    /// let world = World::new();
    /// assert_eq!(world.entities_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            id: WorldId::next(),
            config,
            next_entity_id: 0,
            component_counts: BTreeMap::new(),
            pools: HashMap::new(),
            resources: HashMap::new(),
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
