use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Identifies the [`World`](crate::World) an entity was created by.
///
/// Every world draws a fresh id on construction, so handles from two worlds
/// never compare equal even when their numeric ids coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(u32);

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(0);

impl WorldId {
    pub(crate) fn next() -> Self {
        WorldId(NEXT_WORLD_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque handle to an entity living in a [`World`](crate::World).
///
/// Entities carry no data of their own; components are attached through the
/// world that created them. Ids grow monotonically and are never reused, so a
/// handle to a destroyed entity simply stops matching anything.
///
/// # Examples
///
/// ```
/// use sparse_ecs::World;
///
/// let mut world = World::new();
/// let player = world.new_entity();
/// let monster = world.new_entity();
///
/// assert_ne!(player, monster);
/// assert_eq!(player, player);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    world: WorldId,
    id: u64,
}

impl Entity {
    pub(crate) fn new(world: WorldId, id: u64) -> Entity {
        Entity { world, id }
    }

    /// The numeric id of this entity inside its world.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The world this entity belongs to.
    pub fn world(&self) -> WorldId {
        self.world
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}@world{}", self.id, self.world)
    }
}
