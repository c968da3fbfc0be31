use crate::pool::DEFAULT_POOL_CAPACITY;

/// Tuning knobs for a [`World`](crate::World).
///
/// # Example
/// ```
/// use sparse_ecs::{World, WorldConfig};
///
/// let world = World::with_config(WorldConfig::default().with_initial_pool_capacity(1024));
/// assert_eq!(world.config().initial_pool_capacity, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    /// Dense capacity reserved by every pool when it is first created.
    pub initial_pool_capacity: usize,
}

impl WorldConfig {
    pub fn with_initial_pool_capacity(mut self, capacity: usize) -> Self {
        self.initial_pool_capacity = capacity;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

/// Behaviour switches for a [`Systems`](crate::Systems) collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemsConfig {
    /// Log the statistics map at `debug` level after every frame.
    pub log_statistics: bool,
}

impl SystemsConfig {
    pub fn with_log_statistics(mut self, enabled: bool) -> Self {
        self.log_statistics = enabled;
        self
    }
}
