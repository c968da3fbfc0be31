use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::{Component, EcsResult, Filter, System, SystemsConfig, World};

/// Statistic key holding the wall-clock time of a whole frame.
pub const TOTAL_STATISTIC: &str = "Total";

struct SystemEntry {
    system: Box<dyn System>,
    filter: Option<Filter>,
    elapsed: Duration,
}

/// An ordered collection of systems that drives their lifecycle and times
/// every frame.
///
/// Systems run in registration order. One call to [`Systems::execute`] runs
/// the `pre_process` hook of every system, then every system's `process` loop
/// over its bound filter, then every `execute` hook. Each system's time across
/// the three phases is published in milliseconds under its
/// [`System::name`], and the whole frame under [`TOTAL_STATISTIC`].
///
/// A `Systems` is itself a [`System`], so collections nest: a child
/// collection initialises with its parent and runs its whole frame during the
/// parent's execute phase.
///
/// # Example
/// ```
/// use sparse_ecs::{Component, EcsResult, System, Systems, World, TOTAL_STATISTIC};
///
/// #[derive(Debug, Clone)]
/// struct Hit { damage: u32 }
/// impl Component for Hit {}
///
/// struct Spawner;
/// impl System for Spawner {
///     fn pre_process(&mut self, world: &mut World) -> EcsResult<()> {
///         let e = world.new_entity();
///         world.add_component(e, Hit { damage: 3 })
///     }
/// }
///
/// let mut world = World::new();
/// let mut systems = Systems::new();
/// systems.add(Spawner).del_here::<Hit>();
///
/// systems.init(&mut world)?;
/// systems.execute(&mut world)?;
///
/// assert_eq!(world.count_components::<Hit>(), 0);
/// assert!(systems.statistic(TOTAL_STATISTIC).is_some());
/// # Ok::<(), sparse_ecs::EcsError>(())
/// ```
pub struct Systems {
    entries: Vec<SystemEntry>,
    statistics: HashMap<&'static str, f64>,
    config: SystemsConfig,
    initialized: bool,
}

impl Systems {
    pub fn new() -> Self {
        Self::with_config(SystemsConfig::default())
    }

    pub fn with_config(config: SystemsConfig) -> Self {
        Self {
            entries: Vec::new(),
            statistics: HashMap::new(),
            config,
            initialized: false,
        }
    }

    /// Appends a system. It runs after every system added before it.
    ///
    /// Systems added after [`Systems::init`] are not initialised and have no
    /// filter until `init` is called again.
    pub fn add<S: System + 'static>(&mut self, system: S) -> &mut Self {
        if self.initialized {
            warn!(
                system = system.name(),
                "system added after init, it stays unbound until the next init"
            );
        }
        self.entries.push(SystemEntry {
            system: Box::new(system),
            filter: None,
            elapsed: Duration::ZERO,
        });
        self
    }

    /// Appends a system clearing every `T` at the end of each frame.
    ///
    /// Use it for one-frame events that must be consumed within the frame
    /// they were raised in.
    pub fn del_here<T: Component>(&mut self) -> &mut Self {
        self.add(ClearComponents::<T>::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &SystemsConfig {
        &self.config
    }

    /// Milliseconds spent by each system during the last frame, plus
    /// [`TOTAL_STATISTIC`]. Systems sharing a name share an entry.
    pub fn statistics(&self) -> &HashMap<&'static str, f64> {
        &self.statistics
    }

    pub fn statistic(&self, name: &str) -> Option<f64> {
        self.statistics.get(name).copied()
    }

    /// Runs every system's `init`, then binds every system's filter.
    ///
    /// Calling it again re-binds the filters and resets the statistics.
    pub fn init(&mut self, world: &mut World) -> EcsResult<()> {
        for entry in &mut self.entries {
            trace!(system = entry.system.name(), "init");
            entry.system.init(world)?;
        }
        for entry in &mut self.entries {
            entry.filter = entry.system.filter(world);
        }

        self.statistics.clear();
        for entry in &self.entries {
            self.statistics.insert(entry.system.name(), 0.0);
        }
        self.statistics.insert(TOTAL_STATISTIC, 0.0);

        self.initialized = true;
        debug!(systems = self.entries.len(), "systems initialized");
        Ok(())
    }

    /// Runs one frame. The first failing hook aborts the frame and its error
    /// is returned; statistics are then left as of the previous frame.
    pub fn execute(&mut self, world: &mut World) -> EcsResult<()> {
        if !self.initialized {
            warn!("executing systems that were never initialized");
        }
        let frame_started = Instant::now();

        for entry in &mut self.entries {
            let started = Instant::now();
            entry.system.pre_process(world)?;
            entry.elapsed = started.elapsed();
        }

        for entry in &mut self.entries {
            let SystemEntry {
                system,
                filter,
                elapsed,
            } = entry;
            let Some(filter) = filter.as_ref() else {
                continue;
            };

            let started = Instant::now();
            let mut cursor = filter.cursor(world);
            while let Some(entity) = cursor.next(world) {
                system.process(world, entity)?;
            }
            *elapsed += started.elapsed();
        }

        for entry in &mut self.entries {
            let started = Instant::now();
            entry.system.execute(world)?;
            entry.elapsed += started.elapsed();
        }

        self.record_statistics(frame_started.elapsed());
        Ok(())
    }

    /// Runs every system's `teardown` in registration order.
    pub fn teardown(&mut self, world: &mut World) -> EcsResult<()> {
        for entry in &mut self.entries {
            trace!(system = entry.system.name(), "teardown");
            entry.system.teardown(world)?;
        }
        self.initialized = false;
        debug!(systems = self.entries.len(), "systems torn down");
        Ok(())
    }

    fn record_statistics(&mut self, total: Duration) {
        for value in self.statistics.values_mut() {
            *value = 0.0;
        }
        for entry in &self.entries {
            *self.statistics.entry(entry.system.name()).or_insert(0.0) += as_millis(entry.elapsed);
        }
        self.statistics.insert(TOTAL_STATISTIC, as_millis(total));

        if self.config.log_statistics {
            debug!(statistics = ?self.statistics, "frame statistics");
        }
    }
}

impl Default for Systems {
    fn default() -> Self {
        Self::new()
    }
}

impl System for Systems {
    fn init(&mut self, world: &mut World) -> EcsResult<()> {
        Systems::init(self, world)
    }

    fn execute(&mut self, world: &mut World) -> EcsResult<()> {
        Systems::execute(self, world)
    }

    fn teardown(&mut self, world: &mut World) -> EcsResult<()> {
        Systems::teardown(self, world)
    }
}

fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Clears every `T` in the world during the execute phase.
///
/// Added through [`Systems::del_here`].
pub struct ClearComponents<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ClearComponents<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ClearComponents<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> System for ClearComponents<T> {
    fn execute(&mut self, world: &mut World) -> EcsResult<()> {
        let cleared = world.clear_components::<T>();
        if cleared > 0 {
            trace!(component = std::any::type_name::<T>(), cleared, "cleared one-frame components");
        }
        Ok(())
    }
}
