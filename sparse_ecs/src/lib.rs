//! A small entity-component-system runtime built on sparse-set storage.
//!
//! Components of one type live packed in a [`Pool`]; the [`World`] owns the
//! pools and entity lifetimes, [`Filter`]s select entities by the components
//! they hold, and a [`Systems`] collection runs per-frame logic over filter
//! matches while timing every system.

pub mod component;
pub mod config;
pub mod delayed_removal;
pub mod entity;
pub mod error;
pub mod pool;
pub mod query;
pub mod system;
pub mod systems;
pub mod world;

// Re-export commonly used types
pub use component::{Component, ComponentType};
pub use config::{SystemsConfig, WorldConfig};
pub use delayed_removal::{DelayedRemoval, RemoveRequest};
pub use entity::{Entity, WorldId};
pub use error::{EcsError, EcsResult};
pub use pool::Pool;
pub use query::{ComponentCursor, Filter, FilterCursor, FilterIter};
pub use system::System;
pub use systems::{ClearComponents, Systems, TOTAL_STATISTIC};
pub use world::{EntityCursor, EntityMut, World};
