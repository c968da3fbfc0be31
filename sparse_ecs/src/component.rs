use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A marker trait for component types in the ECS system.
///
/// Components are plain values attached to entities, at most one per type
/// per entity. Each component type gets its own [`Pool`](crate::Pool) in the
/// world.
///
/// # Examples
///
/// ```
/// use sparse_ecs::Component;
///
/// #[derive(Debug, Clone, Default)]
/// struct Health {
///     current: u32,
///     max: u32,
/// }
///
/// impl Component for Health {}
/// ```
pub trait Component: 'static {}

/// A runtime handle naming a component type.
///
/// Generic systems use it to query and remove components whose type is only
/// known at runtime, e.g. a queued removal request.
///
/// [`World::add_default_of`](crate::World::add_default_of) needs a default
/// constructor, which `Component` does not require. Make a type
/// constructible by calling [`World::register`](crate::World::register) for
/// it first; otherwise the call fails with
/// [`EcsError::NoDefaultConstructor`](crate::EcsError::NoDefaultConstructor).
///
/// # Examples
///
/// ```
/// use sparse_ecs::{Component, ComponentType, World};
///
/// #[derive(Debug, Clone, Default)]
/// struct Frozen;
/// impl Component for Frozen {}
///
/// let mut world = World::new();
/// let entity = world.new_entity();
/// world.add_component(entity, Frozen).unwrap();
///
/// let frozen = ComponentType::of::<Frozen>();
/// assert!(world.has_component_of(entity, frozen));
///
/// world.remove_component_of(entity, frozen).unwrap();
/// assert!(!world.has_component_of(entity, frozen));
/// ```
#[derive(Clone, Copy)]
pub struct ComponentType {
    type_id: TypeId,
    name: &'static str,
}

impl ComponentType {
    /// Returns the handle for component type `T`.
    pub fn of<T: Component>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully-qualified type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentType").field(&self.name).finish()
    }
}
