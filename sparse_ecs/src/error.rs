use crate::Entity;

/// Errors raised by world, pool and scheduler operations.
///
/// Every variant describes a programmer error: the guarded variants
/// (`set_component`, `remove_component_if_present`, `destroy_entity`, ...)
/// exist for callers that expect absence and never produce these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    #[error("component {component} not found on {entity}")]
    ComponentNotFound {
        entity: Entity,
        component: &'static str,
    },

    #[error("component {component} is already attached to {entity}")]
    ComponentAlreadyExists {
        entity: Entity,
        component: &'static str,
    },

    #[error("{0} is not alive")]
    EntityNotAlive(Entity),

    #[error("{0} belongs to another world")]
    ForeignEntity(Entity),

    /// `first_component` was called while no entity holds the component.
    #[error("no {0} component in the world")]
    EmptySingleton(&'static str),

    #[error("component {0} has no registered default constructor")]
    NoDefaultConstructor(&'static str),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
