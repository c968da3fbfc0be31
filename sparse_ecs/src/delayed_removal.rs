use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::{Component, ComponentType, EcsResult, Entity, Filter, System, World};

/// Asks [`DelayedRemoval`] to remove `component` from `entity` once its clock
/// reaches `at`.
///
/// The request is itself a component and may be attached to any entity,
/// usually a short-lived carrier. It is taken off the carrier as soon as the
/// system has queued it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoveRequest {
    pub component: ComponentType,
    pub entity: Entity,
    pub at: f32,
}

impl RemoveRequest {
    pub fn new<T: Component>(entity: Entity, at: f32) -> Self {
        Self {
            component: ComponentType::of::<T>(),
            entity,
            at,
        }
    }
}

impl Component for RemoveRequest {}

#[derive(Debug)]
struct Scheduled {
    request: RemoveRequest,
    seq: u64,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest request, oldest first on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .request
            .at
            .total_cmp(&self.request.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Removes components at a scheduled time.
///
/// The system owns a clock advanced by a fixed step at every execute, and a
/// queue of pending [`RemoveRequest`]s ordered by due time. Each frame it
/// queues the requests raised since the last frame, then removes every
/// queued component that is due. A component already gone by then is
/// silently skipped.
///
/// # Example
/// ```
/// use sparse_ecs::{Component, DelayedRemoval, RemoveRequest, Systems, World};
///
/// #[derive(Debug, Clone)]
/// struct Shielded;
/// impl Component for Shielded {}
///
/// let mut world = World::new();
/// let hero = world.spawn().add(Shielded)?.id();
///
/// let carrier = world.new_entity();
/// world.add_component(carrier, RemoveRequest::new::<Shielded>(hero, 2.0))?;
///
/// let mut systems = Systems::new();
/// systems.add(DelayedRemoval::new(1.0));
/// systems.init(&mut world)?;
///
/// systems.execute(&mut world)?;
/// assert!(world.has_component::<Shielded>(hero));
/// systems.execute(&mut world)?;
/// assert!(!world.has_component::<Shielded>(hero));
/// # Ok::<(), sparse_ecs::EcsError>(())
/// ```
#[derive(Debug)]
pub struct DelayedRemoval {
    clock: f32,
    step: f32,
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl DelayedRemoval {
    /// Creates the system with its clock at zero, advancing by `step` per
    /// frame.
    pub fn new(step: f32) -> Self {
        Self {
            clock: 0.0,
            step,
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Number of queued requests that are not due yet.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queues a request directly, without a carrier entity.
    pub fn schedule(&mut self, request: RemoveRequest) {
        trace!(
            entity = %request.entity,
            component = request.component.name(),
            at = request.at,
            "queued removal"
        );
        self.queue.push(Scheduled {
            request,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Removes every queued component due at or before the clock, earliest
    /// first.
    fn drain_due(&mut self, world: &mut World) {
        while let Some(next) = self.queue.peek() {
            if next.request.at > self.clock {
                break;
            }
            let Some(Scheduled { request, .. }) = self.queue.pop() else {
                break;
            };
            let removed = world.remove_component_of_if_present(request.entity, request.component);
            debug!(
                entity = %request.entity,
                component = request.component.name(),
                removed,
                "delayed removal due"
            );
        }
    }
}

impl System for DelayedRemoval {
    fn filter(&mut self, world: &World) -> Option<Filter> {
        Some(world.inc::<RemoveRequest>())
    }

    fn process(&mut self, world: &mut World, entity: Entity) -> EcsResult<()> {
        let request = world.remove_component::<RemoveRequest>(entity)?;
        self.schedule(request);
        Ok(())
    }

    fn execute(&mut self, world: &mut World) -> EcsResult<()> {
        self.clock += self.step;
        self.drain_due(world);
        Ok(())
    }
}
