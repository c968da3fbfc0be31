use sparse_ecs::{
    Component, DelayedRemoval, EcsError, EcsResult, Entity, Filter, RemoveRequest, System,
    Systems, SystemsConfig, World, TOTAL_STATISTIC,
};
use tracing::{debug, info};

const FRAMES: usize = 8;
const TICK_SECONDS: f32 = 1.0;

#[derive(Debug, Clone)]
struct Name(&'static str);
impl Component for Name {}

#[derive(Debug, Clone)]
struct Health {
    current: i32,
}
impl Component for Health {}

#[derive(Debug, Clone)]
struct Poisoned {
    per_tick: i32,
}
impl Component for Poisoned {}

#[derive(Debug, Clone)]
struct Damaged {
    target: Entity,
    amount: i32,
}
impl Component for Damaged {}

/// Turns every poisoned creature's tick into a damage event.
struct PoisonTick;

impl System for PoisonTick {
    fn filter(&mut self, world: &World) -> Option<Filter> {
        Some(world.inc::<Health>().inc::<Poisoned>())
    }

    fn process(&mut self, world: &mut World, entity: Entity) -> EcsResult<()> {
        let amount = world.get_component::<Poisoned>(entity)?.per_tick;
        world.spawn().add(Damaged {
            target: entity,
            amount,
        })?;
        Ok(())
    }
}

/// Applies the damage events raised this frame.
struct ApplyDamage;

impl System for ApplyDamage {
    fn filter(&mut self, world: &World) -> Option<Filter> {
        Some(world.inc::<Damaged>())
    }

    fn process(&mut self, world: &mut World, entity: Entity) -> EcsResult<()> {
        let event = world.get_component::<Damaged>(entity)?.clone();
        if let Ok(health) = world.get_component_mut::<Health>(event.target) {
            health.current -= event.amount;
            debug!(entity = %event.target, amount = event.amount, left = health.current, "damage");
        }
        Ok(())
    }
}

/// Removes creatures whose health ran out.
struct Graveyard;

impl System for Graveyard {
    fn filter(&mut self, world: &World) -> Option<Filter> {
        Some(world.inc::<Health>())
    }

    fn process(&mut self, world: &mut World, entity: Entity) -> EcsResult<()> {
        if world.get_component::<Health>(entity)?.current > 0 {
            return Ok(());
        }
        if let Ok(Name(name)) = world.get_component::<Name>(entity) {
            info!("{name} has died");
        }
        world.destroy_entity(entity);
        Ok(())
    }
}

fn populate(world: &mut World) -> EcsResult<()> {
    let creatures = [("rat", 6, 3, 2.0), ("goblin", 20, 2, 4.0), ("troll", 60, 5, 3.0)];

    for (name, health, per_tick, cured_at) in creatures {
        let creature = world
            .spawn()
            .add(Name(name))?
            .add(Health { current: health })?
            .add(Poisoned { per_tick })?
            .id();
        world
            .spawn()
            .add(RemoveRequest::new::<Poisoned>(creature, cured_at))?;
    }
    Ok(())
}

fn main() -> Result<(), EcsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut world = World::new();
    populate(&mut world)?;

    let mut systems = Systems::with_config(SystemsConfig::default().with_log_statistics(true));
    systems
        .add(PoisonTick)
        .add(ApplyDamage)
        .add(Graveyard)
        .add(DelayedRemoval::new(TICK_SECONDS))
        .del_here::<Damaged>();
    systems.init(&mut world)?;

    for frame in 1..=FRAMES {
        systems.execute(&mut world)?;
        info!(
            frame,
            entities = world.entities_count(),
            poisoned = world.count_components::<Poisoned>(),
            total_ms = systems.statistic(TOTAL_STATISTIC).unwrap_or_default(),
            "frame done"
        );
    }

    systems.teardown(&mut world)?;

    let mut statistics: Vec<_> = systems.statistics().iter().collect();
    statistics.sort_by(|a, b| a.0.cmp(b.0));
    for (name, elapsed) in statistics {
        info!("{name}: {elapsed:.3}ms");
    }

    let named = world.inc::<Name>();
    let mut survivors = named.cursor(&world);
    while let Some(entity) = survivors.next(&world) {
        if let (Ok(Name(name)), Ok(health)) = (
            world.get_component::<Name>(entity),
            world.get_component::<Health>(entity),
        ) {
            info!("{name} survived with {} health", health.current);
        }
    }

    Ok(())
}
