//! Play area and scene population.
//!
//! The first time a usable play area arrives the scene is populated with a
//! random number of bees and stars. Every later assignment re-places the
//! entities that already exist, keeping their identity and size.

use crate::components::*;
use crate::config::SimConfig;
use crate::events::{EventQueue, SimEvent};
use crate::systems::placement::{place, SimRng};
use bevy_ecs::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Extent of the bounded plane. Zero, negative or non-finite dimensions
/// mean the area is unset and nothing may be placed.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Set once the first usable play area has populated the scene. After that
/// an area change only re-places what exists, even if churn has emptied it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Populated(pub bool);

/// All live bees, in query order.
pub fn bee_entities(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<Bee>>();
    query.iter(world).collect()
}

/// All live stars, in query order.
pub fn star_entities(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<Star>>();
    query.iter(world).collect()
}

/// Populate an empty scene or re-lay out an existing one. Bees go first,
/// then stars. Does nothing while the play area is unset.
pub fn populate_or_relayout(world: &mut World) {
    if world.resource::<PlayArea>().is_empty() {
        return;
    }

    if !world.get_resource::<Populated>().is_some_and(|p| p.0) {
        spawn_initial_bees(world);
        spawn_initial_stars(world);
        world.insert_resource(Populated(true));
        return;
    }

    for bee in bee_entities(world) {
        relocate_bee(world, bee);
    }
    for star in star_entities(world) {
        relocate_star(world, star);
    }
}

fn spawn_initial_bees(world: &mut World) {
    let (count_range, side_range) = {
        let config = world.resource::<SimConfig>();
        (
            config.bee_count_min..=config.bee_count_max,
            config.bee_side_min..config.bee_side_max,
        )
    };
    let count = world.resource_mut::<SimRng>().0.gen_range(count_range);

    for _ in 0..count {
        let side = world.resource_mut::<SimRng>().0.gen_range(side_range.clone());
        let size = Size::square(side as f32);
        let position = place(world, size, None);
        let bee = world.spawn(BeeBundle::new(position, size)).id();
        world.resource_mut::<EventQueue>().push(SimEvent::BeeMoved {
            bee,
            x: position.x,
            y: position.y,
        });
    }

    tracing::debug!("Spawned {} initial bees", count);
}

fn spawn_initial_stars(world: &mut World) {
    let count_range = {
        let config = world.resource::<SimConfig>();
        config.initial_star_min..=config.initial_star_max
    };
    let count = world.resource_mut::<SimRng>().0.gen_range(count_range);

    for _ in 0..count {
        spawn_star(world);
    }

    tracing::debug!("Spawned {} initial stars", count);
}

/// Place and spawn one star, queuing its creation event.
pub fn spawn_star(world: &mut World) -> Entity {
    let size = world.resource::<SimConfig>().star_size;
    let position = place(world, size, None);
    let star = world.spawn(StarBundle::new(position, size)).id();
    world.resource_mut::<EventQueue>().push(SimEvent::StarChanged {
        star,
        x: position.x,
        y: position.y,
        removed: false,
    });
    star
}

/// Re-place an existing bee with its own size and queue the move.
pub fn relocate_bee(world: &mut World, bee: Entity) {
    let Some(size) = world.get::<Size>(bee).copied() else {
        return;
    };
    let position = place(world, size, Some(bee));
    if let Some(mut pos) = world.get_mut::<Position>(bee) {
        *pos = position;
    }
    world.resource_mut::<EventQueue>().push(SimEvent::BeeMoved {
        bee,
        x: position.x,
        y: position.y,
    });
}

/// Re-place an existing star and queue a non-removal change.
pub fn relocate_star(world: &mut World, star: Entity) {
    let Some(size) = world.get::<Size>(star).copied() else {
        return;
    };
    let position = place(world, size, Some(star));
    if let Some(mut pos) = world.get_mut::<Position>(star) {
        *pos = position;
    }
    world.resource_mut::<EventQueue>().push(SimEvent::StarChanged {
        star,
        x: position.x,
        y: position.y,
        removed: false,
    });
}
