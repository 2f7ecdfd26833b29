//! Star churn - each tick either adds a star or removes one.
//!
//! At or below the floor a star is always added. At the ceiling one is always
//! removed. In between a fair coin decides.

use crate::components::Position;
use crate::config::SimConfig;
use crate::events::{EventQueue, SimEvent};
use crate::systems::placement::SimRng;
use crate::systems::population::{spawn_star, star_entities};
use bevy_ecs::prelude::*;
use rand::Rng;

/// What one churn step decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChurnAction {
    Create,
    Remove,
}

/// Decide the churn action for `count` live stars. The coin is only drawn
/// when neither bound forces the outcome.
pub fn choose_churn_action<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    floor: usize,
    ceiling: usize,
) -> ChurnAction {
    if count <= floor {
        ChurnAction::Create
    } else if count < ceiling && rng.gen_bool(0.5) {
        ChurnAction::Create
    } else {
        ChurnAction::Remove
    }
}

/// Exclusive system applying one churn step.
pub fn star_churn_system(world: &mut World) {
    let stars = star_entities(world);
    let (floor, ceiling) = {
        let config = world.resource::<SimConfig>();
        (config.star_floor, config.star_ceiling)
    };

    let action = {
        let mut rng = world.resource_mut::<SimRng>();
        choose_churn_action(&mut rng.0, stars.len(), floor, ceiling)
    };

    match action {
        ChurnAction::Create => {
            spawn_star(world);
        }
        ChurnAction::Remove => {
            let index = world.resource_mut::<SimRng>().0.gen_range(0..stars.len());
            remove_star(world, stars[index]);
        }
    }
}

/// Despawn a star and queue its removal. The handle is never reused by the
/// scene.
pub fn remove_star(world: &mut World, star: Entity) {
    let last = world.get::<Position>(star).copied().unwrap_or_default();
    if !world.despawn(star) {
        return;
    }
    world.resource_mut::<EventQueue>().push(SimEvent::StarChanged {
        star,
        x: last.x,
        y: last.y,
        removed: true,
    });
}
