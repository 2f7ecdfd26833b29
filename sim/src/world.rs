//! Scene snapshot types.
//!
//! The `Snapshot` struct provides a serializable view of the scene that a
//! rendering host can consume without touching the ECS world.

use crate::components::*;
use crate::systems::population::PlayArea;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a single bee or star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Stable handle (`Entity::to_bits`).
    pub id: u64,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl EntitySnapshot {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Complete scene state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks run so far.
    pub tick: u64,
    /// Current play area; zero-sized when unset.
    pub area: PlayArea,
    pub bees: Vec<EntitySnapshot>,
    pub stars: Vec<EntitySnapshot>,
}

impl Snapshot {
    /// Create a snapshot from the ECS world.
    pub fn from_world(world: &mut World, tick: u64) -> Self {
        let area = world.get_resource::<PlayArea>().copied().unwrap_or_default();

        let mut bee_query = world.query_filtered::<(Entity, &Position, &Size), With<Bee>>();
        let bees = bee_query
            .iter(world)
            .map(|(entity, pos, size)| entity_snapshot(entity, EntityKind::Bee, pos, size))
            .collect();

        let mut star_query = world.query_filtered::<(Entity, &Position, &Size), With<Star>>();
        let stars = star_query
            .iter(world)
            .map(|(entity, pos, size)| entity_snapshot(entity, EntityKind::Star, pos, size))
            .collect();

        Self {
            tick,
            area,
            bees,
            stars,
        }
    }

    /// Bees then stars.
    pub fn entities(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.bees.iter().chain(self.stars.iter())
    }

    /// Id pairs whose rectangles overlap.
    pub fn overlapping_pairs(&self) -> Vec<(u64, u64)> {
        let all: Vec<&EntitySnapshot> = self.entities().collect();
        let mut pairs = Vec::new();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                if a.rect().overlaps(&b.rect()) {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }

    /// Serialize snapshot to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize snapshot to pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

fn entity_snapshot(entity: Entity, kind: EntityKind, pos: &Position, size: &Size) -> EntitySnapshot {
    EntitySnapshot {
        id: entity.to_bits(),
        kind,
        x: pos.x,
        y: pos.y,
        width: size.width,
        height: size.height,
    }
}
