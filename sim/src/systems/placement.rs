//! Non-overlapping placement search.
//!
//! A bounded random-retry search: draw candidate top-left corners inside the
//! play area and accept the first one whose rectangle touches nothing else.
//! After `max_placement_attempts` misses the last candidate is accepted anyway,
//! so placement always terminates even when the scene is crowded.

use crate::components::{Position, Rect, Size};
use crate::config::SimConfig;
use crate::systems::population::PlayArea;
use bevy_ecs::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The simulation's single random source.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    /// Seeded when a seed is given, otherwise from OS entropy.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }
}

/// Running counters over every placement the engine has made.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub placements: u64,
    /// Placements that exhausted the search and accepted an overlap.
    pub fallbacks: u64,
    /// Candidates drawn by the most recent placement.
    pub last_attempts: u32,
}

/// Result of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Position,
    pub attempts: u32,
    /// True when no free spot was found and the last candidate was taken.
    pub fell_back: bool,
}

/// Draw an integer coordinate in `[0, extent - margin)`, or 0 when that span
/// is empty.
fn random_origin<R: Rng + ?Sized>(rng: &mut R, extent: f32, margin: f32) -> f32 {
    let span = (extent - margin).floor() as i64;
    if span <= 0 {
        0.0
    } else {
        rng.gen_range(0..span) as f32
    }
}

/// Search for a top-left corner where a rectangle of `size` overlaps none of
/// `obstacles`.
///
/// Candidate origins are bounded by `area` minus `margin` (the star size), for
/// every entity kind. A bee wider than the margin can therefore extend past
/// the right or bottom edge.
pub fn find_non_overlapping_point<R: Rng + ?Sized>(
    rng: &mut R,
    area: PlayArea,
    margin: Size,
    size: Size,
    obstacles: &[Rect],
    max_attempts: u32,
) -> Placement {
    let max_attempts = max_attempts.max(1);
    let mut candidate = Position::default();

    for attempt in 1..=max_attempts {
        candidate = Position::new(
            random_origin(rng, area.width, margin.width),
            random_origin(rng, area.height, margin.height),
        );
        let rect = Rect::from_parts(candidate, size);
        if !obstacles.iter().any(|other| rect.overlaps(other)) {
            return Placement {
                position: candidate,
                attempts: attempt,
                fell_back: false,
            };
        }
    }

    Placement {
        position: candidate,
        attempts: max_attempts,
        fell_back: true,
    }
}

/// Bounding rectangles of every live bee and star, skipping `exclude`.
pub fn collect_obstacles(world: &mut World, exclude: Option<Entity>) -> Vec<Rect> {
    let mut query = world.query::<(Entity, &Position, &Size)>();
    query
        .iter(world)
        .filter(|(entity, _, _)| Some(*entity) != exclude)
        .map(|(_, pos, size)| Rect::from_parts(*pos, *size))
        .collect()
}

/// Run the search against the current scene and record the outcome.
///
/// Does not move anything; the caller applies the returned position.
pub fn place(world: &mut World, size: Size, exclude: Option<Entity>) -> Position {
    let obstacles = collect_obstacles(world, exclude);
    let area = *world.resource::<PlayArea>();
    let (margin, max_attempts) = {
        let config = world.resource::<SimConfig>();
        (config.star_size, config.max_placement_attempts)
    };

    let placement = {
        let mut rng = world.resource_mut::<SimRng>();
        find_non_overlapping_point(&mut rng.0, area, margin, size, &obstacles, max_attempts)
    };

    let mut stats = world.resource_mut::<PlacementStats>();
    stats.placements += 1;
    stats.last_attempts = placement.attempts;
    if placement.fell_back {
        stats.fallbacks += 1;
        tracing::debug!(
            "Placement of {}x{} fell back after {} attempts against {} obstacles",
            size.width,
            size.height,
            placement.attempts,
            obstacles.len()
        );
    }

    placement.position
}
