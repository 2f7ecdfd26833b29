//! Host Bridge
//!
//! Converts scene state and notifications into flat `f32` buffers for hosts
//! (renderers, scripting layers) that read contiguous arrays across an FFI
//! seam instead of JSON.
//!
//! # Scene Buffer Layout (Version 1.0)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ HEADER (SCENE_HEADER_SIZE elements)                             │
//! │ [0] bee_count   [1] star_count                                  │
//! │ [2] area_width  [3] area_height   (0.0 when unset)              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ ENTITIES ((bee_count + star_count) × ENTITY_STRIDE)             │
//! │ Bees first, then stars. For entity i                            │
//! │ (offset = SCENE_HEADER_SIZE + i * ENTITY_STRIDE):               │
//! │   [+0] index   - Entity index (u32 as f32)                      │
//! │   [+1] kind    - KIND_BEE or KIND_STAR                          │
//! │   [+2] x       [+3] y       - top-left corner                   │
//! │   [+4] width   [+5] height                                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Event Buffer Layout
//!
//! `[0] event_count`, then `EVENT_STRIDE` values per event:
//! `[+0] event type, [+1] entity index, [+2] x, [+3] y`.
//!
//! Both buffers write `Entity::index`, the slot part of the handle only. Stars are never
//! reused by the scene, but a host that keeps handles across removals should
//! key on the full `u64` from the JSON snapshot instead.

use crate::components::EntityKind;
use crate::events::SimEvent;
use crate::world::{EntitySnapshot, Snapshot};
use bevy_ecs::entity::Entity;

// ============================================================================
// CONSTANTS - STABLE FFI CONTRACT
// ============================================================================

/// Number of f32 values in the scene buffer header.
pub const SCENE_HEADER_SIZE: usize = 4;

/// Number of f32 values per entity in the scene buffer.
pub const ENTITY_STRIDE: usize = 6;

/// Number of f32 values in the event buffer header.
pub const EVENT_HEADER_SIZE: usize = 1;

/// Number of f32 values per event.
pub const EVENT_STRIDE: usize = 4;

/// Entity kind: bee
pub const KIND_BEE: f32 = 0.0;
/// Entity kind: star
pub const KIND_STAR: f32 = 1.0;

/// Event type: a bee was placed or moved
pub const EVENT_BEE_MOVED: f32 = 0.0;
/// Event type: a star was created or relocated
pub const EVENT_STAR_CHANGED: f32 = 1.0;
/// Event type: a star was removed
pub const EVENT_STAR_REMOVED: f32 = 2.0;

/// Offset within entity data for: entity index
pub const FIELD_INDEX: usize = 0;
/// Offset within entity data for: kind
pub const FIELD_KIND: usize = 1;
/// Offset within entity data for: X position
pub const FIELD_X: usize = 2;
/// Offset within entity data for: Y position
pub const FIELD_Y: usize = 3;
/// Offset within entity data for: width
pub const FIELD_WIDTH: usize = 4;
/// Offset within entity data for: height
pub const FIELD_HEIGHT: usize = 5;

#[inline]
pub fn kind_to_id(kind: EntityKind) -> f32 {
    match kind {
        EntityKind::Bee => KIND_BEE,
        EntityKind::Star => KIND_STAR,
    }
}

/// Slot index of a handle produced by `Entity::to_bits`, matching
/// `Entity::index` as written into the event buffer. Ids that are not valid
/// handles keep their low 32 bits.
#[inline]
fn index_of(id: u64) -> f32 {
    Entity::try_from_bits(id).map_or(id as u32, |entity| entity.index()) as f32
}

// ============================================================================
// SERIALIZATION
// ============================================================================

/// Convert a scene snapshot to a flat buffer.
///
/// Deterministic: the same `Snapshot` always produces the same buffer.
pub fn snapshot_to_flat_buffer(snapshot: &Snapshot) -> Vec<f32> {
    let count = snapshot.bees.len() + snapshot.stars.len();
    let buffer_size = scene_buffer_size(count);
    let mut buffer = Vec::with_capacity(buffer_size);

    buffer.push(snapshot.bees.len() as f32);
    buffer.push(snapshot.stars.len() as f32);
    if snapshot.area.is_empty() {
        buffer.push(0.0);
        buffer.push(0.0);
    } else {
        buffer.push(snapshot.area.width);
        buffer.push(snapshot.area.height);
    }

    for entity in snapshot.entities() {
        push_entity(&mut buffer, entity);
    }

    debug_assert_eq!(buffer.len(), buffer_size, "Buffer size mismatch");
    buffer
}

fn push_entity(buffer: &mut Vec<f32>, entity: &EntitySnapshot) {
    buffer.push(index_of(entity.id));
    buffer.push(kind_to_id(entity.kind));
    buffer.push(entity.x);
    buffer.push(entity.y);
    buffer.push(entity.width);
    buffer.push(entity.height);
}

/// Convert a batch of notifications to a flat buffer, preserving order.
pub fn events_to_flat_buffer(events: &[SimEvent]) -> Vec<f32> {
    let mut buffer = Vec::with_capacity(EVENT_HEADER_SIZE + events.len() * EVENT_STRIDE);
    buffer.push(events.len() as f32);

    for event in events {
        let (event_type, x, y) = match *event {
            SimEvent::BeeMoved { x, y, .. } => (EVENT_BEE_MOVED, x, y),
            SimEvent::StarChanged { x, y, removed: false, .. } => (EVENT_STAR_CHANGED, x, y),
            SimEvent::StarChanged { x, y, removed: true, .. } => (EVENT_STAR_REMOVED, x, y),
        };
        buffer.push(event_type);
        buffer.push(event.entity().index() as f32);
        buffer.push(x);
        buffer.push(y);
    }

    buffer
}

/// `SCENE_HEADER_SIZE + entity_count * ENTITY_STRIDE`
#[inline]
pub fn scene_buffer_size(entity_count: usize) -> usize {
    SCENE_HEADER_SIZE + entity_count * ENTITY_STRIDE
}

/// Parse `(bee_count, star_count)` from a scene buffer.
///
/// Returns `None` if the header is truncated.
#[inline]
pub fn parse_counts(buffer: &[f32]) -> Option<(usize, usize)> {
    if buffer.len() < SCENE_HEADER_SIZE {
        return None;
    }
    Some((buffer[0] as usize, buffer[1] as usize))
}

/// Buffer offset for the entity at `index` (bees first, then stars).
#[inline]
pub const fn entity_offset(index: usize) -> usize {
    SCENE_HEADER_SIZE + index * ENTITY_STRIDE
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SimWorld;
    use crate::components::{BeeBundle, Position, Size};
    use crate::config::SimConfig;

    #[test]
    fn test_unset_scene_is_header_only() {
        let mut sim = SimWorld::new();
        let buffer = snapshot_to_flat_buffer(&sim.snapshot());
        assert_eq!(buffer, vec![0.0, 0.0, 0.0, 0.0]);
        assert_eq!(parse_counts(&buffer), Some((0, 0)));
    }

    #[test]
    fn test_scene_buffer_matches_snapshot() {
        let mut sim = SimWorld::seeded(5);
        sim.set_play_area(1000.0, 800.0);
        let snapshot = sim.snapshot();
        let buffer = snapshot_to_flat_buffer(&snapshot);

        let (bees, stars) = parse_counts(&buffer).unwrap();
        assert_eq!(bees, snapshot.bees.len());
        assert_eq!(stars, snapshot.stars.len());
        assert_eq!(buffer.len(), scene_buffer_size(bees + stars));
        assert_eq!(buffer[2], 1000.0);
        assert_eq!(buffer[3], 800.0);

        let first_bee = entity_offset(0);
        assert_eq!(buffer[first_bee + FIELD_KIND], KIND_BEE);
        assert_eq!(buffer[first_bee + FIELD_X], snapshot.bees[0].x);
        assert_eq!(buffer[first_bee + FIELD_WIDTH], snapshot.bees[0].width);

        let first_star = entity_offset(bees);
        assert_eq!(buffer[first_star + FIELD_KIND], KIND_STAR);
        assert_eq!(buffer[first_star + FIELD_Y], snapshot.stars[0].y);
        assert_eq!(buffer[first_star + FIELD_HEIGHT], 100.0);
    }

    #[test]
    fn test_scene_buffer_determinism() {
        let mut a = SimWorld::with_config(SimConfig::seeded(99)).unwrap();
        let mut b = SimWorld::with_config(SimConfig::seeded(99)).unwrap();
        for sim in [&mut a, &mut b] {
            sim.set_play_area(1200.0, 900.0);
            for _ in 0..10 {
                sim.update();
            }
        }
        assert_eq!(
            snapshot_to_flat_buffer(&a.snapshot()),
            snapshot_to_flat_buffer(&b.snapshot())
        );
    }

    #[test]
    fn test_event_buffer_layout() {
        let bee = Entity::from_raw(4);
        let star = Entity::from_raw(9);
        let events = [
            SimEvent::BeeMoved { bee, x: 1.0, y: 2.0 },
            SimEvent::StarChanged { star, x: 3.0, y: 4.0, removed: false },
            SimEvent::StarChanged { star, x: 3.0, y: 4.0, removed: true },
        ];
        let buffer = events_to_flat_buffer(&events);
        assert_eq!(buffer.len(), EVENT_HEADER_SIZE + 3 * EVENT_STRIDE);
        assert_eq!(buffer[0], 3.0);
        assert_eq!(&buffer[1..5], &[EVENT_BEE_MOVED, 4.0, 1.0, 2.0]);
        assert_eq!(&buffer[5..9], &[EVENT_STAR_CHANGED, 9.0, 3.0, 4.0]);
        assert_eq!(&buffer[9..13], &[EVENT_STAR_REMOVED, 9.0, 3.0, 4.0]);
    }

    #[test]
    fn test_scene_and_event_buffers_agree_on_index() {
        let mut sim = SimWorld::seeded(17);
        sim.set_retain_events(true);
        sim.set_play_area(1000.0, 800.0);
        let events = sim.drain_events();
        let scene = snapshot_to_flat_buffer(&sim.snapshot());
        let event_buffer = events_to_flat_buffer(&events);

        let (bees, stars) = parse_counts(&scene).unwrap();
        let mut scene_indices: Vec<f32> = (0..bees + stars)
            .map(|i| scene[entity_offset(i) + FIELD_INDEX])
            .collect();
        let mut event_indices: Vec<f32> = (0..events.len())
            .map(|i| event_buffer[EVENT_HEADER_SIZE + i * EVENT_STRIDE + 1])
            .collect();
        scene_indices.sort_by(f32::total_cmp);
        event_indices.sort_by(f32::total_cmp);
        assert_eq!(scene_indices, event_indices);
    }

    #[test]
    fn test_reused_slot_writes_index_not_bits() {
        let mut world = bevy_ecs::world::World::new();
        let first = world.spawn_empty().id();
        world.despawn(first);
        let bee = world
            .spawn(BeeBundle::new(Position::new(0.0, 0.0), Size::square(40.0)))
            .id();
        assert_eq!(bee.index(), first.index());
        assert_ne!(bee.to_bits(), first.to_bits());

        let scene = snapshot_to_flat_buffer(&Snapshot::from_world(&mut world, 0));
        let events = events_to_flat_buffer(&[SimEvent::BeeMoved { bee, x: 0.0, y: 0.0 }]);
        assert_eq!(scene[entity_offset(0) + FIELD_INDEX], bee.index() as f32);
        assert_eq!(events[EVENT_HEADER_SIZE + 1], bee.index() as f32);
    }

    #[test]
    fn test_parse_counts_truncated() {
        assert_eq!(parse_counts(&[]), None);
        assert_eq!(parse_counts(&[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_field_offsets_are_valid() {
        assert!(FIELD_INDEX < ENTITY_STRIDE);
        assert!(FIELD_KIND < ENTITY_STRIDE);
        assert!(FIELD_X < ENTITY_STRIDE);
        assert!(FIELD_Y < ENTITY_STRIDE);
        assert!(FIELD_WIDTH < ENTITY_STRIDE);
        assert_eq!(ENTITY_STRIDE, FIELD_HEIGHT + 1);
    }
}
