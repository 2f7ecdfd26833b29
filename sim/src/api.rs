//! Public API for the simulation.
//!
//! This module provides the main interface for a rendering host (or any other
//! driver) to interact with the scene.
//!
//! ## Driving the Scene
//!
//! The engine owns no timer. The driver calls `set_play_area` whenever the
//! available area changes and `update` once per tick (every
//! `SimConfig::tick_interval_secs`, two seconds by default). Both calls finish
//! all their work, including notification delivery, before returning.
//!
//! ## Notifications
//!
//! Observers registered with `add_observer` receive every change, in order,
//! before the call that caused it returns. Drivers that poll instead can call
//! `drain_events`.

use crate::components::*;
use crate::config::SimConfig;
use crate::error::Result;
use crate::events::{notify, EventQueue, SimEvent, SimObserver};
use crate::systems::*;
use crate::systems::Populated;
use crate::world::Snapshot;
use bevy_ecs::prelude::*;

/// The main simulation world container.
///
/// Holds the ECS world and the tick schedule, providing a clean API for:
/// - Assigning the play area
/// - Ticking the scene forward
/// - Subscribing to or draining change notifications
/// - Extracting state snapshots
pub struct SimWorld {
    world: World,
    schedule: Schedule,
    tick: u64,
    observers: Vec<Box<dyn SimObserver + Send>>,
    /// Keep events queued for `drain_events` after observers have seen them.
    retain_events: bool,
}

impl SimWorld {
    /// Create a scene with default configuration and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::build(SimConfig::default())
    }

    /// Create a scene with default configuration and a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::build(SimConfig::seeded(seed))
    }

    /// Create a scene with custom configuration.
    pub fn with_config(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let mut world = World::new();

        world.insert_resource(SimRng::from_seed_opt(config.seed));
        world.insert_resource(config);
        world.insert_resource(PlayArea::default());
        world.insert_resource(PlacementStats::default());
        world.insert_resource(EventQueue::default());
        world.insert_resource(Populated::default());

        // One bee move, then one star churn step
        let mut schedule = Schedule::default();
        schedule.add_systems((move_one_bee_system, star_churn_system).chain());

        Self {
            world,
            schedule,
            tick: 0,
            observers: Vec::new(),
            retain_events: true,
        }
    }

    /// Assign the play area.
    ///
    /// The first usable area populates the scene. Later ones re-place every
    /// existing bee and star. A zero, negative or non-finite dimension marks
    /// the area unset and touches nothing.
    pub fn set_play_area(&mut self, width: f32, height: f32) {
        let area = PlayArea::new(width, height);
        self.world.insert_resource(area);

        if area.is_empty() {
            tracing::info!("Play area unset ({}x{}), placement disabled", width, height);
            return;
        }

        tracing::info!("Play area set to {}x{}", width, height);
        populate_or_relayout(&mut self.world);
        self.dispatch();
    }

    /// The current play area, or `None` while unset.
    pub fn play_area(&self) -> Option<PlayArea> {
        let area = *self.world.resource::<PlayArea>();
        (!area.is_empty()).then_some(area)
    }

    /// Run one tick: move one bee, then add or remove one star.
    ///
    /// Does nothing at all while the play area is unset.
    pub fn update(&mut self) {
        if self.world.resource::<PlayArea>().is_empty() {
            tracing::trace!("Tick skipped, play area unset");
            return;
        }

        self.schedule.run(&mut self.world);
        self.tick += 1;

        let (bees, stars) = (self.bee_count(), self.star_count());
        tracing::trace!("Tick {}: {} bees, {} stars", self.tick, bees, stars);
        self.dispatch();
    }

    /// Register an observer. Observers are called in registration order.
    ///
    /// Registering an observer stops events being kept for `drain_events`
    /// once they are dispatched. Call `set_retain_events(true)` afterwards
    /// to poll as well.
    pub fn add_observer(&mut self, observer: Box<dyn SimObserver + Send>) {
        self.observers.push(observer);
        self.retain_events = false;
    }

    /// Whether events stay queued for `drain_events` after dispatch.
    pub fn set_retain_events(&mut self, retain: bool) {
        self.retain_events = retain;
        if !retain {
            self.world.resource_mut::<EventQueue>().drain();
        }
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.world.resource::<EventQueue>().len()
    }

    /// Remove and return every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.world.resource_mut::<EventQueue>().drain()
    }

    fn dispatch(&mut self) {
        let fresh = self.world.resource_mut::<EventQueue>().take_undispatched();
        for event in &fresh {
            for observer in self.observers.iter_mut() {
                notify(observer.as_mut(), event);
            }
        }
        if !self.retain_events {
            self.world.resource_mut::<EventQueue>().drain();
        }
    }

    /// Get a snapshot of the current scene.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.tick)
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&mut self) -> String {
        self.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Number of live bees.
    pub fn bee_count(&mut self) -> usize {
        bee_entities(&mut self.world).len()
    }

    /// Number of live stars.
    pub fn star_count(&mut self) -> usize {
        star_entities(&mut self.world).len()
    }

    /// Live bee handles.
    pub fn bees(&mut self) -> Vec<Entity> {
        bee_entities(&mut self.world)
    }

    /// Live star handles.
    pub fn stars(&mut self) -> Vec<Entity> {
        star_entities(&mut self.world)
    }

    /// Bounding rectangle of a live entity.
    pub fn rect_of(&self, entity: Entity) -> Option<Rect> {
        let pos = self.world.get::<Position>(entity)?;
        let size = self.world.get::<Size>(entity)?;
        Some(Rect::from_parts(*pos, *size))
    }

    /// Kind of a live entity.
    pub fn kind_of(&self, entity: Entity) -> Option<EntityKind> {
        if self.world.get::<Bee>(entity).is_some() {
            Some(EntityKind::Bee)
        } else if self.world.get::<Star>(entity).is_some() {
            Some(EntityKind::Star)
        } else {
            None
        }
    }

    /// Placement counters since creation.
    pub fn placement_stats(&self) -> PlacementStats {
        *self.world.resource::<PlacementStats>()
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    /// Get direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world (for advanced usage).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}
