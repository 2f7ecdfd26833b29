//! Change notifications emitted by the simulation.
//!
//! Systems push [`SimEvent`]s into the [`EventQueue`] resource as changes
//! happen. Before `set_play_area` or `update` returns, `SimWorld` hands each
//! new event, in order, to every registered [`SimObserver`]. A driver that
//! prefers polling can instead drain the queue itself.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// A single change in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A bee was placed or moved. Fired for initial placement, per-tick
    /// moves, and re-layout after a resize.
    BeeMoved { bee: Entity, x: f32, y: f32 },
    /// A star was created, relocated by a resize (`removed == false`), or
    /// removed by churn (`removed == true`, position is its last location).
    StarChanged {
        star: Entity,
        x: f32,
        y: f32,
        removed: bool,
    },
}

impl SimEvent {
    /// The entity this event is about.
    pub fn entity(&self) -> Entity {
        match *self {
            SimEvent::BeeMoved { bee, .. } => bee,
            SimEvent::StarChanged { star, .. } => star,
        }
    }

    /// Serializable form with the entity handle flattened to its bits.
    pub fn record(&self) -> EventRecord {
        match *self {
            SimEvent::BeeMoved { bee, x, y } => EventRecord {
                kind: "BeeMoved".to_string(),
                id: bee.to_bits(),
                x,
                y,
                removed: false,
            },
            SimEvent::StarChanged { star, x, y, removed } => EventRecord {
                kind: "StarChanged".to_string(),
                id: star.to_bits(),
                x,
                y,
                removed,
            },
        }
    }
}

/// Flattened event for logs and JSON transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: String,
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub removed: bool,
}

/// Receiver of scene notifications.
///
/// Both methods default to doing nothing so observers only implement what
/// they consume.
pub trait SimObserver {
    fn on_bee_moved(&mut self, _bee: Entity, _x: f32, _y: f32) {}

    fn on_star_changed(&mut self, _star: Entity, _x: f32, _y: f32, _removed: bool) {}
}

/// Dispatch one event to an observer.
pub fn notify(observer: &mut dyn SimObserver, event: &SimEvent) {
    match *event {
        SimEvent::BeeMoved { bee, x, y } => observer.on_bee_moved(bee, x, y),
        SimEvent::StarChanged { star, x, y, removed } => {
            observer.on_star_changed(star, x, y, removed)
        }
    }
}

/// Ordered queue of events not yet drained by the driver.
#[derive(Resource, Debug, Default)]
pub struct EventQueue {
    events: Vec<SimEvent>,
    /// Index of the first event not yet handed to observers.
    dispatched: usize,
}

impl EventQueue {
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    /// Events pushed since the last call, for observer dispatch.
    pub fn take_undispatched(&mut self) -> Vec<SimEvent> {
        let fresh = self.events[self.dispatched..].to_vec();
        self.dispatched = self.events.len();
        fresh
    }

    /// Remove and return all queued events.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        self.dispatched = 0;
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        bees: usize,
        stars_added: usize,
        stars_removed: usize,
    }

    impl SimObserver for Counter {
        fn on_bee_moved(&mut self, _bee: Entity, _x: f32, _y: f32) {
            self.bees += 1;
        }

        fn on_star_changed(&mut self, _star: Entity, _x: f32, _y: f32, removed: bool) {
            if removed {
                self.stars_removed += 1;
            } else {
                self.stars_added += 1;
            }
        }
    }

    #[test]
    fn test_notify_routes_by_variant() {
        let mut counter = Counter::default();
        let e = Entity::from_raw(3);
        notify(&mut counter, &SimEvent::BeeMoved { bee: e, x: 1.0, y: 2.0 });
        notify(
            &mut counter,
            &SimEvent::StarChanged { star: e, x: 0.0, y: 0.0, removed: true },
        );
        notify(
            &mut counter,
            &SimEvent::StarChanged { star: e, x: 0.0, y: 0.0, removed: false },
        );
        assert_eq!(counter.bees, 1);
        assert_eq!(counter.stars_removed, 1);
        assert_eq!(counter.stars_added, 1);
    }

    #[test]
    fn test_undispatched_is_incremental() {
        let mut queue = EventQueue::default();
        let e = Entity::from_raw(1);
        queue.push(SimEvent::BeeMoved { bee: e, x: 0.0, y: 0.0 });
        assert_eq!(queue.take_undispatched().len(), 1);
        queue.push(SimEvent::BeeMoved { bee: e, x: 5.0, y: 0.0 });
        let fresh = queue.take_undispatched();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0], SimEvent::BeeMoved { bee: e, x: 5.0, y: 0.0 });
        assert!(queue.take_undispatched().is_empty());
        assert_eq!(queue.drain().len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_record_flattens_entity() {
        let e = Entity::from_raw(9);
        let record = SimEvent::StarChanged { star: e, x: 3.0, y: 4.0, removed: true }.record();
        assert_eq!(record.kind, "StarChanged");
        assert_eq!(record.id, e.to_bits());
        assert!(record.removed);
    }
}
