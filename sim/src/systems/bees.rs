//! Bee movement - one randomly chosen bee hops to a free spot each tick.

use crate::systems::placement::SimRng;
use crate::systems::population::{bee_entities, relocate_bee};
use bevy_ecs::prelude::*;
use rand::Rng;

/// Exclusive system that moves one uniformly chosen bee.
/// The bee keeps its size; only its position changes.
pub fn move_one_bee_system(world: &mut World) {
    let bees = bee_entities(world);
    if bees.is_empty() {
        return;
    }
    let index = world.resource_mut::<SimRng>().0.gen_range(0..bees.len());
    relocate_bee(world, bees[index]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::config::SimConfig;
    use crate::events::{EventQueue, SimEvent};
    use crate::systems::placement::PlacementStats;
    use crate::systems::population::PlayArea;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(SimConfig::seeded(3));
        world.insert_resource(SimRng::from_seed_opt(Some(3)));
        world.insert_resource(PlacementStats::default());
        world.insert_resource(EventQueue::default());
        world.insert_resource(PlayArea::new(1000.0, 800.0));
        world
    }

    #[test]
    fn test_no_bees_is_noop() {
        let mut world = test_world();
        move_one_bee_system(&mut world);
        assert!(world.resource::<EventQueue>().is_empty());
        assert_eq!(world.resource::<PlacementStats>().placements, 0);
    }

    #[test]
    fn test_moves_exactly_one_bee_in_place() {
        let mut world = test_world();
        let bee = world
            .spawn(BeeBundle::new(Position::new(0.0, 0.0), Size::square(60.0)))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(move_one_bee_system);
        schedule.run(&mut world);

        let events = world.resource_mut::<EventQueue>().drain();
        assert_eq!(events.len(), 1);
        let SimEvent::BeeMoved { bee: moved, x, y } = events[0] else {
            panic!("expected a bee move, got {:?}", events[0]);
        };
        assert_eq!(moved, bee);
        assert_eq!(*world.get::<Position>(bee).unwrap(), Position::new(x, y));
        assert_eq!(*world.get::<Size>(bee).unwrap(), Size::square(60.0));
    }

    #[test]
    fn test_moved_bee_avoids_others() {
        let mut world = test_world();
        world.spawn(StarBundle::new(Position::new(0.0, 0.0), Size::new(150.0, 100.0)));
        let bee = world
            .spawn(BeeBundle::new(Position::new(10.0, 10.0), Size::square(45.0)))
            .id();

        move_one_bee_system(&mut world);

        let stats = *world.resource::<PlacementStats>();
        assert_eq!(stats.fallbacks, 0);
        let rect = Rect::from_parts(*world.get::<Position>(bee).unwrap(), Size::square(45.0));
        assert!(!rect.overlaps(&Rect::new(0.0, 0.0, 150.0, 100.0)));
    }
}
