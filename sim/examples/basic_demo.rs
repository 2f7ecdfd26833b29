//! Basic demonstration of the Starry Sim scene.
//!
//! Acts as the external driver: assigns a play area, ticks the scene and keeps
//! a mirror of every entity keyed by its handle, the way a renderer would.
//!
//! Run with: cargo run --example basic_demo
//! More detail: RUST_LOG=starry_sim=debug cargo run --example basic_demo

use bevy_ecs::entity::Entity;
use starry_sim::{SimObserver, SimWorld};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Stand-in for a sprite layer: one record per live entity.
#[derive(Default)]
struct Mirror {
    bees: HashMap<Entity, (f32, f32)>,
    stars: HashMap<Entity, (f32, f32)>,
    faded: Vec<Entity>,
}

struct MirrorObserver(Arc<Mutex<Mirror>>);

impl SimObserver for MirrorObserver {
    fn on_bee_moved(&mut self, bee: Entity, x: f32, y: f32) {
        let mut mirror = self.0.lock().unwrap();
        mirror.bees.insert(bee, (x, y));
    }

    fn on_star_changed(&mut self, star: Entity, x: f32, y: f32, removed: bool) {
        let mut mirror = self.0.lock().unwrap();
        if removed {
            mirror.stars.remove(&star);
            mirror.faded.push(star);
        } else {
            mirror.stars.insert(star, (x, y));
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starry_sim=info".into()),
        )
        .init();

    println!("=== Starry Sim - Demo ===\n");

    let mut sim = SimWorld::seeded(2);
    let mirror = Arc::new(Mutex::new(Mirror::default()));
    sim.add_observer(Box::new(MirrorObserver(mirror.clone())));

    sim.set_play_area(1000.0, 800.0);
    print_state(&mut sim, &mirror);

    let interval = sim.config().tick_interval_secs;
    println!("\nRunning 30 ticks (one every {:.1}s of scene time)...\n", interval);
    for _ in 0..30 {
        // A faded star is gone from the scene by the next tick
        mirror.lock().unwrap().faded.clear();
        sim.update();
        if sim.current_tick() % 10 == 0 {
            println!(
                "--- Tick {} (t={:.0}s) ---",
                sim.current_tick(),
                sim.current_tick() as f32 * interval
            );
            print_state(&mut sim, &mirror);
        }
    }

    println!("\n--- Resizing to 1600x1000 ---\n");
    sim.set_play_area(1600.0, 1000.0);
    print_state(&mut sim, &mirror);

    let stats = sim.placement_stats();
    println!(
        "\nPlacements: {} ({} fell back)",
        stats.placements, stats.fallbacks
    );

    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("snapshot failed: {}", e),
    }
}

fn print_state(sim: &mut SimWorld, mirror: &Arc<Mutex<Mirror>>) {
    let snapshot = sim.snapshot();
    let mirror = mirror.lock().unwrap();
    println!(
        "  bees: {} (mirrored {})  stars: {} (mirrored {})  overlaps: {}",
        snapshot.bees.len(),
        mirror.bees.len(),
        snapshot.stars.len(),
        mirror.stars.len(),
        snapshot.overlapping_pairs().len()
    );
    for bee in &snapshot.bees {
        println!(
            "    bee {:>12}: pos=({:.0}, {:.0}) size={:.0}",
            bee.id, bee.x, bee.y, bee.width
        );
    }
}
