//! Starry Sim - Simulation Core
//!
//! A bounded-plane scene of bees and stars. Each tick moves one bee and adds
//! or removes one star, and every placement searches for a spot that overlaps
//! nothing else. Uses `bevy_ecs` for entity storage, so every bee and star
//! keeps a stable handle that rendering hosts can key on.

pub mod api;
pub mod bridge;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod systems;
pub mod world;

pub use api::SimWorld;
pub use components::*;
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use events::{EventRecord, SimEvent, SimObserver};
pub use systems::{PlacementStats, PlayArea};
pub use world::{EntitySnapshot, Snapshot};
