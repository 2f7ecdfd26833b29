//! Systems for the Starry Sim scene.
//!
//! Systems contain the logic that operates on components. Every system here
//! is exclusive (`fn(&mut World)`): placement must see the result of every
//! earlier placement, so nothing in a tick runs in parallel.
//!
//! **Population** - runs when the play area is assigned:
//! - `populate_or_relayout` - spawns the initial scene or re-places it
//!
//! **Tick** - chained, in this order, once per `update()`:
//! - `move_one_bee_system` - relocates one random bee
//! - `star_churn_system` - adds or removes one star
//!
//! All of them place entities through `placement::place`.

pub mod bees;
pub mod placement;
pub mod population;
pub mod stars;

pub use bees::*;
pub use placement::*;
pub use population::*;
pub use stars::*;
