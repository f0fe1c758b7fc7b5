//! Tick-driven actor simulation over a generated grid.

mod actor;
mod avatar;
mod behavior;
mod occupancy;
mod world;

pub use actor::{ANIMATION_FRAMES, ANIMATION_INTERVAL, Actor, ActorAction};
pub use avatar::Avatar;
pub use behavior::{AiState, WorldView};
pub use occupancy::OccupancySet;
pub use world::{Corpse, DeathHandler, Simulation, TickReport};
