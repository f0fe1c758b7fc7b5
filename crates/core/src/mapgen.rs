//! Seeded dungeon generation split into placement, carving, dressing and validation stages.

pub mod connectivity;
pub mod model;
pub mod rooms;
pub mod seed;
pub mod spawns;

mod corridors;
mod generator;
mod walls;

pub use connectivity::{FloodReport, all_floors_connected, flood_floor};
pub use generator::DungeonGenerator;
pub use model::{Dungeon, GenerationError};
pub use rooms::Room;
pub use seed::{GenRng, NPC_SEED_SALT, derive_npc_seed};
pub use spawns::{SpawnRequest, spawn_positions};

pub fn generate(seed: i64) -> Dungeon {
    DungeonGenerator::default().generate(seed)
}
