pub mod combat;
pub mod config;
pub mod grid;
pub mod mapgen;
pub mod sim;
pub mod types;

pub use combat::{CombatReport, CombatService, DamageEvent, HealthComponent, HealthLookup, Target};
pub use config::{ConfigError, GeneratorConfig, SimConfig, WorldConfig};
pub use grid::Grid;
pub use mapgen::{Dungeon, DungeonGenerator, GenerationError, Room, generate};
pub use sim::{Actor, AiState, Avatar, OccupancySet, Simulation, TickReport};
pub use types::*;
