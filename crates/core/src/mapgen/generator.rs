//! Generation orchestration: rooms, corridors, walls, validation, retries.

use tracing::{debug, warn};

use crate::config::{ConfigError, GeneratorConfig};
use crate::grid::Grid;

use super::connectivity::flood_floor;
use super::corridors::{add_extra_connectors, carve_hallway};
use super::model::{Dungeon, GenerationError};
use super::rooms::{Room, carve_room, nearest_room, overlaps_any, random_room};
use super::seed::GenRng;
use super::walls::dress_walls;

#[derive(Clone, Debug, Default)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs up to `generation_attempts` full passes and keeps the first connected grid.
    /// When none validates, the last attempt is returned with `connected == false`.
    pub fn generate(&self, seed: i64) -> Dungeon {
        let mut rng = GenRng::from_seed(seed);
        let mut grid = Grid::new(self.config.width, self.config.height);
        let mut rooms = Vec::new();
        let mut attempts = 0;
        let mut connected = false;

        for attempt in 0..self.config.generation_attempts {
            attempts = attempt + 1;
            grid.reset();
            rooms.clear();

            let stats = place_rooms(&mut grid, &mut rng, &self.config, &mut rooms);
            dress_walls(&mut grid);

            let flood = flood_floor(&grid);
            debug!(
                seed,
                attempt,
                rooms = rooms.len(),
                room_tries = stats.room_tries,
                connectors = stats.extra_connectors,
                floor = flood.total,
                reached = flood.reached,
                "dungeon generation attempt"
            );
            if flood.is_connected() {
                connected = true;
                break;
            }
        }

        if !connected {
            warn!(seed, attempts, "dungeon stayed disconnected; keeping last attempt");
        }
        Dungeon { grid, rooms, attempts, connected }
    }

    pub fn generate_connected(&self, seed: i64) -> Result<Dungeon, GenerationError> {
        let dungeon = self.generate(seed);
        if dungeon.connected {
            return Ok(dungeon);
        }
        let flood = flood_floor(&dungeon.grid);
        Err(GenerationError::Disconnected {
            seed,
            attempts: dungeon.attempts,
            reached: flood.reached,
            total: flood.total,
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct PlacementStats {
    room_tries: u32,
    extra_connectors: usize,
}

fn place_rooms(
    grid: &mut Grid,
    rng: &mut GenRng,
    config: &GeneratorConfig,
    rooms: &mut Vec<Room>,
) -> PlacementStats {
    let target_floor = config.target_floor_tiles();
    let mut carved = 0;
    let mut stats = PlacementStats::default();

    while carved < target_floor && stats.room_tries < config.max_room_attempts {
        stats.room_tries += 1;
        let Some(candidate) = random_room(rng, config) else {
            continue;
        };
        if overlaps_any(&candidate, rooms, config) {
            continue;
        }
        rooms.push(candidate);
        carved += carve_room(grid, &candidate);
        if let Some(nearest) = nearest_room(rooms, rooms.len() - 1) {
            carve_hallway(grid, rng, config, &candidate, &rooms[nearest]);
        }
    }

    stats.extra_connectors = add_extra_connectors(grid, rng, config, rooms);
    stats
}
