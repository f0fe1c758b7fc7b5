//! Typed world settings with TOML loading.
//! Every field has a default so partial files only override what they name.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de::Error as TomlError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] TomlError),

    #[error("room size bounds are invalid: min {min}, max {max}")]
    RoomBounds { min: usize, max: usize },

    #[error("world {width}x{height} cannot fit a {room_size}x{room_size} room")]
    WorldTooSmall { width: usize, height: usize, room_size: usize },

    #[error("target fill ratio {0} must be in (0, 1]")]
    FillRatio(f64),

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub max_room_attempts: u32,
    pub target_fill_ratio: f64,
    pub clearance_horizontal: i32,
    pub clearance_vertical: i32,
    pub generation_attempts: u32,
    pub connector_max_distance_sq: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            min_room_size: 8,
            max_room_size: 16,
            max_room_attempts: 1000,
            target_fill_ratio: 0.30,
            clearance_horizontal: 1,
            clearance_vertical: 3,
            generation_attempts: 5,
            connector_max_distance_sq: 400,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(ConfigError::RoomBounds {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        // Rooms keep one tile of margin on every side.
        if self.max_room_size + 2 > self.width || self.max_room_size + 2 > self.height {
            return Err(ConfigError::WorldTooSmall {
                width: self.width,
                height: self.height,
                room_size: self.max_room_size,
            });
        }
        if !(self.target_fill_ratio > 0.0 && self.target_fill_ratio <= 1.0) {
            return Err(ConfigError::FillRatio(self.target_fill_ratio));
        }
        if self.generation_attempts == 0 {
            return Err(ConfigError::Zero("generation_attempts"));
        }
        Ok(())
    }

    pub fn target_floor_tiles(&self) -> usize {
        ((self.width * self.height) as f64 * self.target_fill_ratio) as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub npc_count: usize,
    pub spawn_attempts: u32,
    pub spawn_avoid_radius: u32,
    pub npc_max_health: i32,
    pub npc_armor: i32,
    pub npc_invulnerability_ticks: u32,
    pub avatar_max_health: i32,
    pub avatar_armor: i32,
    pub avatar_invulnerability_ticks: u32,
    pub avatar_lives: u32,
    pub attack_damage: i32,
    pub step_interval: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            npc_count: 60,
            spawn_attempts: 500,
            spawn_avoid_radius: 0,
            npc_max_health: 3,
            npc_armor: 0,
            npc_invulnerability_ticks: 8,
            avatar_max_health: 10,
            avatar_armor: 1,
            avatar_invulnerability_ticks: 15,
            avatar_lives: 3,
            attack_damage: 2,
            step_interval: 1,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_interval == 0 {
            return Err(ConfigError::Zero("step_interval"));
        }
        if self.npc_max_health < 1 {
            return Err(ConfigError::Zero("npc_max_health"));
        }
        if self.avatar_max_health < 1 {
            return Err(ConfigError::Zero("avatar_max_health"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub generator: GeneratorConfig,
    pub simulation: SimConfig,
}

impl WorldConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.simulation.validate()
    }
}
