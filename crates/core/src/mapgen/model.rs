//! Public output of dungeon generation.

use thiserror::Error;

use crate::grid::Grid;

use super::rooms::Room;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub attempts: u32,
    /// False only when every attempt failed validation and the last grid was kept anyway.
    pub connected: bool,
}

impl Dungeon {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.left.to_le_bytes());
            bytes.extend(room.bottom.to_le_bytes());
            bytes.extend(room.width.to_le_bytes());
            bytes.extend(room.height.to_le_bytes());
        }
        bytes.extend(self.attempts.to_le_bytes());
        bytes.push(u8::from(self.connected));
        bytes
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(
        "seed {seed} left the dungeon disconnected after {attempts} attempts \
         ({reached} of {total} floor tiles reachable)"
    )]
    Disconnected { seed: i64, attempts: u32, reached: usize, total: usize },
}
