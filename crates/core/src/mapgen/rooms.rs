//! Room rectangles, clearance-aware placement and carving.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::grid::Grid;
use crate::types::{Pos, TileKind};

use super::seed::GenRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub left: i32,
    pub bottom: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(left: i32, bottom: i32, width: i32, height: i32) -> Self {
        Self { left, bottom, width, height }
    }

    fn right(self) -> i32 {
        self.left + self.width
    }

    fn top(self) -> i32 {
        self.bottom + self.height
    }

    pub fn center(self) -> Pos {
        Pos { y: self.bottom + self.height / 2, x: self.left + self.width / 2 }
    }

    pub fn area(self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.left && pos.x < self.right() && pos.y >= self.bottom && pos.y < self.top()
    }

    pub fn overlaps_with_clearance(self, other: &Room, horizontal: i32, vertical: i32) -> bool {
        self.left - horizontal < other.right() + horizontal
            && self.right() + horizontal > other.left - horizontal
            && self.bottom - vertical < other.top() + vertical
            && self.top() + vertical > other.bottom - vertical
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.bottom..self.top())
            .flat_map(move |y| (self.left..self.right()).map(move |x| Pos { y, x }))
    }
}

pub(super) fn random_room(rng: &mut GenRng, config: &GeneratorConfig) -> Option<Room> {
    let min_size = config.min_room_size as i32;
    let max_size = config.max_room_size as i32;
    let width = rng.range_inclusive(min_size, max_size);
    let height = rng.range_inclusive(min_size, max_size);

    let max_left = config.width as i32 - width - 1;
    let max_bottom = config.height as i32 - height - 1;
    if max_left < 1 || max_bottom < 1 {
        return None;
    }

    let left = rng.range_inclusive(1, max_left);
    let bottom = rng.range_inclusive(1, max_bottom);
    Some(Room { left, bottom, width, height })
}

pub(super) fn overlaps_any(candidate: &Room, rooms: &[Room], config: &GeneratorConfig) -> bool {
    rooms.iter().any(|room| {
        candidate.overlaps_with_clearance(
            room,
            config.clearance_horizontal,
            config.clearance_vertical,
        )
    })
}

pub(super) fn carve_room(grid: &mut Grid, room: &Room) -> usize {
    room.cells().filter(|&pos| grid.set_if_nothing(pos, TileKind::Floor)).count()
}

pub(super) fn nearest_room(rooms: &[Room], source_index: usize) -> Option<usize> {
    let source_center = rooms[source_index].center();
    let mut best: Option<(i64, usize)> = None;
    for (index, room) in rooms.iter().enumerate() {
        if index == source_index {
            continue;
        }
        let distance = room.center().squared_distance(source_center);
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, index));
        }
    }
    best.map(|(_, index)| index)
}
