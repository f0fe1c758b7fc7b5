//! Flood-fill validation that every floor tile belongs to one region.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloodReport {
    pub reached: usize,
    pub total: usize,
}

impl FloodReport {
    pub fn is_connected(self) -> bool {
        self.total > 0 && self.reached == self.total
    }
}

pub fn flood_floor(grid: &Grid) -> FloodReport {
    let total = grid.floor_count();
    let Some(start) = grid.first_floor() else {
        return FloodReport { reached: 0, total };
    };
    FloodReport { reached: reachable_from(grid, start), total }
}

pub fn all_floors_connected(grid: &Grid) -> bool {
    flood_floor(grid).is_connected()
}

pub(crate) fn reachable_from(grid: &Grid, start: Pos) -> usize {
    if !grid.is_floor(start) {
        return 0;
    }
    let mut visited = vec![false; grid.width() * grid.height()];
    let index = |pos: Pos| (pos.y as usize) * grid.width() + pos.x as usize;
    visited[index(start)] = true;

    let mut queue = VecDeque::from([start]);
    let mut seen = 0;
    while let Some(current) = queue.pop_front() {
        seen += 1;
        for direction in Direction::ALL {
            let next = current.step(direction);
            if grid.is_floor(next) && !visited[index(next)] {
                visited[index(next)] = true;
                queue.push_back(next);
            }
        }
    }
    seen
}
