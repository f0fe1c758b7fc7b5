//! Two-course wall dressing around carved floor.
//!
//! The side course is laid first from floor/void adjacency. The top course is then placed from a
//! snapshot of the side course, so top walls never react to other top walls placed in the same
//! pass. Every placement only fills `Nothing`; floor and earlier walls are never overwritten.
//! Both passes scan columns left to right, bottom to top within a column, and the output
//! depends on that order.

use crate::grid::Grid;
use crate::types::{Pos, TileKind};

pub(super) fn dress_walls(grid: &mut Grid) {
    add_side_walls(grid);
    add_top_walls(grid);
}

pub(super) fn add_side_walls(grid: &mut Grid) {
    let positions: Vec<Pos> = grid.positions().collect();
    for pos in positions {
        if !grid.is_floor(pos) {
            continue;
        }
        let nothing_below = grid.is_nothing(pos.offset(0, -1));
        let nothing_above = grid.is_nothing(pos.offset(0, 1));
        let nothing_left = grid.is_nothing(pos.offset(-1, 0));
        let nothing_right = grid.is_nothing(pos.offset(1, 0));

        if nothing_below {
            place_side_walls_below(grid, pos);
            if nothing_left {
                place_side_walls_below(grid, pos.offset(-1, 0));
            } else if nothing_right {
                place_side_walls_below(grid, pos.offset(1, 0));
            }
        }

        if nothing_above {
            grid.set_if_nothing(pos.offset(0, 1), TileKind::SideWall);
            grid.set_if_nothing(pos.offset(0, 2), TileKind::SideWall);
        }
    }
}

fn place_side_walls_below(grid: &mut Grid, pos: Pos) {
    grid.set_if_nothing(pos.offset(0, -2), TileKind::SideWall);
    grid.set_if_nothing(pos.offset(0, -3), TileKind::SideWall);
}

pub(super) fn add_top_walls(grid: &mut Grid) {
    let side_snapshot: Vec<bool> =
        grid.tiles().iter().map(|&tile| tile == TileKind::SideWall).collect();
    let side_at = |grid: &Grid, pos: Pos| {
        grid.in_bounds(pos) && side_snapshot[(pos.y as usize) * grid.width() + pos.x as usize]
    };

    let positions: Vec<Pos> = grid.positions().collect();
    for pos in positions {
        if !grid.is_floor(pos) {
            continue;
        }
        let nothing_below = grid.is_nothing(pos.offset(0, -1));
        let nothing_left = grid.is_nothing(pos.offset(-1, 0));
        let nothing_right = grid.is_nothing(pos.offset(1, 0));
        let side_above = side_at(grid, pos.offset(0, 1));

        if side_above && nothing_right {
            place_top_wall_column(grid, pos.offset(1, 0));
        }
        if side_above && nothing_left {
            place_top_wall_column(grid, pos.offset(-1, 0));
        }
        if nothing_below && nothing_left {
            place_top_wall_corner(grid, pos.offset(-1, 0));
        }
        if nothing_below && nothing_right {
            place_top_wall_corner(grid, pos.offset(1, 0));
        }
        if side_above {
            grid.set_if_nothing(pos.offset(0, 3), TileKind::TopWall);
        }
        if nothing_below {
            grid.set_if_nothing(pos.offset(0, -1), TileKind::TopWall);
        }
        if nothing_left && !grid.is_floor(pos.offset(-1, -1)) {
            grid.set_if_nothing(pos.offset(-1, 0), TileKind::TopWall);
        }
        if nothing_right && !grid.is_floor(pos.offset(1, -1)) {
            grid.set_if_nothing(pos.offset(1, 0), TileKind::TopWall);
        }
    }
}

fn place_top_wall_column(grid: &mut Grid, base: Pos) {
    for offset in 0..=3 {
        grid.set_if_nothing(base.offset(0, offset), TileKind::TopWall);
    }
}

fn place_top_wall_corner(grid: &mut Grid, base: Pos) {
    grid.set_if_nothing(base, TileKind::TopWall);
    grid.set_if_nothing(base.offset(0, -1), TileKind::TopWall);
}
