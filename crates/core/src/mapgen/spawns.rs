//! Initial actor placement on random floor tiles.

use crate::grid::Grid;
use crate::types::Pos;

use super::seed::GenRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    pub count: usize,
    pub attempts: u32,
    pub avoid: Pos,
    pub avoid_radius: u32,
}

/// Samples uniform tiles until `count` spawns are found or `attempts` run out. Each sample is
/// one attempt whether or not it lands. Two spawns may share a tile; occupancy sorts them out
/// on the first tick.
pub fn spawn_positions(grid: &Grid, rng: &mut GenRng, request: &SpawnRequest) -> Vec<Pos> {
    let mut spawns = Vec::with_capacity(request.count);
    if grid.width() == 0 || grid.height() == 0 {
        return spawns;
    }

    for _ in 0..request.attempts {
        if spawns.len() >= request.count {
            break;
        }
        let x = rng.below(grid.width()) as i32;
        let y = rng.below(grid.height()) as i32;
        let pos = Pos { y, x };
        if !grid.is_floor(pos) || pos.manhattan(request.avoid) <= request.avoid_radius {
            continue;
        }
        spawns.push(pos);
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::rooms::{Room, carve_room};
    use crate::types::TileKind;

    fn room_grid() -> Grid {
        let mut grid = Grid::new(20, 20);
        carve_room(&mut grid, &Room::new(2, 2, 10, 10));
        grid
    }

    #[test]
    fn spawns_land_on_floor_tiles() {
        let grid = room_grid();
        let request = SpawnRequest { count: 30, attempts: 500, avoid: Pos::new(2, 2), avoid_radius: 0 };
        let spawns = spawn_positions(&grid, &mut GenRng::npc_stream(11), &request);

        assert_eq!(spawns.len(), 30);
        assert!(spawns.iter().all(|&pos| grid.is_floor(pos)));
        assert!(!spawns.contains(&Pos::new(2, 2)));
    }

    #[test]
    fn spawns_may_share_a_tile() {
        let mut grid = Grid::new(2, 2);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set_tile(pos, TileKind::Floor);
        }
        let request = SpawnRequest { count: 10, attempts: 500, avoid: Pos::new(40, 40), avoid_radius: 0 };
        let spawns = spawn_positions(&grid, &mut GenRng::npc_stream(5), &request);

        // Ten spawns over four tiles must stack somewhere.
        assert_eq!(spawns.len(), 10);
        assert!(spawns.iter().all(|&pos| grid.is_floor(pos)));
    }

    #[test]
    fn avoid_radius_keeps_the_area_clear() {
        let grid = room_grid();
        let avoid = Pos::new(6, 6);
        let request = SpawnRequest { count: 40, attempts: 500, avoid, avoid_radius: 3 };
        let spawns = spawn_positions(&grid, &mut GenRng::npc_stream(4), &request);

        assert!(!spawns.is_empty());
        assert!(spawns.iter().all(|pos| pos.manhattan(avoid) > 3));
    }

    #[test]
    fn exhausted_attempts_return_fewer_spawns() {
        let mut grid = Grid::new(20, 20);
        grid.set_tile(Pos::new(7, 7), TileKind::Floor);
        let request = SpawnRequest { count: 10, attempts: 50, avoid: Pos::new(0, 0), avoid_radius: 0 };
        let spawns = spawn_positions(&grid, &mut GenRng::npc_stream(8), &request);
        assert!(spawns.len() < 10);
        assert!(spawns.iter().all(|&pos| pos == Pos::new(7, 7)));
    }

    #[test]
    fn same_stream_places_the_same_population() {
        let grid = room_grid();
        let request = SpawnRequest { count: 12, attempts: 200, avoid: Pos::new(3, 3), avoid_radius: 1 };
        let first = spawn_positions(&grid, &mut GenRng::npc_stream(99), &request);
        let second = spawn_positions(&grid, &mut GenRng::npc_stream(99), &request);
        assert_eq!(first, second);
    }
}
