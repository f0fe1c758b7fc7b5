//! Idle/Seek/Attack selection and the per-state movement rules.

use serde::Serialize;

use crate::combat::{CombatService, Target};
use crate::grid::Grid;
use crate::types::{Direction, Pos};

use super::occupancy::OccupancySet;

const ATTACK_RANGE: u32 = 2;
const SEEK_RANGE: u32 = 15;
// An attacker only lands blows while strictly inside this distance.
const STRIKE_REACH: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AiState {
    #[default]
    Idle,
    Seek,
    Attack,
}

impl AiState {
    pub fn for_distance(distance: u32) -> Self {
        if distance <= ATTACK_RANGE {
            AiState::Attack
        } else if distance < SEEK_RANGE {
            AiState::Seek
        } else {
            AiState::Idle
        }
    }
}

pub struct WorldView<'a> {
    grid: &'a Grid,
    avatar: Pos,
    occupancy: &'a OccupancySet,
    combat: &'a mut CombatService,
    attack_damage: i32,
}

impl<'a> WorldView<'a> {
    pub fn new(
        grid: &'a Grid,
        avatar: Pos,
        occupancy: &'a OccupancySet,
        combat: &'a mut CombatService,
        attack_damage: i32,
    ) -> Self {
        Self { grid, avatar, occupancy, combat, attack_damage }
    }

    pub fn avatar_pos(&self) -> Pos {
        self.avatar
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.grid.is_walkable(pos)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.occupancy.contains(pos)
    }

    pub fn can_enter(&self, pos: Pos) -> bool {
        self.is_walkable(pos) && !self.is_occupied(pos)
    }

    pub(super) fn strike_avatar(&mut self, source: Target) {
        self.combat.queue_damage(Target::Avatar, Some(source), self.attack_damage);
    }
}

pub(super) fn seek_step(from: Pos, view: &WorldView<'_>) -> Option<Direction> {
    let avatar = view.avatar_pos();
    let dx = avatar.x - from.x;
    let dy = avatar.y - from.y;
    let horizontal = Direction::horizontal(dx);
    let vertical = Direction::vertical(dy);
    let (primary, secondary) =
        if dx.abs() >= dy.abs() { (horizontal, vertical) } else { (vertical, horizontal) };

    [primary, secondary]
        .into_iter()
        .flatten()
        .find(|&direction| view.can_enter(from.step(direction)))
}

pub(super) fn in_strike_reach(from: Pos, avatar: Pos) -> bool {
    from.manhattan(avatar) < STRIKE_REACH
}

pub(super) fn facing_toward(from: Pos, target: Pos, current: Direction) -> Direction {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let turned = if dx.abs() > dy.abs() {
        Direction::horizontal(dx)
    } else if dy.abs() > dx.abs() {
        Direction::vertical(dy)
    } else {
        None
    };
    turned.unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn open_grid() -> Grid {
        let mut grid = Grid::new(20, 20);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set_tile(pos, TileKind::Floor);
        }
        grid
    }

    #[test]
    fn state_thresholds_follow_manhattan_distance() {
        assert_eq!(AiState::for_distance(0), AiState::Attack);
        assert_eq!(AiState::for_distance(2), AiState::Attack);
        assert_eq!(AiState::for_distance(3), AiState::Seek);
        assert_eq!(AiState::for_distance(14), AiState::Seek);
        assert_eq!(AiState::for_distance(15), AiState::Idle);
    }

    #[test]
    fn seek_prefers_the_wider_axis_and_horizontal_on_ties() {
        let grid = open_grid();
        let occupancy = OccupancySet::build(Pos::new(10, 10), []);
        let mut combat = CombatService::new();
        let view = WorldView::new(&grid, Pos::new(10, 10), &occupancy, &mut combat, 2);

        assert_eq!(seek_step(Pos::new(10, 4), &view), Some(Direction::Up));
        assert_eq!(seek_step(Pos::new(3, 8), &view), Some(Direction::Right));
        assert_eq!(seek_step(Pos::new(14, 6), &view), Some(Direction::Left));
    }

    #[test]
    fn seek_falls_back_to_the_secondary_axis() {
        let mut grid = open_grid();
        grid.set_tile(Pos::new(5, 4), TileKind::TopWall);
        let occupancy = OccupancySet::build(Pos::new(10, 8), []);
        let mut combat = CombatService::new();
        let view = WorldView::new(&grid, Pos::new(10, 8), &occupancy, &mut combat, 2);

        assert_eq!(seek_step(Pos::new(4, 4), &view), Some(Direction::Up));
    }

    #[test]
    fn seek_stalls_when_both_axes_are_shut() {
        let mut grid = open_grid();
        grid.set_tile(Pos::new(5, 4), TileKind::SideWall);
        let avatar = Pos::new(10, 4);
        let occupancy = OccupancySet::build(avatar, []);
        let mut combat = CombatService::new();
        let view = WorldView::new(&grid, avatar, &occupancy, &mut combat, 2);

        // Same row: no vertical axis to fall back on.
        assert_eq!(seek_step(Pos::new(4, 4), &view), None);
    }

    #[test]
    fn facing_keeps_current_direction_on_diagonal_ties() {
        let origin = Pos::new(5, 5);
        assert_eq!(facing_toward(origin, Pos::new(6, 6), Direction::Down), Direction::Down);
        assert_eq!(facing_toward(origin, Pos::new(3, 5), Direction::Down), Direction::Left);
        assert_eq!(facing_toward(origin, Pos::new(5, 7), Direction::Left), Direction::Up);
        assert_eq!(facing_toward(origin, origin, Direction::Right), Direction::Right);
    }

    #[test]
    fn strike_queues_configured_damage_against_the_avatar() {
        let grid = open_grid();
        let occupancy = OccupancySet::build(Pos::new(1, 1), []);
        let mut combat = CombatService::new();
        {
            let mut view = WorldView::new(&grid, Pos::new(1, 1), &occupancy, &mut combat, 4);
            view.strike_avatar(Target::Avatar);
        }
        assert_eq!(combat.pending(), 1);
        assert!(in_strike_reach(Pos::new(1, 1), Pos::new(2, 2)));
        assert!(!in_strike_reach(Pos::new(1, 1), Pos::new(3, 2)));
    }
}
