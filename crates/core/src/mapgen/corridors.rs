//! L-shaped corridor carving under the same clearance buffer as rooms.

use std::collections::BTreeSet;

use crate::config::GeneratorConfig;
use crate::grid::Grid;
use crate::types::{Pos, TileKind};

use super::rooms::Room;
use super::seed::GenRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Bend {
    HorizontalFirst,
    VerticalFirst,
}

impl Bend {
    fn other(self) -> Self {
        match self {
            Bend::HorizontalFirst => Bend::VerticalFirst,
            Bend::VerticalFirst => Bend::HorizontalFirst,
        }
    }

    fn corner(self, start: Pos, end: Pos) -> Pos {
        match self {
            Bend::HorizontalFirst => Pos { y: start.y, x: end.x },
            Bend::VerticalFirst => Pos { y: end.y, x: start.x },
        }
    }
}

pub(super) fn carve_hallway(
    grid: &mut Grid,
    rng: &mut GenRng,
    config: &GeneratorConfig,
    from: &Room,
    to: &Room,
) -> bool {
    let first = if rng.coin() { Bend::HorizontalFirst } else { Bend::VerticalFirst };
    for bend in [first, first.other()] {
        if let Some(path) = plan_path(grid, config, from, to, bend) {
            for pos in path {
                grid.set_tile(pos, TileKind::Floor);
            }
            return true;
        }
    }
    false
}

pub(super) fn plan_path(
    grid: &Grid,
    config: &GeneratorConfig,
    from: &Room,
    to: &Room,
    bend: Bend,
) -> Option<Vec<Pos>> {
    let start = from.center();
    let end = to.center();
    let waypoints = [start, bend.corner(start, end), end];

    let mut path = Vec::new();
    let mut on_path = BTreeSet::new();
    for leg in waypoints.windows(2) {
        let mut current = leg[0];
        loop {
            let in_endpoint_room = from.contains(current) || to.contains(current);
            if !in_endpoint_room && !is_clear(grid, config, current, &on_path, from, to) {
                return None;
            }
            if on_path.insert(current) {
                path.push(current);
            }
            if current == leg[1] {
                break;
            }
            current = if current.x != leg[1].x {
                current.offset((leg[1].x - current.x).signum(), 0)
            } else {
                current.offset(0, (leg[1].y - current.y).signum())
            };
        }
    }
    Some(path)
}

fn is_clear(
    grid: &Grid,
    config: &GeneratorConfig,
    pos: Pos,
    on_path: &BTreeSet<Pos>,
    from: &Room,
    to: &Room,
) -> bool {
    for dx in -config.clearance_horizontal..=config.clearance_horizontal {
        for dy in -config.clearance_vertical..=config.clearance_vertical {
            let neighbor = pos.offset(dx, dy);
            if on_path.contains(&neighbor) || !grid.is_floor(neighbor) {
                continue;
            }
            if from.contains(neighbor) || to.contains(neighbor) {
                continue;
            }
            return false;
        }
    }
    true
}

pub(super) fn add_extra_connectors(
    grid: &mut Grid,
    rng: &mut GenRng,
    config: &GeneratorConfig,
    rooms: &[Room],
) -> usize {
    if rooms.len() < 2 {
        return 0;
    }
    let mut shuffled = rooms.to_vec();
    rng.shuffle(&mut shuffled);

    let mut carved = 0;
    for pair in shuffled.windows(2) {
        let distance = pair[0].center().squared_distance(pair[1].center());
        if distance <= config.connector_max_distance_sq
            && carve_hallway(grid, rng, config, &pair[0], &pair[1])
        {
            carved += 1;
        }
    }
    carved
}
