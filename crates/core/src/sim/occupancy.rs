//! Per-tick blocked-tile bookkeeping with crowding tiers around the avatar.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Pos;

// Actors further than this from the avatar block their tile alone.
const CROWD_OUTER_RADIUS: u32 = 4;
// Inside this radius actors may stack freely.
const CROWD_INNER_RADIUS: u32 = 2;
const CROWD_LIMIT: u32 = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancySet {
    avatar: Pos,
    occupants: BTreeMap<Pos, u32>,
    blocked: BTreeSet<Pos>,
}

impl OccupancySet {
    pub fn build(avatar: Pos, actor_positions: impl IntoIterator<Item = Pos>) -> Self {
        let mut set = Self { avatar, ..Self::default() };
        for pos in actor_positions {
            *set.occupants.entry(pos).or_default() += 1;
        }
        set.blocked.insert(avatar);
        let tiles: Vec<Pos> = set.occupants.keys().copied().collect();
        for pos in tiles {
            set.reevaluate(pos);
        }
        set
    }

    pub fn blocks(distance: u32, occupants: u32) -> bool {
        if distance > CROWD_OUTER_RADIUS {
            occupants >= 1
        } else if distance > CROWD_INNER_RADIUS {
            occupants >= CROWD_LIMIT
        } else {
            false
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.blocked.contains(&pos)
    }

    pub fn occupants_at(&self, pos: Pos) -> u32 {
        self.occupants.get(&pos).copied().unwrap_or(0)
    }

    pub fn avatar(&self) -> Pos {
        self.avatar
    }

    pub fn blocked_len(&self) -> usize {
        self.blocked.len()
    }

    pub fn vacate(&mut self, pos: Pos) {
        if let Some(count) = self.occupants.get_mut(&pos) {
            *count -= 1;
            if *count == 0 {
                self.occupants.remove(&pos);
            }
        }
        self.reevaluate(pos);
    }

    pub fn occupy(&mut self, pos: Pos) {
        *self.occupants.entry(pos).or_default() += 1;
        self.reevaluate(pos);
    }

    fn reevaluate(&mut self, pos: Pos) {
        let blocked = pos == self.avatar
            || Self::blocks(pos.manhattan(self.avatar), self.occupants_at(pos));
        if blocked {
            self.blocked.insert(pos);
        } else {
            self.blocked.remove(&pos);
        }
    }
}
