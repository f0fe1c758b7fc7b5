//! Player stand-in with limited lives and a fixed respawn point.

use crate::combat::HealthComponent;
use crate::types::{Direction, Pos};

#[derive(Debug)]
pub struct Avatar {
    pos: Pos,
    facing: Direction,
    health: HealthComponent,
    lives: u32,
    spawn: Pos,
}

impl Avatar {
    pub fn new(spawn: Pos, health: HealthComponent, lives: u32) -> Self {
        Self { pos: spawn, facing: Direction::default(), health, lives, spawn }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn health(&self) -> &HealthComponent {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut HealthComponent {
        &mut self.health
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn spawn_point(&self) -> Pos {
        self.spawn
    }

    pub fn set_spawn_point(&mut self, spawn: Pos) {
        self.spawn = spawn;
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0 && self.health.is_depleted()
    }

    pub(crate) fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    pub(crate) fn move_to(&mut self, pos: Pos) {
        self.pos = pos;
    }

    // The last death leaves the avatar where it fell.
    pub(crate) fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return false;
        }
        self.pos = self.spawn;
        self.health.restore_full();
        true
    }
}
