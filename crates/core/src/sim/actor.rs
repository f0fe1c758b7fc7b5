//! Hostile actor: position, health, AI state and pacing counters.

use crate::combat::{HealthComponent, Target};
use crate::types::{Direction, EntityId, Pos};

use super::behavior::{AiState, WorldView, facing_toward, in_strike_reach, seek_step};

pub const ANIMATION_INTERVAL: u32 = 3;
pub const ANIMATION_FRAMES: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorAction {
    Resting,
    Waited,
    Moved(Direction),
    Stalled,
    Attacked,
}

#[derive(Debug)]
pub struct Actor {
    id: EntityId,
    pos: Pos,
    facing: Direction,
    health: HealthComponent,
    state: AiState,
    desired: Option<Direction>,
    step_clock: u32,
    animation_clock: u32,
    animation_frame: u32,
    velocity: (i32, i32),
}

impl Actor {
    pub fn new(id: EntityId, pos: Pos, health: HealthComponent) -> Self {
        let mut actor = Self {
            id,
            pos,
            facing: Direction::default(),
            health,
            state: AiState::Idle,
            desired: None,
            step_clock: 0,
            animation_clock: 0,
            animation_frame: 0,
            velocity: (0, 0),
        };
        actor.on_enter_state();
        actor
    }

    pub fn id(&self) -> EntityId {
        self.id
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

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn desired(&self) -> Option<Direction> {
        self.desired
    }

    pub fn animation_frame(&self) -> u32 {
        self.animation_frame
    }

    pub fn velocity(&self) -> (i32, i32) {
        self.velocity
    }

    pub fn tick(&mut self, view: &mut WorldView<'_>, step_interval: u32) -> ActorAction {
        self.advance_animation();

        self.step_clock += 1;
        if self.step_clock < step_interval {
            return ActorAction::Resting;
        }
        self.step_clock = 0;

        let avatar = view.avatar_pos();
        let next_state = AiState::for_distance(self.pos.manhattan(avatar));
        if next_state != self.state {
            self.state = next_state;
            self.on_enter_state();
        }

        self.desired = None;
        match self.state {
            AiState::Idle => {
                self.velocity = (0, 0);
                ActorAction::Waited
            }
            AiState::Attack => {
                if !in_strike_reach(self.pos, avatar) {
                    return ActorAction::Waited;
                }
                self.facing = facing_toward(self.pos, avatar, self.facing);
                view.strike_avatar(Target::Actor(self.id));
                ActorAction::Attacked
            }
            AiState::Seek => {
                self.desired = seek_step(self.pos, view);
                match self.desired {
                    Some(direction) => self.try_step(direction, view),
                    None => ActorAction::Stalled,
                }
            }
        }
    }

    fn try_step(&mut self, direction: Direction, view: &WorldView<'_>) -> ActorAction {
        let next = self.pos.step(direction);
        if !view.can_enter(next) {
            return ActorAction::Stalled;
        }
        self.pos = next;
        self.facing = direction;
        self.velocity = direction.delta();
        ActorAction::Moved(direction)
    }

    fn on_enter_state(&mut self) {
        self.desired = None;
        self.animation_clock = 0;
        self.animation_frame = 0;
        if self.state == AiState::Idle {
            self.velocity = (0, 0);
        }
    }

    fn advance_animation(&mut self) {
        self.animation_clock += 1;
        if self.animation_clock >= ANIMATION_INTERVAL {
            self.animation_clock = 0;
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
        }
    }
}
