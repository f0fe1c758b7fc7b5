//! Simulation driver. One tick builds occupancy, runs every actor in spawn order, resolves
//! combat and then settles deaths. The grid is never written after construction.

use slotmap::SlotMap;
use tracing::debug;

use crate::combat::{CombatReport, CombatService, HealthComponent, HealthLookup, Target};
use crate::config::{ConfigError, SimConfig, WorldConfig};
use crate::grid::Grid;
use crate::mapgen::{DungeonGenerator, GenRng, SpawnRequest, spawn_positions};
use crate::types::{Direction, EntityId, Pos};

use super::actor::{Actor, ActorAction};
use super::avatar::Avatar;
use super::behavior::WorldView;
use super::occupancy::OccupancySet;

pub type DeathHandler = Box<dyn FnMut(&Actor)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corpse {
    pub actor: EntityId,
    pub pos: Pos,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub moved: usize,
    pub stalled: usize,
    pub attacks: usize,
    pub combat: CombatReport,
    pub killed: Vec<EntityId>,
    pub avatar_died: bool,
    pub avatar_respawned: bool,
}

pub struct Simulation {
    grid: Grid,
    config: SimConfig,
    avatar: Avatar,
    actors: SlotMap<EntityId, Actor>,
    spawn_order: Vec<EntityId>,
    combat: CombatService,
    corpses: Vec<Corpse>,
    death_handler: Option<DeathHandler>,
    tick: u64,
}

struct Bodies<'a> {
    avatar: &'a mut Avatar,
    actors: &'a mut SlotMap<EntityId, Actor>,
}

impl HealthLookup for Bodies<'_> {
    fn health_mut(&mut self, target: Target) -> Option<&mut HealthComponent> {
        match target {
            Target::Avatar => Some(self.avatar.health_mut()),
            Target::Actor(id) => self.actors.get_mut(id).map(Actor::health_mut),
        }
    }
}

impl Simulation {
    pub fn new(seed: i64, config: &WorldConfig) -> Result<Self, ConfigError> {
        config.simulation.validate()?;
        let generator = DungeonGenerator::new(config.generator.clone())?;
        let dungeon = generator.generate(seed);
        Ok(Self::populated(dungeon.grid, seed, config.simulation.clone()))
    }

    pub fn populated(grid: Grid, seed: i64, config: SimConfig) -> Self {
        let spawn = grid.first_floor().unwrap_or_default();
        let mut sim = Self::with_avatar(grid, spawn, config);

        let request = SpawnRequest {
            count: sim.config.npc_count,
            attempts: sim.config.spawn_attempts,
            avoid: spawn,
            avoid_radius: sim.config.spawn_avoid_radius,
        };
        let mut rng = GenRng::npc_stream(seed);
        for pos in spawn_positions(&sim.grid, &mut rng, &request) {
            sim.spawn_actor(pos);
        }
        debug!(seed, actors = sim.actors.len(), ?spawn, "simulation populated");
        sim
    }

    pub fn with_avatar(grid: Grid, avatar_pos: Pos, config: SimConfig) -> Self {
        let health = HealthComponent::full(
            config.avatar_max_health,
            config.avatar_armor,
            config.avatar_invulnerability_ticks,
        );
        let avatar = Avatar::new(avatar_pos, health, config.avatar_lives);
        let mut combat = CombatService::new();
        combat.register(Target::Avatar);
        Self {
            grid,
            config,
            avatar,
            actors: SlotMap::with_key(),
            spawn_order: Vec::new(),
            combat,
            corpses: Vec::new(),
            death_handler: None,
            tick: 0,
        }
    }

    pub fn spawn_actor(&mut self, pos: Pos) -> EntityId {
        let health = HealthComponent::full(
            self.config.npc_max_health,
            self.config.npc_armor,
            self.config.npc_invulnerability_ticks,
        );
        let id = self.actors.insert_with_key(|id| Actor::new(id, pos, health));
        self.combat.register(Target::Actor(id));
        self.spawn_order.push(id);
        id
    }

    pub fn set_death_handler(&mut self, handler: impl FnMut(&Actor) + 'static) {
        self.death_handler = Some(Box::new(handler));
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.spawn_order.iter().filter_map(|&id| self.actors.get(id))
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn corpses(&self) -> &[Corpse] {
        &self.corpses
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn queue_damage(&mut self, target: Target, source: Option<Target>, amount: i32) {
        self.combat.queue_damage(target, source, amount);
    }

    pub fn try_move_avatar(&mut self, direction: Direction) -> bool {
        if self.avatar.is_defeated() {
            return false;
        }
        self.avatar.face(direction);
        let target = self.avatar.pos().step(direction);
        if !self.grid.is_walkable(target) || self.actors.values().any(|actor| actor.pos() == target)
        {
            return false;
        }
        self.avatar.move_to(target);
        true
    }

    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport { tick: self.tick, ..TickReport::default() };

        let avatar_pos = self.avatar.pos();
        let mut occupancy = OccupancySet::build(
            avatar_pos,
            self.spawn_order.iter().filter_map(|&id| self.actors.get(id)).map(Actor::pos),
        );

        for &id in &self.spawn_order {
            let Some(actor) = self.actors.get_mut(id) else {
                continue;
            };
            occupancy.vacate(actor.pos());
            let mut view = WorldView::new(
                &self.grid,
                avatar_pos,
                &occupancy,
                &mut self.combat,
                self.config.attack_damage,
            );
            let action = actor.tick(&mut view, self.config.step_interval);
            occupancy.occupy(actor.pos());

            match action {
                ActorAction::Moved(_) => report.moved += 1,
                ActorAction::Stalled => report.stalled += 1,
                ActorAction::Attacked => report.attacks += 1,
                ActorAction::Resting | ActorAction::Waited => {}
            }
        }

        let mut bodies = Bodies { avatar: &mut self.avatar, actors: &mut self.actors };
        report.combat = self.combat.tick(&mut bodies);

        let deaths = report.combat.deaths.clone();
        for target in deaths {
            match target {
                Target::Avatar => {
                    report.avatar_died = true;
                    report.avatar_respawned = self.avatar.lose_life();
                    debug!(
                        lives = self.avatar.lives(),
                        respawned = report.avatar_respawned,
                        "avatar died"
                    );
                }
                Target::Actor(id) => {
                    if self.remove_dead_actor(id) {
                        report.killed.push(id);
                    }
                }
            }
        }
        report
    }

    fn remove_dead_actor(&mut self, id: EntityId) -> bool {
        let Some(actor) = self.actors.remove(id) else {
            return false;
        };
        self.spawn_order.retain(|&other| other != id);
        self.combat.unregister(Target::Actor(id));
        self.corpses.push(Corpse { actor: id, pos: actor.pos() });
        debug!(?id, pos = ?actor.pos(), tick = self.tick, "actor died");
        if let Some(handler) = self.death_handler.as_mut() {
            handler(&actor);
        }
        true
    }
}
