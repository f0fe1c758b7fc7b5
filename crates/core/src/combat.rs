//! Centralized damage queue resolved once per tick.

mod health;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::trace;

use crate::types::EntityId;

pub use health::{DeathCallback, HealthComponent, HitOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Avatar,
    Actor(EntityId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    pub target: Target,
    pub source: Option<Target>,
    pub amount: i32,
}

pub trait HealthLookup {
    fn health_mut(&mut self, target: Target) -> Option<&mut HealthComponent>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedHit {
    pub target: Target,
    pub source: Option<Target>,
    pub requested: i32,
    pub outcome: HitOutcome,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub hits: Vec<AppliedHit>,
    pub deaths: Vec<Target>,
    pub dropped: usize,
}

impl CombatReport {
    pub fn damage_dealt(&self) -> i32 {
        self.hits.iter().map(|hit| hit.outcome.dealt()).sum()
    }
}

#[derive(Debug, Default)]
pub struct CombatService {
    queue: VecDeque<DamageEvent>,
    tracked: BTreeSet<Target>,
}

impl CombatService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: Target) {
        self.tracked.insert(target);
    }

    pub fn unregister(&mut self, target: Target) {
        self.tracked.remove(&target);
    }

    pub fn is_tracked(&self, target: Target) -> bool {
        self.tracked.contains(&target)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_damage(&mut self, target: Target, source: Option<Target>, amount: i32) {
        self.queue.push_back(DamageEvent { target, source, amount: amount.max(0) });
    }

    /// Counts down every tracked invulnerability window, then resolves exactly the events that
    /// were queued before this call. Events for the same target resolve together as one batch.
    pub fn tick(&mut self, world: &mut impl HealthLookup) -> CombatReport {
        for &target in &self.tracked {
            if let Some(health) = world.health_mut(target) {
                health.tick_invulnerability();
            }
        }

        let drained: Vec<DamageEvent> = self.queue.drain(..).collect();
        let mut order = Vec::new();
        let mut grouped: BTreeMap<Target, Vec<DamageEvent>> = BTreeMap::new();
        for event in drained {
            let group = grouped.entry(event.target).or_default();
            if group.is_empty() {
                order.push(event.target);
            }
            group.push(event);
        }

        let mut report = CombatReport::default();
        for target in order {
            let events = grouped.remove(&target).unwrap_or_default();
            let Some(health) = world.health_mut(target) else {
                trace!(?target, events = events.len(), "dropping damage for missing target");
                report.dropped += events.len();
                continue;
            };
            let amounts: Vec<i32> = events.iter().map(|event| event.amount).collect();
            let outcomes = health.damage_batch(&amounts, target);
            for (event, outcome) in events.into_iter().zip(outcomes) {
                trace!(?target, source = ?event.source, amount = event.amount, ?outcome, "damage");
                if outcome.is_lethal() {
                    report.deaths.push(target);
                }
                report.hits.push(AppliedHit {
                    target,
                    source: event.source,
                    requested: event.amount,
                    outcome,
                });
            }
        }
        report
    }
}
