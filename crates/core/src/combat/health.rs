//! Health pool with flat armor, invulnerability frames and death subscribers.

use std::fmt;

use super::Target;

pub type DeathCallback = Box<dyn FnMut(Target)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Ignored,
    Absorbed,
    Dealt { amount: i32, lethal: bool },
}

impl HitOutcome {
    pub fn dealt(self) -> i32 {
        match self {
            HitOutcome::Dealt { amount, .. } => amount,
            HitOutcome::Ignored | HitOutcome::Absorbed => 0,
        }
    }

    pub fn is_lethal(self) -> bool {
        matches!(self, HitOutcome::Dealt { lethal: true, .. })
    }
}

pub struct HealthComponent {
    current: i32,
    max: i32,
    armor: i32,
    invulnerability_duration: u32,
    invulnerable_ticks: u32,
    on_death: Vec<DeathCallback>,
}

impl HealthComponent {
    pub fn new(current: i32, max: i32, armor: i32, invulnerability_duration: u32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
            armor: armor.max(0),
            invulnerability_duration,
            invulnerable_ticks: 0,
            on_death: Vec::new(),
        }
    }

    pub fn full(max: i32, armor: i32, invulnerability_duration: u32) -> Self {
        Self::new(max, max, armor, invulnerability_duration)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn armor(&self) -> i32 {
        self.armor
    }

    pub fn invulnerable_ticks(&self) -> u32 {
        self.invulnerable_ticks
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    pub fn add_death_callback(&mut self, callback: impl FnMut(Target) + 'static) {
        self.on_death.push(Box::new(callback));
    }

    pub fn damage(&mut self, amount: i32, owner: Target) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        let outcome = self.apply_hit(amount, owner);
        if outcome != HitOutcome::Ignored {
            self.start_invulnerability();
        }
        matches!(outcome, HitOutcome::Dealt { .. })
    }

    /// Applies every hit that arrived in the same tick. Invulnerability is checked once
    /// for the whole batch and the window starts once, so simultaneous hits all land.
    pub fn damage_batch(&mut self, amounts: &[i32], owner: Target) -> Vec<HitOutcome> {
        if self.is_invulnerable() {
            return vec![HitOutcome::Ignored; amounts.len()];
        }
        let outcomes: Vec<HitOutcome> =
            amounts.iter().map(|&amount| self.apply_hit(amount, owner)).collect();
        if outcomes.iter().any(|&outcome| outcome != HitOutcome::Ignored) {
            self.start_invulnerability();
        }
        outcomes
    }

    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 || self.is_depleted() {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    pub fn tick_invulnerability(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
        self.invulnerable_ticks = 0;
    }

    fn apply_hit(&mut self, amount: i32, owner: Target) -> HitOutcome {
        if amount <= 0 || self.is_depleted() {
            return HitOutcome::Ignored;
        }
        let reduced = (amount - self.armor).max(0);
        if reduced == 0 {
            return HitOutcome::Absorbed;
        }
        let before = self.current;
        self.current = (self.current - reduced).max(0);
        let lethal = self.current == 0;
        if lethal {
            for callback in &mut self.on_death {
                callback(owner);
            }
        }
        HitOutcome::Dealt { amount: before - self.current, lethal }
    }

    fn start_invulnerability(&mut self) {
        self.invulnerable_ticks = self.invulnerability_duration;
    }
}

impl fmt::Debug for HealthComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthComponent")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("armor", &self.armor)
            .field("invulnerability_duration", &self.invulnerability_duration)
            .field("invulnerable_ticks", &self.invulnerable_ticks)
            .field("death_callbacks", &self.on_death.len())
            .finish()
    }
}
