//! The boss: a distinguished at-most-one creature driven by an attack
//! director instead of the shared species state machine.
//!
//! The director is a two-phase machine: Idle accumulates time, then one of
//! the enabled attack strategies is selected uniformly, reset and run until
//! it reports finished.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attacks::{
    AttackStrategy, BossEffect, MeteorAttack, MeteorParams, SmashAttack, SmashParams,
};
use crate::behavior::PlayerView;
use crate::creature::DamageOutcome;
use crate::geometry::Aabb;
use crate::types::{EntityId, Health};

/// Director phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Idle,
    Attacking,
}

/// Tuning for one boss instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossParams {
    pub max_health: f32,
    pub contact_damage_per_sec: f32,
    pub contact_push_force: f32,
    pub body_size: Vec2,
    /// Idle time before the next attack is selected
    pub idle_threshold: f32,
    pub invulnerability_window: f32,
    pub smash: SmashParams,
    pub meteor: MeteorParams,
}

impl Default for BossParams {
    fn default() -> Self {
        Self {
            max_health: 600.0,
            contact_damage_per_sec: 10.0,
            contact_push_force: 220.0,
            body_size: Vec2::new(48.0, 56.0),
            idle_threshold: 2.5,
            invulnerability_window: 0.2,
            smash: SmashParams::default(),
            meteor: MeteorParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: EntityId,
    pub position: Vec2,
    pub health: Health,
    pub contact_damage_per_sec: f32,
    pub contact_push_force: f32,
    pub body_size: Vec2,
    pub phase: BossPhase,
    pub idle_timer: f32,
    pub idle_threshold: f32,
    pub invulnerability_timer: f32,
    invulnerability_window: f32,
    strategies: Vec<AttackStrategy>,
    active: Option<usize>,
}

impl Boss {
    pub fn new(position: Vec2, params: BossParams) -> Self {
        let strategies = vec![
            AttackStrategy::Smash(SmashAttack::new(params.smash.clone())),
            AttackStrategy::Meteor(MeteorAttack::new(params.meteor.clone())),
        ];
        Self {
            id: EntityId::new(),
            position,
            health: Health::new(params.max_health),
            contact_damage_per_sec: params.contact_damage_per_sec,
            contact_push_force: params.contact_push_force,
            body_size: params.body_size,
            phase: BossPhase::Idle,
            idle_timer: 0.0,
            idle_threshold: params.idle_threshold,
            invulnerability_timer: 0.0,
            invulnerability_window: params.invulnerability_window,
            strategies,
            active: None,
        }
    }

    /// One director step. Returns the effects the world must apply this tick.
    pub fn update(&mut self, dt: f32, player: &PlayerView, rng: &mut impl Rng) -> Vec<BossEffect> {
        self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);

        match self.phase {
            BossPhase::Idle => {
                self.idle_timer += dt;
                if self.idle_timer >= self.idle_threshold && !self.strategies.is_empty() {
                    let index = rng.random_range(0..self.strategies.len());
                    self.strategies[index].reset();
                    self.active = Some(index);
                    self.idle_timer = 0.0;
                    self.phase = BossPhase::Attacking;
                    log::debug!("boss {} starts attack {}", self.id, index);
                }
                Vec::new()
            }
            BossPhase::Attacking => {
                let Some(index) = self.active else {
                    self.phase = BossPhase::Idle;
                    return Vec::new();
                };
                let mut effects = Vec::new();
                if let Some(effect) = self.strategies[index].execute(dt, self.position, player) {
                    effects.push(effect);
                }
                if self.strategies[index].is_finished() {
                    self.active = None;
                    self.phase = BossPhase::Idle;
                }
                effects
            }
        }
    }

    /// Apply damage; bosses get a very short immunity window per hit.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.health.is_dead() || self.invulnerability_timer > 0.0 {
            return DamageOutcome::Ignored;
        }
        if self.health.take_damage(amount) {
            DamageOutcome::Died
        } else {
            self.invulnerability_timer = self.invulnerability_window;
            DamageOutcome::Hurt {
                remaining: self.health.current,
            }
        }
    }

    pub fn body_aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.body_size)
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}
