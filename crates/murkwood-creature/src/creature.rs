//! The shared creature state machine.
//!
//! Every creature is the same record parameterized by a species descriptor.
//! `update` advances timers and integrates movement; the per-species
//! transition function lives in [`crate::behavior`] and runs right after.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::species::{SpeciesDescriptor, SpeciesKind};
use crate::types::{EntityId, Facing, Health};

/// Behavior state of a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatureState {
    Idle,
    Wander,
    Chase,
    PrepareAttack,
    Attacking,
    Cooldown,
    Hurt,
    Dead,
}

/// What a call to `take_damage` actually did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was dead or inside an invulnerability window
    Ignored,
    Hurt { remaining: f32 },
    Died,
}

/// Wander bookkeeping (current target / retarget countdown)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WanderControl {
    pub target: Option<Vec2>,
    pub retarget_timer: f32,
}

/// A single autonomous creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: EntityId,
    pub kind: SpeciesKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Facing stays fixed during attack windup and execution
    pub facing_locked: bool,
    pub health: Health,
    pub state: CreatureState,
    /// Seconds spent in the current state
    pub state_timer: f32,
    /// Brief immunity after taking a hit
    pub invulnerability_timer: f32,
    pub wander: WanderControl,
}

impl Creature {
    /// Create a new creature of the given species
    pub fn new(kind: SpeciesKind, position: Vec2) -> Self {
        let descriptor = kind.descriptor();
        Self {
            id: EntityId::new(),
            kind,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            facing_locked: false,
            health: Health::new(descriptor.max_health),
            state: CreatureState::Wander,
            state_timer: 0.0,
            invulnerability_timer: 0.0,
            wander: WanderControl::default(),
        }
    }

    pub fn descriptor(&self) -> &'static SpeciesDescriptor {
        self.kind.descriptor()
    }

    /// Shared per-tick update: timers, movement integration, zone clamp.
    ///
    /// Dead creatures only advance their state timer; position and health
    /// are frozen.
    pub fn update(&mut self, dt: f32, world_bounds: Aabb) {
        self.state_timer += dt;
        if self.state == CreatureState::Dead {
            return;
        }

        self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);

        self.position += self.velocity * dt;
        self.position = world_bounds.clamp_point(self.position);
        self.position = self.descriptor().habitat.clamp(self.position);

        if !self.facing_locked {
            if let Some(facing) = Facing::from_horizontal(self.velocity.x) {
                self.facing = facing;
            }
        }
    }

    /// Apply damage to this creature.
    ///
    /// No-op while dead or invulnerable. Otherwise opens the species
    /// invulnerability window and transitions to Hurt, or to Dead when
    /// health reaches zero.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.state == CreatureState::Dead || self.invulnerability_timer > 0.0 {
            return DamageOutcome::Ignored;
        }

        let died = self.health.take_damage(amount);
        self.facing_locked = false;
        if died {
            self.velocity = Vec2::ZERO;
            self.set_state(CreatureState::Dead);
            log::debug!("{} ({}) died", self.id, self.kind.name());
            DamageOutcome::Died
        } else {
            self.invulnerability_timer = self.descriptor().invulnerability_window;
            self.velocity = Vec2::ZERO;
            self.set_state(CreatureState::Hurt);
            DamageOutcome::Hurt {
                remaining: self.health.current,
            }
        }
    }

    /// Switch state and restart the state timer
    pub fn set_state(&mut self, state: CreatureState) {
        self.state = state;
        self.state_timer = 0.0;
    }

    pub fn body_aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.descriptor().body_size)
    }

    /// Attack hitbox, live only inside the species hit window.
    ///
    /// Returns `None` (zero area) in every other state or timer range.
    pub fn attack_hitbox(&self) -> Option<Aabb> {
        let d = self.descriptor();
        if self.state != CreatureState::Attacking
            || self.state_timer < d.hit_start
            || self.state_timer > d.hit_end
        {
            return None;
        }
        let offset = self.facing.sign() * (d.body_size.x + d.attack_reach.x) * 0.5;
        let center = self.position + Vec2::new(offset, 0.0);
        Some(Aabb::from_center_size(center, d.attack_reach))
    }

    pub fn is_dead(&self) -> bool {
        self.state == CreatureState::Dead
    }

    /// Dead and the death animation period has elapsed
    pub fn ready_for_removal(&self) -> bool {
        self.is_dead() && self.state_timer >= self.descriptor().death_duration
    }
}
