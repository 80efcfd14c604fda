//! The player entity.
//!
//! The core does not capture input; a host feeds it a `MoveIntent` per tick.
//! Attack and dodge are small timer machines: the attack hitbox is live only
//! inside a fixed sub-window of the attack timer, and the dodge grants full
//! immunity for its duration. Actions that cannot fire (cooldown, missing
//! stamina) are silent no-ops.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use murkwood_creature::creature::DamageOutcome;
use murkwood_creature::geometry::Aabb;
use murkwood_creature::behavior::PlayerView;
use murkwood_creature::types::{Facing, Health};

use crate::config::PlayerConfig;

/// Per-tick movement and action intent from the host
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    /// Desired steering direction (need not be normalized)
    pub direction: Vec2,
    pub attack: bool,
    pub dodge: bool,
}

/// Which requested actions actually started this tick
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentOutcome {
    pub attacked: bool,
    pub dodged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub health: Health,
    pub stamina: f32,
    pub invulnerability_timer: f32,

    /// Counts up while an attack is active
    attack_timer: f32,
    attacking: bool,
    attack_cooldown_timer: f32,

    /// Counts down; positive means dodging
    dodge_timer: f32,
    dodge_cooldown_timer: f32,
    dodge_direction: Vec2,

    config: PlayerConfig,
}

impl Player {
    pub fn new(config: PlayerConfig, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            health: Health::new(config.max_health),
            stamina: config.max_stamina,
            invulnerability_timer: 0.0,
            attack_timer: 0.0,
            attacking: false,
            attack_cooldown_timer: 0.0,
            dodge_timer: 0.0,
            dodge_cooldown_timer: 0.0,
            dodge_direction: Vec2::X,
            config,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Steer and start requested actions. Dodging overrides steering.
    pub fn apply_intent(&mut self, intent: &MoveIntent) -> IntentOutcome {
        let mut outcome = IntentOutcome::default();

        if !self.is_dodging() {
            self.velocity = intent.direction.normalize_or_zero() * self.config.move_speed;
            if !self.attacking {
                if let Some(facing) = Facing::from_horizontal(self.velocity.x) {
                    self.facing = facing;
                }
            }
        }
        if intent.attack {
            outcome.attacked = self.try_attack();
        }
        if intent.dodge {
            outcome.dodged = self.try_dodge(intent.direction);
        }
        outcome
    }

    /// Start an attack unless one is active or on cooldown
    pub fn try_attack(&mut self) -> bool {
        if self.attacking || self.attack_cooldown_timer > 0.0 || self.health.is_dead() {
            return false;
        }
        self.attacking = true;
        self.attack_timer = 0.0;
        self.attack_cooldown_timer = self.config.attack_cooldown;
        true
    }

    /// Start a dodge unless on cooldown or out of stamina
    pub fn try_dodge(&mut self, direction: Vec2) -> bool {
        if self.is_dodging()
            || self.dodge_cooldown_timer > 0.0
            || self.stamina < self.config.dodge_stamina_cost
            || self.health.is_dead()
        {
            return false;
        }
        self.stamina -= self.config.dodge_stamina_cost;
        self.dodge_timer = self.config.dodge_duration;
        self.dodge_cooldown_timer = self.config.dodge_cooldown;
        self.dodge_direction = direction
            .try_normalize()
            .unwrap_or(Vec2::new(self.facing.sign(), 0.0));
        true
    }

    /// Advance timers, regenerate stamina, integrate movement
    pub fn update(&mut self, dt: f32) {
        self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);
        self.attack_cooldown_timer = (self.attack_cooldown_timer - dt).max(0.0);
        self.dodge_cooldown_timer = (self.dodge_cooldown_timer - dt).max(0.0);
        self.stamina = (self.stamina + self.config.stamina_regen_per_sec * dt)
            .min(self.config.max_stamina);

        if self.attacking {
            self.attack_timer += dt;
            if self.attack_timer >= self.config.attack_duration {
                self.attacking = false;
            }
        }

        if self.dodge_timer > 0.0 {
            self.dodge_timer = (self.dodge_timer - dt).max(0.0);
            self.velocity = self.dodge_direction * self.config.dodge_speed;
        }

        self.position += self.velocity * dt;
    }

    pub fn is_dodging(&self) -> bool {
        self.dodge_timer > 0.0
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Apply damage. Dodging grants full immunity; each landed hit opens a
    /// short invulnerability window.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.health.is_dead() || self.is_dodging() || self.invulnerability_timer > 0.0 {
            return DamageOutcome::Ignored;
        }
        if self.health.take_damage(amount) {
            self.velocity = Vec2::ZERO;
            DamageOutcome::Died
        } else {
            self.invulnerability_timer = self.config.hit_invulnerability;
            DamageOutcome::Hurt {
                remaining: self.health.current,
            }
        }
    }

    /// Damage that bypasses the post-hit window: continuous contact, and
    /// same-tick volleys where every attacker's hit counts. Dodging and
    /// death still grant immunity. Never opens the window itself; volley
    /// callers arm it once via [`start_hit_invulnerability`](Self::start_hit_invulnerability).
    pub fn take_unguarded_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.health.is_dead() || self.is_dodging() {
            return DamageOutcome::Ignored;
        }
        if self.health.take_damage(amount) {
            self.velocity = Vec2::ZERO;
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt {
                remaining: self.health.current,
            }
        }
    }

    /// Open the post-hit immunity window
    pub fn start_hit_invulnerability(&mut self) {
        self.invulnerability_timer = self.config.hit_invulnerability;
    }

    pub fn body_aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.config.body_size)
    }

    /// Attack hitbox, live only inside the configured hit window
    pub fn attack_hitbox(&self) -> Option<Aabb> {
        if !self.attacking
            || self.attack_timer < self.config.attack_hit_start
            || self.attack_timer > self.config.attack_hit_end
        {
            return None;
        }
        let offset =
            self.facing.sign() * (self.config.body_size.x + self.config.attack_reach.x) * 0.5;
        let center = self.position + Vec2::new(offset, 0.0);
        Some(Aabb::from_center_size(center, self.config.attack_reach))
    }

    /// Read-only snapshot for creature AI
    pub fn as_view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            body: self.body_aabb(),
        }
    }
}
