//! Boss attack strategies and the meteor-rain area effect.
//!
//! Each strategy is a self-contained, resettable sub-state-machine expressed
//! as plain data: a tagged union with an explicit step function per variant.
//! Phases progress strictly forward until `is_finished`; a `damage_dealt`
//! guard makes every area attack fire its damage check at most once per
//! activation, and a miss is never retried.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::behavior::PlayerView;
use crate::geometry::Aabb;

/// An effect a strategy asks the world to apply this tick
#[derive(Debug, Clone, PartialEq)]
pub enum BossEffect {
    /// One-shot area damage check against the player
    AreaDamage { area: Aabb, damage: f32 },
    /// Start an independent meteor rain centered on `center`
    SummonMeteors { center: Vec2 },
}

/// Tuning for the smash attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmashParams {
    pub windup: f32,
    pub hold: f32,
    pub recover: f32,
    pub damage: f32,
    /// Half-extent of the square impact area around the boss
    pub radius: f32,
    /// Nominal impact duration at the start of the hold; the strike itself
    /// lands on the first hold tick whatever the step size
    pub impact_window: f32,
}

impl Default for SmashParams {
    fn default() -> Self {
        Self {
            windup: 0.6,
            hold: 1.8,
            recover: 0.7,
            damage: 25.0,
            radius: 90.0,
            impact_window: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmashPhase {
    Windup,
    Hold,
    Recover,
    Done,
}

/// Windup, a long hold with a single impact at its start, then recovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmashAttack {
    pub params: SmashParams,
    pub phase: SmashPhase,
    pub timer: f32,
    pub damage_dealt: bool,
}

impl SmashAttack {
    pub fn new(params: SmashParams) -> Self {
        Self {
            params,
            phase: SmashPhase::Windup,
            timer: 0.0,
            damage_dealt: false,
        }
    }

    pub fn reset(&mut self) {
        self.phase = SmashPhase::Windup;
        self.timer = 0.0;
        self.damage_dealt = false;
    }

    pub fn execute(&mut self, dt: f32, boss_pos: Vec2) -> Option<BossEffect> {
        self.timer += dt;
        match self.phase {
            SmashPhase::Windup => {
                if self.timer >= self.params.windup {
                    self.phase = SmashPhase::Hold;
                    self.timer = 0.0;
                }
                None
            }
            SmashPhase::Hold => {
                let mut effect = None;
                if !self.damage_dealt {
                    self.damage_dealt = true;
                    let size = Vec2::splat(self.params.radius * 2.0);
                    effect = Some(BossEffect::AreaDamage {
                        area: Aabb::from_center_size(boss_pos, size),
                        damage: self.params.damage,
                    });
                }
                if self.timer >= self.params.hold {
                    self.phase = SmashPhase::Recover;
                    self.timer = 0.0;
                }
                effect
            }
            SmashPhase::Recover => {
                if self.timer >= self.params.recover {
                    self.phase = SmashPhase::Done;
                }
                None
            }
            SmashPhase::Done => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SmashPhase::Done
    }
}

/// Tuning for the meteor attack and the rain it summons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteorParams {
    /// Casting time before the rain is summoned
    pub cast_time: f32,
    pub count: usize,
    /// Meteors land within this radius of the summon center
    pub spread_radius: f32,
    pub fall_speed: f32,
    /// Height above the target from which each meteor falls
    pub spawn_height: f32,
    pub damage: f32,
    pub explosion_radius: f32,
    /// How long an explosion lingers before the meteor is purged
    pub explosion_duration: f32,
}

impl Default for MeteorParams {
    fn default() -> Self {
        Self {
            cast_time: 1.2,
            count: 6,
            spread_radius: 140.0,
            fall_speed: 320.0,
            spawn_height: 260.0,
            damage: 18.0,
            explosion_radius: 36.0,
            explosion_duration: 0.4,
        }
    }
}

/// Single casting timer; on elapse the rain is summoned and the strategy
/// finishes immediately. The rain itself outlives the strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteorAttack {
    pub params: MeteorParams,
    pub timer: f32,
    pub cast: bool,
}

impl MeteorAttack {
    pub fn new(params: MeteorParams) -> Self {
        Self {
            params,
            timer: 0.0,
            cast: false,
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.cast = false;
    }

    pub fn execute(&mut self, dt: f32, player: &PlayerView) -> Option<BossEffect> {
        if self.cast {
            return None;
        }
        self.timer += dt;
        if self.timer >= self.params.cast_time {
            self.cast = true;
            return Some(BossEffect::SummonMeteors {
                center: player.position,
            });
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.cast
    }
}

/// One boss attack pattern, dispatched without heap-allocated strategy objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttackStrategy {
    Smash(SmashAttack),
    Meteor(MeteorAttack),
}

impl AttackStrategy {
    pub fn reset(&mut self) {
        match self {
            AttackStrategy::Smash(smash) => smash.reset(),
            AttackStrategy::Meteor(meteor) => meteor.reset(),
        }
    }

    pub fn execute(&mut self, dt: f32, boss_pos: Vec2, player: &PlayerView) -> Option<BossEffect> {
        match self {
            AttackStrategy::Smash(smash) => smash.execute(dt, boss_pos),
            AttackStrategy::Meteor(meteor) => meteor.execute(dt, player),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            AttackStrategy::Smash(smash) => smash.is_finished(),
            AttackStrategy::Meteor(meteor) => meteor.is_finished(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeteorState {
    Falling,
    Exploding,
}

/// One falling projectile of a meteor rain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub position: Vec2,
    /// Height at which the meteor detonates
    pub target_y: f32,
    pub state: MeteorState,
    pub timer: f32,
    pub damage_dealt: bool,
}

/// Independent area-effect spawner started by the meteor strategy.
///
/// Each meteor falls at constant speed toward its target height, explodes on
/// arrival (damaging at most once, only if the player overlaps the blast the
/// instant it begins) and is purged once its explosion period elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteorRain {
    pub meteors: Vec<Meteor>,
    params: MeteorParams,
}

impl MeteorRain {
    pub fn new(center: Vec2, params: MeteorParams, rng: &mut impl Rng) -> Self {
        let meteors = (0..params.count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let offset =
                    Vec2::new(angle.cos(), angle.sin()) * rng.random_range(0.0..params.spread_radius);
                let target = center + offset;
                Meteor {
                    position: Vec2::new(target.x, target.y - params.spawn_height),
                    target_y: target.y,
                    state: MeteorState::Falling,
                    timer: 0.0,
                    damage_dealt: false,
                }
            })
            .collect();
        Self { meteors, params }
    }

    /// Advance every meteor; returns the area-damage checks to apply this tick.
    pub fn update(&mut self, dt: f32) -> Vec<BossEffect> {
        let mut effects = Vec::new();
        for meteor in &mut self.meteors {
            match meteor.state {
                MeteorState::Falling => {
                    meteor.position.y += self.params.fall_speed * dt;
                    if meteor.position.y >= meteor.target_y {
                        meteor.position.y = meteor.target_y;
                        meteor.state = MeteorState::Exploding;
                        meteor.timer = 0.0;
                        if !meteor.damage_dealt {
                            meteor.damage_dealt = true;
                            let size = Vec2::splat(self.params.explosion_radius * 2.0);
                            effects.push(BossEffect::AreaDamage {
                                area: Aabb::from_center_size(meteor.position, size),
                                damage: self.params.damage,
                            });
                        }
                    }
                }
                MeteorState::Exploding => {
                    meteor.timer += dt;
                }
            }
        }
        let explosion_duration = self.params.explosion_duration;
        self.meteors
            .retain(|m| !(m.state == MeteorState::Exploding && m.timer >= explosion_duration));
        effects
    }

    /// All meteors exploded and expired
    pub fn is_done(&self) -> bool {
        self.meteors.is_empty()
    }
}
