//! The per-tick orchestrator.
//!
//! `GameWorld` owns every entity and runs one fixed step per `tick` call in
//! a strict order: population, player, creatures, combat resolution, loot
//! rolls, corpse purge, boss director, meteor rains, loot aging, and the
//! final world-bounds clamp. The order is part of the contract; tests lean
//! on it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use murkwood_creature::attacks::{BossEffect, MeteorRain};
use murkwood_creature::behavior::ai_behavior;
use murkwood_creature::boss::{Boss, BossPhase};
use murkwood_creature::creature::Creature;

use crate::config::{ConfigError, GameConfig};
use crate::entity::{MoveIntent, Player};
use crate::pool::Pool;
use crate::world::combat::resolve_combat;
use crate::world::events::{GameEvent, SoundId, SoundSink};
use crate::world::loot::{roll_drop, LootDrop, PICKUP_RADIUS};
use crate::world::spawn::{SpawnManager, SpawnPointSource};

pub struct GameWorld {
    config: GameConfig,
    pub player: Player,
    pub creatures: Vec<Creature>,
    pub boss: Option<Boss>,
    meteor_rains: Vec<MeteorRain>,
    spawner: SpawnManager,
    spawn_points: Box<dyn SpawnPointSource>,
    loot: Pool<LootDrop>,
    events: Vec<GameEvent>,
    rng: Xoshiro256StarStar,
}

impl GameWorld {
    /// Build an empty world from validated configuration. The population
    /// starts at zero; call [`reset`](Self::reset) to seed it immediately.
    pub fn new(
        config: GameConfig,
        spawn_points: Box<dyn SpawnPointSource>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let spawner = SpawnManager::new(&config.spawns, config.ambient.clone(), &mut rng);
        let player = Player::new(config.player.clone(), Vec2::ZERO);
        let loot = Pool::new(config.loot.pool_initial, config.loot.pool_max);
        Ok(Self {
            config,
            player,
            creatures: Vec::new(),
            boss: None,
            meteor_rains: Vec::new(),
            spawner,
            spawn_points,
            loot,
            events: Vec::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance the world one fixed step and drain the tick's events
    pub fn tick(
        &mut self,
        dt: f32,
        intent: &MoveIntent,
        sounds: &mut dyn SoundSink,
    ) -> Vec<GameEvent> {
        let bounds = self.config.world.bounds();

        // Population
        let born = self
            .spawner
            .update(dt, &self.creatures, self.boss.is_some(), &mut self.rng);
        self.creatures.extend(born);

        // Player
        if !self.player.health.is_dead() {
            let outcome = self.player.apply_intent(intent);
            if outcome.attacked {
                sounds.play(SoundId::PlayerSwing);
            }
            if outcome.dodged {
                sounds.play(SoundId::PlayerDodge);
                self.events.push(GameEvent::StaminaChanged {
                    remaining: self.player.stamina,
                });
            }
        }
        self.player.update(dt);

        // Creatures: shared update then the species transition function
        let view = self.player.as_view();
        for creature in &mut self.creatures {
            creature.update(dt, bounds);
            ai_behavior(creature, dt, &view, &mut self.rng);
        }

        // Combat resolution
        resolve_combat(
            &mut self.player,
            &mut self.creatures,
            self.boss.as_mut(),
            dt,
            &mut self.events,
            sounds,
        );
        if self.boss.as_ref().is_some_and(Boss::is_dead) {
            let boss = self.boss.take().unwrap();
            self.events.push(GameEvent::BossDefeated {
                position: boss.position,
            });
            log::info!("boss {} defeated", boss.id);
        }

        // Loot rolls for this tick's deaths
        let deaths: Vec<_> = self
            .events
            .iter()
            .filter_map(|event| match event {
                GameEvent::CreatureDied { kind, position, .. } => Some((*kind, *position)),
                _ => None,
            })
            .collect();
        for (kind, position) in deaths {
            if let Some(loot_kind) = roll_drop(kind, &mut self.rng) {
                // A full pool simply skips the drop
                if let Some(handle) = self.loot.obtain() {
                    let drop = self.loot.get_mut(handle).unwrap();
                    drop.kind = loot_kind;
                    drop.position = position;
                    self.events.push(GameEvent::LootDropped {
                        kind: loot_kind,
                        position,
                    });
                }
            }
        }

        // Purge corpses whose death period elapsed
        self.creatures.retain(|c| !c.ready_for_removal());

        // Boss director
        if let Some(boss) = &mut self.boss {
            let was_idle = boss.phase == BossPhase::Idle;
            let effects = boss.update(dt, &view, &mut self.rng);
            if was_idle && boss.phase == BossPhase::Attacking {
                sounds.play(SoundId::BossRoar);
            }
            let meteor_params = self.config.boss.params.meteor.clone();
            for effect in effects {
                match effect {
                    BossEffect::AreaDamage { area, damage } => {
                        sounds.play(SoundId::BossSmash);
                        if area.overlaps(&self.player.body_aabb()) {
                            report_player_damage(
                                &mut self.player,
                                damage,
                                &mut self.events,
                                sounds,
                            );
                        }
                    }
                    BossEffect::SummonMeteors { center } => {
                        self.meteor_rains.push(MeteorRain::new(
                            center,
                            meteor_params.clone(),
                            &mut self.rng,
                        ));
                    }
                }
            }
        }

        // Meteor rains outlive the strategy that summoned them
        for rain in &mut self.meteor_rains {
            for effect in rain.update(dt) {
                if let BossEffect::AreaDamage { area, damage } = effect {
                    sounds.play(SoundId::MeteorExplosion);
                    if area.overlaps(&self.player.body_aabb()) {
                        report_player_damage(&mut self.player, damage, &mut self.events, sounds);
                    }
                }
            }
        }
        self.meteor_rains.retain(|rain| !rain.is_done());

        // Loot aging and pickup
        let lifetime = self.config.loot.lifetime;
        let player_pos = self.player.position;
        let mut picked = Vec::new();
        let mut expired = Vec::new();
        for (handle, drop) in self.loot.iter_in_use_mut() {
            drop.age += dt;
            if drop.position.distance(player_pos) <= PICKUP_RADIUS {
                picked.push((handle, drop.kind));
            } else if drop.age >= lifetime {
                expired.push(handle);
            }
        }
        for (handle, kind) in picked {
            self.loot.free(handle);
            self.events.push(GameEvent::LootPickedUp { kind });
            sounds.play(SoundId::LootPickup);
        }
        for handle in expired {
            self.loot.free(handle);
        }

        // The player never leaves the world
        self.player.position = bounds.clamp_point(self.player.position);

        std::mem::take(&mut self.events)
    }

    /// Place the boss at a random spawn point of the configured zone.
    /// Idempotent: a live boss is left alone. A zone with no points logs
    /// and skips.
    pub fn spawn_boss(&mut self) -> bool {
        if self.boss.is_some() {
            return false;
        }
        let zone = self.config.boss.zone.clone();
        let points = self.spawn_points.points(&zone);
        if points.is_empty() {
            log::warn!("no spawn points registered for zone `{zone}`, boss not spawned");
            return false;
        }
        let position = points[self.rng.random_range(0..points.len())];
        self.boss = Some(Boss::new(position, self.config.boss.params.clone()));
        self.events.push(GameEvent::BossSpawned { position });
        log::info!("boss spawned at {position} in zone `{zone}`");
        true
    }

    /// Remove a live boss without a defeat, e.g. on zone exit
    pub fn despawn_boss(&mut self) {
        self.boss = None;
        self.meteor_rains.clear();
    }

    /// Restart: fresh player, seeded population, everything transient cleared
    pub fn reset(&mut self) {
        self.player = Player::new(self.config.player.clone(), Vec2::ZERO);
        self.boss = None;
        self.meteor_rains.clear();
        self.events.clear();
        self.spawner.reset(&mut self.rng);
        self.creatures = self.spawner.seed_initial(&mut self.rng);
        self.loot = Pool::new(self.config.loot.pool_initial, self.config.loot.pool_max);
        log::info!("world reset: {} creatures seeded", self.creatures.len());
    }

    pub fn live_creature_count(&self) -> usize {
        self.creatures.iter().filter(|c| !c.is_dead()).count()
    }

    pub fn loot_drops(&self) -> impl Iterator<Item = &LootDrop> {
        self.loot.iter_in_use().map(|(_, drop)| drop)
    }
}

fn report_player_damage(
    player: &mut Player,
    damage: f32,
    events: &mut Vec<GameEvent>,
    sounds: &mut dyn SoundSink,
) {
    use murkwood_creature::creature::DamageOutcome;
    match player.take_damage(damage) {
        DamageOutcome::Hurt { remaining } => {
            events.push(GameEvent::PlayerDamaged {
                amount: damage,
                remaining,
            });
            sounds.play(SoundId::PlayerHurt);
        }
        DamageOutcome::Died => {
            events.push(GameEvent::PlayerDied);
            sounds.play(SoundId::PlayerHurt);
        }
        DamageOutcome::Ignored => {}
    }
}
