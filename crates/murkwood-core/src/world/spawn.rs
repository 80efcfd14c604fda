//! Population management: per-species spawn rules plus an ambient top-up
//! loop, both suspended while a boss is active.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;

use murkwood_creature::creature::Creature;
use murkwood_creature::species::SpeciesKind;

use crate::config::{AmbientConfig, SpawnRuleConfig};

/// Named spawn-point lookup, injected by the host. A zone with no points is
/// valid and yields an empty slice.
pub trait SpawnPointSource {
    fn points(&self, zone: &str) -> &[Vec2];
}

/// Fixed table of zone -> spawn points
#[derive(Debug, Default)]
pub struct StaticSpawnPoints {
    zones: HashMap<String, Vec<Vec2>>,
}

impl StaticSpawnPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: &str, points: Vec<Vec2>) -> Self {
        self.zones.insert(zone.to_string(), points);
        self
    }
}

impl SpawnPointSource for StaticSpawnPoints {
    fn points(&self, zone: &str) -> &[Vec2] {
        self.zones.get(zone).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One live per-species spawn rule
#[derive(Debug, Clone)]
struct SpawnRule {
    kind: SpeciesKind,
    max_count: usize,
    interval: f32,
    elapsed: f32,
}

/// Drives the creature population each tick.
///
/// Per-species rules tick toward their interval only while the species is
/// below its cap; the ambient loop periodically tops the total population up
/// to a randomized target. A live boss suspends both, timers included.
pub struct SpawnManager {
    rules: Vec<SpawnRule>,
    ambient: AmbientConfig,
    ambient_delay: f32,
    ambient_target: usize,
}

impl SpawnManager {
    /// Build from validated configuration. Caller must have run
    /// `GameConfig::validate` first; unknown species are skipped with a log.
    pub fn new(spawns: &[SpawnRuleConfig], ambient: AmbientConfig, rng: &mut impl Rng) -> Self {
        let rules = spawns
            .iter()
            .filter_map(|rule| match SpeciesKind::from_name(&rule.species) {
                Ok(kind) => Some(SpawnRule {
                    kind,
                    max_count: rule.max_count,
                    interval: rule.interval,
                    elapsed: 0.0,
                }),
                Err(err) => {
                    log::warn!("skipping spawn rule: {err}");
                    None
                }
            })
            .collect();
        let ambient_delay = rng.random_range(ambient.delay_min..=ambient.delay_max);
        let ambient_target = rng.random_range(ambient.target_min..=ambient.target_max);
        Self {
            rules,
            ambient,
            ambient_delay,
            ambient_target,
        }
    }

    /// Immediately fill every rule to its cap, for world reset
    pub fn seed_initial(&self, rng: &mut impl Rng) -> Vec<Creature> {
        let mut spawned = Vec::new();
        for rule in &self.rules {
            let habitat = rule.kind.descriptor().habitat;
            for _ in 0..rule.max_count {
                spawned.push(Creature::new(rule.kind, habitat.random_point(rng)));
            }
        }
        spawned
    }

    /// Advance spawn timers and return the creatures born this tick
    pub fn update(
        &mut self,
        dt: f32,
        creatures: &[Creature],
        boss_active: bool,
        rng: &mut impl Rng,
    ) -> Vec<Creature> {
        if boss_active {
            return Vec::new();
        }

        let mut counts: HashMap<SpeciesKind, usize> = HashMap::new();
        for creature in creatures.iter().filter(|c| !c.is_dead()) {
            *counts.entry(creature.kind).or_default() += 1;
        }
        let mut total: usize = counts.values().sum();

        let mut spawned = Vec::new();
        for rule in &mut self.rules {
            let count = counts.get(&rule.kind).copied().unwrap_or(0);
            if count >= rule.max_count {
                // At cap the timer holds; time spent at cap is never banked
                continue;
            }
            rule.elapsed += dt;
            if rule.elapsed >= rule.interval {
                rule.elapsed = 0.0;
                let position = rule.kind.descriptor().habitat.random_point(rng);
                log::debug!("spawning {} at {position}", rule.kind.name());
                spawned.push(Creature::new(rule.kind, position));
                *counts.entry(rule.kind).or_default() += 1;
                total += 1;
            }
        }

        self.ambient_delay -= dt;
        if self.ambient_delay <= 0.0 {
            if total < self.ambient_target && !self.rules.is_empty() {
                let rule = &self.rules[rng.random_range(0..self.rules.len())];
                let position = rule.kind.descriptor().habitat.random_point(rng);
                spawned.push(Creature::new(rule.kind, position));
            }
            self.ambient_delay = rng.random_range(self.ambient.delay_min..=self.ambient.delay_max);
            self.ambient_target =
                rng.random_range(self.ambient.target_min..=self.ambient.target_max);
        }

        spawned
    }

    /// Restart every timer, for world reset
    pub fn reset(&mut self, rng: &mut impl Rng) {
        for rule in &mut self.rules {
            rule.elapsed = 0.0;
        }
        self.ambient_delay = rng.random_range(self.ambient.delay_min..=self.ambient.delay_max);
        self.ambient_target = rng.random_range(self.ambient.target_min..=self.ambient.target_max);
    }
}
