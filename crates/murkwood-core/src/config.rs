//! Game tuning configuration.
//!
//! Everything numeric that designers iterate on lives here, with playable
//! defaults and an optional ron overlay. Species names in spawn rules are
//! validated eagerly: an unknown name is a configuration defect and fails
//! construction instead of degrading at runtime.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use murkwood_creature::boss::BossParams;
use murkwood_creature::geometry::Aabb;
use murkwood_creature::species::{SpeciesError, SpeciesKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Species(#[from] SpeciesError),
}

/// World extent, centered on the origin (habitat rings are radial bands
/// around the same origin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 3200.0,
            height: 3200.0,
        }
    }
}

impl WorldConfig {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(Vec2::ZERO, Vec2::new(self.width, self.height))
    }
}

/// Player tuning. Distances are pixels, times seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub max_health: f32,
    pub max_stamina: f32,
    pub stamina_regen_per_sec: f32,
    pub move_speed: f32,
    pub body_size: Vec2,
    pub attack_damage: f32,
    pub attack_duration: f32,
    pub attack_hit_start: f32,
    pub attack_hit_end: f32,
    pub attack_reach: Vec2,
    pub attack_cooldown: f32,
    pub dodge_speed: f32,
    pub dodge_duration: f32,
    pub dodge_cooldown: f32,
    pub dodge_stamina_cost: f32,
    /// Post-hit immunity window
    pub hit_invulnerability: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_stamina: 100.0,
            stamina_regen_per_sec: 12.0,
            move_speed: 140.0,
            body_size: Vec2::new(12.0, 16.0),
            attack_damage: 12.0,
            attack_duration: 0.4,
            attack_hit_start: 0.1,
            attack_hit_end: 0.25,
            attack_reach: Vec2::new(28.0, 22.0),
            attack_cooldown: 0.5,
            dodge_speed: 280.0,
            dodge_duration: 0.15,
            dodge_cooldown: 0.5,
            dodge_stamina_cost: 20.0,
            hit_invulnerability: 0.6,
        }
    }
}

/// One per-species spawn rule: target cap plus spawn interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnRuleConfig {
    pub species: String,
    pub max_count: usize,
    pub interval: f32,
}

/// Ambient population loop: randomized target count and respawn delay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    pub delay_min: f32,
    pub delay_max: f32,
    pub target_min: usize,
    pub target_max: usize,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            delay_min: 4.0,
            delay_max: 10.0,
            target_min: 8,
            target_max: 14,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossConfig {
    /// Zone whose named spawn points the boss may appear at
    pub zone: String,
    pub params: BossParams,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            zone: "boss_arena".to_string(),
            params: BossParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootConfig {
    pub pool_initial: usize,
    pub pool_max: usize,
    /// Seconds before an unclaimed drop despawns
    pub lifetime: f32,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            pool_initial: 16,
            pool_max: 64,
            lifetime: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub spawns: Vec<SpawnRuleConfig>,
    pub ambient: AmbientConfig,
    pub boss: BossConfig,
    pub loot: LootConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            spawns: vec![
                SpawnRuleConfig {
                    species: "slime".to_string(),
                    max_count: 6,
                    interval: 8.0,
                },
                SpawnRuleConfig {
                    species: "orc".to_string(),
                    max_count: 3,
                    interval: 15.0,
                },
                SpawnRuleConfig {
                    species: "bat".to_string(),
                    max_count: 5,
                    interval: 6.0,
                },
            ],
            ambient: AmbientConfig::default(),
            boss: BossConfig::default(),
            loot: LootConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a ron overlay and validate it
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on species names no factory can build
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.spawns {
            SpeciesKind::from_name(&rule.species)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_unknown_species_fails_fast() {
        let mut config = GameConfig::default();
        config.spawns.push(SpawnRuleConfig {
            species: "dragon".to_string(),
            max_count: 1,
            interval: 1.0,
        });
        assert!(matches!(config.validate(), Err(ConfigError::Species(_))));
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = GameConfig::default();
        let text = ron::to_string(&config).unwrap();
        let parsed = GameConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed.spawns.len(), config.spawns.len());
        assert_eq!(parsed.player.max_health, config.player.max_health);
    }

    #[test]
    fn test_malformed_ron_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_ron_str("(world: oops"),
            Err(ConfigError::Parse(_))
        ));
    }
}
