//! Species descriptor tables.
//!
//! Species differ only in numeric constants and wander detail; the state
//! machine itself is shared. Each species is a static descriptor dispatched
//! on `SpeciesKind`, not a subclass.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::HabitatRing;

/// All registered creature species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesKind {
    Slime,
    Orc,
    Bat,
}

/// Idle movement used absent a detected target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WanderStyle {
    /// Pick a fresh random heading every few seconds and keep walking
    RandomHeading { retarget_min: f32, retarget_max: f32 },
    /// Walk to a random nearby point, then pause before picking the next
    TargetSeeking {
        idle_min: f32,
        idle_max: f32,
        /// Max distance of a wander target from the current position
        leash: f32,
    },
}

/// Numeric constants for one species. Distances are pixels, times seconds.
#[derive(Debug, Clone)]
pub struct SpeciesDescriptor {
    pub name: &'static str,
    pub max_health: f32,
    pub attack_damage: f32,
    pub contact_damage_per_sec: f32,
    pub contact_push_force: f32,
    pub move_speed: f32,
    pub chase_speed: f32,
    pub detection_radius: f32,
    pub attack_radius: f32,
    pub habitat: HabitatRing,
    pub knockback_distance: f32,
    pub body_size: Vec2,
    /// Size of the attack hitbox, extended from the body in the facing direction
    pub attack_reach: Vec2,
    pub windup_duration: f32,
    pub attack_duration: f32,
    /// Hit window: the attack hitbox is live for state timer in [hit_start, hit_end]
    pub hit_start: f32,
    pub hit_end: f32,
    pub cooldown_duration: f32,
    pub hurt_duration: f32,
    pub death_duration: f32,
    pub invulnerability_window: f32,
    pub wander: WanderStyle,
    /// Chase only while the player is inside the habitat ring
    pub chase_requires_habitat: bool,
}

static SLIME: SpeciesDescriptor = SpeciesDescriptor {
    name: "slime",
    max_health: 30.0,
    attack_damage: 8.0,
    contact_damage_per_sec: 4.0,
    contact_push_force: 120.0,
    move_speed: 30.0,
    chase_speed: 55.0,
    detection_radius: 160.0,
    attack_radius: 40.0,
    habitat: HabitatRing::new(0.0, 600.0),
    knockback_distance: 24.0,
    body_size: Vec2::new(14.0, 12.0),
    attack_reach: Vec2::new(18.0, 14.0),
    windup_duration: 0.35,
    attack_duration: 0.5,
    hit_start: 0.1,
    hit_end: 0.3,
    cooldown_duration: 0.6,
    hurt_duration: 0.25,
    death_duration: 0.8,
    invulnerability_window: 0.4,
    wander: WanderStyle::RandomHeading {
        retarget_min: 1.0,
        retarget_max: 3.0,
    },
    chase_requires_habitat: false,
};

static ORC: SpeciesDescriptor = SpeciesDescriptor {
    name: "orc",
    max_health: 80.0,
    attack_damage: 15.0,
    contact_damage_per_sec: 6.0,
    contact_push_force: 160.0,
    move_speed: 45.0,
    chase_speed: 80.0,
    detection_radius: 220.0,
    attack_radius: 52.0,
    habitat: HabitatRing::new(250.0, 900.0),
    knockback_distance: 32.0,
    body_size: Vec2::new(20.0, 26.0),
    attack_reach: Vec2::new(26.0, 20.0),
    windup_duration: 0.45,
    attack_duration: 0.4,
    hit_start: 0.1,
    hit_end: 0.25,
    cooldown_duration: 0.8,
    hurt_duration: 0.3,
    death_duration: 1.0,
    invulnerability_window: 0.4,
    wander: WanderStyle::TargetSeeking {
        idle_min: 0.8,
        idle_max: 2.5,
        leash: 140.0,
    },
    chase_requires_habitat: true,
};

static BAT: SpeciesDescriptor = SpeciesDescriptor {
    name: "bat",
    max_health: 18.0,
    attack_damage: 5.0,
    contact_damage_per_sec: 2.0,
    contact_push_force: 80.0,
    move_speed: 70.0,
    chase_speed: 110.0,
    detection_radius: 200.0,
    attack_radius: 36.0,
    habitat: HabitatRing::new(400.0, 1200.0),
    knockback_distance: 16.0,
    body_size: Vec2::new(10.0, 10.0),
    attack_reach: Vec2::new(14.0, 12.0),
    windup_duration: 0.25,
    attack_duration: 0.3,
    hit_start: 0.05,
    hit_end: 0.2,
    cooldown_duration: 0.5,
    hurt_duration: 0.2,
    death_duration: 0.6,
    invulnerability_window: 0.3,
    wander: WanderStyle::RandomHeading {
        retarget_min: 0.5,
        retarget_max: 1.5,
    },
    chase_requires_habitat: false,
};

/// Errors for species lookup from configuration
#[derive(Debug, Error)]
pub enum SpeciesError {
    /// Requesting an unregistered species is a configuration defect and must
    /// fail fast rather than degrade silently.
    #[error("unknown species `{0}`")]
    Unknown(String),
}

impl SpeciesKind {
    pub fn all() -> &'static [SpeciesKind] {
        &[SpeciesKind::Slime, SpeciesKind::Orc, SpeciesKind::Bat]
    }

    pub fn descriptor(self) -> &'static SpeciesDescriptor {
        match self {
            SpeciesKind::Slime => &SLIME,
            SpeciesKind::Orc => &ORC,
            SpeciesKind::Bat => &BAT,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up a species by its configuration name
    pub fn from_name(name: &str) -> Result<SpeciesKind, SpeciesError> {
        SpeciesKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| SpeciesError::Unknown(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for kind in SpeciesKind::all() {
            assert_eq!(SpeciesKind::from_name(kind.name()).unwrap(), *kind);
        }
    }

    #[test]
    fn test_from_name_unknown_fails() {
        let err = SpeciesKind::from_name("dragon").unwrap_err();
        assert!(matches!(err, SpeciesError::Unknown(_)));
    }

    #[test]
    fn test_descriptor_invariants() {
        for kind in SpeciesKind::all() {
            let d = kind.descriptor();
            assert!(d.hit_start < d.hit_end, "{}: empty hit window", d.name);
            assert!(
                d.hit_end <= d.attack_duration,
                "{}: hit window outlives the attack",
                d.name
            );
            assert!(d.habitat.min_radius < d.habitat.max_radius);
            assert!(d.max_health > 0.0);
            assert!(d.detection_radius > d.attack_radius);
        }
    }
}
