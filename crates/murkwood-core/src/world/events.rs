//! Tick events and the audio seam.
//!
//! Gameplay code never talks to an audio backend; it requests sound cues
//! through the injected [`SoundSink`] and reports everything else through
//! the per-tick [`GameEvent`] buffer the host drains after each step.

use glam::Vec2;

use murkwood_creature::species::SpeciesKind;
use murkwood_creature::types::EntityId;

use crate::world::loot::LootKind;

/// Sound cues gameplay code may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    PlayerSwing,
    PlayerHurt,
    PlayerDodge,
    CreatureHit,
    CreatureDeath,
    BossRoar,
    BossSmash,
    MeteorExplosion,
    LootPickup,
}

/// Receives sound cues. Implemented by the host's audio layer.
pub trait SoundSink {
    fn play(&mut self, sound: SoundId);
}

/// Discards every cue; used headless and in tests
#[derive(Debug, Default)]
pub struct NullSoundSink;

impl SoundSink for NullSoundSink {
    fn play(&mut self, _sound: SoundId) {}
}

/// Everything notable that happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlayerDamaged { amount: f32, remaining: f32 },
    PlayerDied,
    StaminaChanged { remaining: f32 },
    CreatureDamaged { id: EntityId, remaining: f32 },
    CreatureDied { id: EntityId, kind: SpeciesKind, position: Vec2 },
    BossSpawned { position: Vec2 },
    BossDamaged { remaining: f32 },
    BossDefeated { position: Vec2 },
    LootDropped { kind: LootKind, position: Vec2 },
    LootPickedUp { kind: LootKind },
}
