//! Creature and boss behavior for Murkwood
//!
//! This crate holds the behavior layer of the game: the per-creature state
//! machine, the species descriptor tables that parameterize it, and the boss
//! attack director with its swappable attack strategies. It knows nothing
//! about rendering, audio or input; the world crate drives it with a fixed
//! time step and a read-only player snapshot.

pub mod attacks;
pub mod behavior;
pub mod boss;
pub mod creature;
pub mod geometry;
pub mod species;
pub mod types;

pub use attacks::{AttackStrategy, BossEffect, MeteorParams, MeteorRain, SmashParams};
pub use behavior::{PlayerView, ai_behavior};
pub use boss::{Boss, BossParams, BossPhase};
pub use creature::{Creature, CreatureState, DamageOutcome};
pub use geometry::{Aabb, HabitatRing, push_direction};
pub use species::{SpeciesDescriptor, SpeciesError, SpeciesKind, WanderStyle};
pub use types::{EntityId, Facing, Health};
