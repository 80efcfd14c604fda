//! Murkwood game-world core.
//!
//! Drives the behavior layer from `murkwood-creature` with a fixed time
//! step: population management, the collision and damage resolver, the
//! transient object pool and the per-tick orchestrator. Hosts call
//! [`world::GameWorld::tick`] once per fixed step and drain the returned
//! events; rendering, audio playback and input capture stay outside.

pub mod config;
pub mod entity;
pub mod pool;
pub mod world;

pub use config::{ConfigError, GameConfig};
pub use entity::{MoveIntent, Player};
pub use pool::{Pool, PoolHandle, Poolable};
pub use world::{GameEvent, GameWorld, SoundId, SoundSink, SpawnPointSource};
