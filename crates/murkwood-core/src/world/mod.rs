pub mod combat;
pub mod events;
pub mod game_world;
pub mod loot;
pub mod spawn;

pub use events::{GameEvent, NullSoundSink, SoundId, SoundSink};
pub use game_world::GameWorld;
pub use loot::{LootDrop, LootKind};
pub use spawn::{SpawnPointSource, StaticSpawnPoints};
