pub mod player;

pub use player::{IntentOutcome, MoveIntent, Player};
