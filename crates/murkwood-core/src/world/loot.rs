//! Loot drops: rolled on creature death, recycled through the pool.

use glam::Vec2;
use rand::Rng;

use murkwood_creature::species::SpeciesKind;

use crate::pool::Poolable;

/// Distance within which the player scoops a drop up
pub const PICKUP_RADIUS: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LootKind {
    #[default]
    Coin,
    Heart,
    ManaShard,
}

/// One drop lying in the world, waiting to be collected or to expire
#[derive(Debug, Clone, Default)]
pub struct LootDrop {
    pub kind: LootKind,
    pub position: Vec2,
    /// Seconds since the drop appeared
    pub age: f32,
}

impl Poolable for LootDrop {
    fn reset(&mut self) {
        self.kind = LootKind::default();
        self.position = Vec2::ZERO;
        self.age = 0.0;
    }
}

/// Roll the drop table for a dying creature. Sturdier species drop better.
pub fn roll_drop(kind: SpeciesKind, rng: &mut impl Rng) -> Option<LootKind> {
    let roll: f32 = rng.random();
    match kind {
        SpeciesKind::Slime => match roll {
            r if r < 0.40 => Some(LootKind::Coin),
            r if r < 0.50 => Some(LootKind::Heart),
            _ => None,
        },
        SpeciesKind::Orc => match roll {
            r if r < 0.55 => Some(LootKind::Coin),
            r if r < 0.75 => Some(LootKind::Heart),
            r if r < 0.85 => Some(LootKind::ManaShard),
            _ => None,
        },
        SpeciesKind::Bat => match roll {
            r if r < 0.30 => Some(LootKind::Coin),
            r if r < 0.45 => Some(LootKind::ManaShard),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_reset_clears_drop() {
        let mut drop = LootDrop {
            kind: LootKind::Heart,
            position: Vec2::new(10.0, 20.0),
            age: 5.0,
        };
        drop.reset();
        assert_eq!(drop.kind, LootKind::Coin);
        assert_eq!(drop.position, Vec2::ZERO);
        assert_eq!(drop.age, 0.0);
    }

    #[test]
    fn test_drop_tables_produce_every_outcome() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        for kind in SpeciesKind::all() {
            let mut hit = false;
            let mut miss = false;
            for _ in 0..500 {
                match roll_drop(*kind, &mut rng) {
                    Some(_) => hit = true,
                    None => miss = true,
                }
            }
            assert!(hit, "{} never dropped", kind.name());
            assert!(miss, "{} always dropped", kind.name());
        }
    }
}
