//! Per-species AI transition functions.
//!
//! Called once per tick after `Creature::update`. The shape is shared by all
//! species: wander until the player is detected, chase, wind up, strike
//! inside a hit window, recover, repeat. Species only differ in their
//! descriptor constants and wander style.

use glam::Vec2;
use rand::Rng;

use crate::creature::{Creature, CreatureState};
use crate::geometry::Aabb;
use crate::species::WanderStyle;
use crate::types::Facing;

/// Read-only player snapshot consumed by creature AI
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub position: Vec2,
    pub body: Aabb,
}

/// Chase breaks off past this multiple of the detection radius
pub const CHASE_LEASH_FACTOR: f32 = 1.5;

/// Distance at which a wander target counts as reached
const WANDER_ARRIVAL: f32 = 4.0;

/// Advance one creature's behavior by one tick.
pub fn ai_behavior(creature: &mut Creature, dt: f32, player: &PlayerView, rng: &mut impl Rng) {
    let d = creature.descriptor();
    let to_player = player.position - creature.position;
    let distance = to_player.length();
    let player_in_habitat = d.habitat.contains(player.position);

    match creature.state {
        CreatureState::Idle | CreatureState::Wander => {
            wander_move(creature, dt, rng);
            let detectable = !d.chase_requires_habitat || player_in_habitat;
            if distance < d.detection_radius && detectable {
                creature.set_state(CreatureState::Chase);
            }
        }
        CreatureState::Chase => {
            let lost = distance > d.detection_radius * CHASE_LEASH_FACTOR
                || (d.chase_requires_habitat && !player_in_habitat);
            if lost {
                creature.velocity = Vec2::ZERO;
                creature.set_state(CreatureState::Wander);
            } else if distance < d.attack_radius {
                creature.velocity = Vec2::ZERO;
                if let Some(facing) = Facing::from_horizontal(to_player.x) {
                    creature.facing = facing;
                }
                creature.facing_locked = true;
                creature.set_state(CreatureState::PrepareAttack);
            } else {
                creature.velocity = to_player.normalize_or_zero() * d.chase_speed;
            }
        }
        CreatureState::PrepareAttack => {
            creature.velocity = Vec2::ZERO;
            if creature.state_timer >= d.windup_duration {
                creature.set_state(CreatureState::Attacking);
            }
        }
        CreatureState::Attacking => {
            creature.velocity = Vec2::ZERO;
            if creature.state_timer >= d.attack_duration {
                creature.facing_locked = false;
                creature.set_state(CreatureState::Cooldown);
            }
        }
        CreatureState::Cooldown => {
            if creature.state_timer >= d.cooldown_duration {
                creature.set_state(CreatureState::Chase);
            }
        }
        CreatureState::Hurt => {
            if creature.state_timer >= d.hurt_duration {
                creature.set_state(CreatureState::Chase);
            }
        }
        CreatureState::Dead => {}
    }
}

/// Style-driven idle movement
fn wander_move(creature: &mut Creature, dt: f32, rng: &mut impl Rng) {
    let d = creature.descriptor();
    match d.wander {
        WanderStyle::RandomHeading {
            retarget_min,
            retarget_max,
        } => {
            creature.wander.retarget_timer -= dt;
            if creature.wander.retarget_timer <= 0.0 {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                creature.velocity = Vec2::new(angle.cos(), angle.sin()) * d.move_speed;
                creature.wander.retarget_timer = rng.random_range(retarget_min..=retarget_max);
            }
        }
        WanderStyle::TargetSeeking {
            idle_min,
            idle_max,
            leash,
        } => {
            if let Some(target) = creature.wander.target {
                let to_target = target - creature.position;
                if to_target.length() <= WANDER_ARRIVAL {
                    creature.wander.target = None;
                    creature.velocity = Vec2::ZERO;
                    creature.wander.retarget_timer = rng.random_range(idle_min..=idle_max);
                } else {
                    creature.velocity = to_target.normalize_or_zero() * d.move_speed;
                }
            } else {
                creature.velocity = Vec2::ZERO;
                creature.wander.retarget_timer -= dt;
                if creature.wander.retarget_timer <= 0.0 {
                    let angle = rng.random_range(0.0..std::f32::consts::TAU);
                    let offset = Vec2::new(angle.cos(), angle.sin()) * rng.random_range(0.0..leash);
                    let target = d.habitat.clamp(creature.position + offset);
                    creature.wander.target = Some(target);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesKind;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn bounds() -> Aabb {
        Aabb::from_center_size(Vec2::ZERO, Vec2::new(4000.0, 4000.0))
    }

    fn view_at(position: Vec2) -> PlayerView {
        PlayerView {
            position,
            body: Aabb::from_center_size(position, Vec2::new(12.0, 16.0)),
        }
    }

    fn step(creature: &mut Creature, player: &PlayerView, rng: &mut impl Rng, dt: f32, ticks: u32) {
        for _ in 0..ticks {
            creature.update(dt, bounds());
            ai_behavior(creature, dt, player, rng);
        }
    }

    #[test]
    fn test_wander_never_chases_distant_player() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let mut c = Creature::new(SpeciesKind::Slime, Vec2::new(500.0, 0.0));
        // Stationary player well outside detection and chase leash
        let player = view_at(Vec2::new(-1500.0, 0.0));

        for _ in 0..600 {
            c.update(1.0 / 60.0, bounds());
            ai_behavior(&mut c, 1.0 / 60.0, &player, &mut rng);
            let distance = (player.position - c.position).length();
            if distance >= c.descriptor().detection_radius {
                assert_ne!(c.state, CreatureState::Chase);
            }
        }
    }

    #[test]
    fn test_detection_starts_chase() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(2);
        let mut c = Creature::new(SpeciesKind::Slime, Vec2::new(100.0, 0.0));
        let player = view_at(Vec2::new(150.0, 0.0)); // inside 160px detection

        step(&mut c, &player, &mut rng, 1.0 / 60.0, 1);
        assert_eq!(c.state, CreatureState::Chase);
    }

    #[test]
    fn test_habitat_gated_species_ignores_player_outside_ring() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        // Orc at the inner edge of its ring; player near the origin, outside it
        let mut c = Creature::new(SpeciesKind::Orc, Vec2::new(260.0, 0.0));
        let player = view_at(Vec2::new(100.0, 0.0));
        assert!(!c.descriptor().habitat.contains(player.position));

        step(&mut c, &player, &mut rng, 1.0 / 60.0, 120);
        assert_ne!(c.state, CreatureState::Chase);
        assert_ne!(c.state, CreatureState::PrepareAttack);
    }

    #[test]
    fn test_chase_breaks_off_past_leash() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let mut c = Creature::new(SpeciesKind::Slime, Vec2::new(0.0, 100.0));
        c.set_state(CreatureState::Chase);
        let d = c.descriptor();
        let far = view_at(Vec2::new(0.0, 100.0 + d.detection_radius * CHASE_LEASH_FACTOR + 10.0));

        ai_behavior(&mut c, 1.0 / 60.0, &far, &mut rng);
        assert_eq!(c.state, CreatureState::Wander);
        assert_eq!(c.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_full_attack_cycle() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let mut c = Creature::new(SpeciesKind::Slime, Vec2::new(100.0, 0.0));
        let d = c.descriptor();
        // Player inside attack radius
        let player = view_at(Vec2::new(120.0, 0.0));

        c.set_state(CreatureState::Chase);
        ai_behavior(&mut c, 1.0 / 60.0, &player, &mut rng);
        assert_eq!(c.state, CreatureState::PrepareAttack);
        assert!(c.facing_locked);
        assert_eq!(c.facing, Facing::Right);

        // Windup elapses -> Attacking
        step(&mut c, &player, &mut rng, d.windup_duration + 0.01, 1);
        assert_eq!(c.state, CreatureState::Attacking);

        // Attack elapses -> Cooldown, facing unlocked
        step(&mut c, &player, &mut rng, d.attack_duration + 0.01, 1);
        assert_eq!(c.state, CreatureState::Cooldown);
        assert!(!c.facing_locked);

        // Cooldown elapses -> back to Chase
        step(&mut c, &player, &mut rng, d.cooldown_duration + 0.01, 1);
        assert_eq!(c.state, CreatureState::Chase);
    }

    #[test]
    fn test_hurt_recovers_into_chase() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(6);
        let mut c = Creature::new(SpeciesKind::Slime, Vec2::new(100.0, 0.0));
        let player = view_at(Vec2::new(130.0, 0.0));

        c.take_damage(5.0);
        assert_eq!(c.state, CreatureState::Hurt);
        let hurt_duration = c.descriptor().hurt_duration;
        step(&mut c, &player, &mut rng, hurt_duration + 0.01, 1);
        assert_eq!(c.state, CreatureState::Chase);
    }

    #[test]
    fn test_target_seeking_wander_pauses_between_targets() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let mut c = Creature::new(SpeciesKind::Orc, Vec2::new(400.0, 0.0));
        let player = view_at(Vec2::new(-2000.0, 0.0)); // far away, never detected

        let mut saw_moving = false;
        let mut saw_idle = false;
        for _ in 0..2000 {
            c.update(1.0 / 60.0, bounds());
            ai_behavior(&mut c, 1.0 / 60.0, &player, &mut rng);
            if c.velocity.length() > 0.0 {
                saw_moving = true;
            } else {
                saw_idle = true;
            }
        }
        assert!(saw_moving && saw_idle, "target-seeking wander should alternate");
    }
}
