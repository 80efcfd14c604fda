//! The per-tick collision and damage resolver.
//!
//! Three independent checks run in a fixed order: the player's live attack
//! hitbox against creature (and boss) bodies, live creature attack hitboxes
//! against the player body, and continuous body contact. Damage always goes
//! through the defender's `take_damage` path, so immunity windows and dodge
//! state are honored in one place; the resolver only reads the returned
//! [`DamageOutcome`].

use murkwood_creature::boss::Boss;
use murkwood_creature::creature::{Creature, DamageOutcome};
use murkwood_creature::geometry::{push_direction, DEFAULT_PUSH_DIR};

use crate::entity::Player;
use crate::world::events::{GameEvent, SoundId, SoundSink};

pub fn resolve_combat(
    player: &mut Player,
    creatures: &mut [Creature],
    mut boss: Option<&mut Boss>,
    dt: f32,
    events: &mut Vec<GameEvent>,
    sounds: &mut dyn SoundSink,
) {
    resolve_player_attack(player, creatures, boss.as_deref_mut(), events, sounds);
    resolve_creature_attacks(player, creatures, events, sounds);
    resolve_contact(player, creatures, boss.as_deref_mut(), dt, events);
}

/// Player attack hitbox vs creature and boss bodies. A hurt creature is
/// knocked straight back along the player-to-creature axis.
fn resolve_player_attack(
    player: &mut Player,
    creatures: &mut [Creature],
    boss: Option<&mut Boss>,
    events: &mut Vec<GameEvent>,
    sounds: &mut dyn SoundSink,
) {
    let Some(hitbox) = player.attack_hitbox() else {
        return;
    };
    let damage = player.config().attack_damage;

    for creature in creatures.iter_mut() {
        if creature.is_dead() || !hitbox.overlaps(&creature.body_aabb()) {
            continue;
        }
        match creature.take_damage(damage) {
            DamageOutcome::Hurt { remaining } => {
                let push =
                    push_direction(player.position, creature.position, DEFAULT_PUSH_DIR);
                creature.position += push * creature.descriptor().knockback_distance;
                events.push(GameEvent::CreatureDamaged {
                    id: creature.id,
                    remaining,
                });
                sounds.play(SoundId::CreatureHit);
            }
            DamageOutcome::Died => {
                events.push(GameEvent::CreatureDied {
                    id: creature.id,
                    kind: creature.kind,
                    position: creature.position,
                });
                sounds.play(SoundId::CreatureDeath);
            }
            DamageOutcome::Ignored => {}
        }
    }

    if let Some(boss) = boss {
        if hitbox.overlaps(&boss.body_aabb()) {
            match boss.take_damage(damage) {
                DamageOutcome::Hurt { remaining } => {
                    events.push(GameEvent::BossDamaged { remaining });
                    sounds.play(SoundId::CreatureHit);
                }
                // Defeat is reported by the world after the resolver runs
                DamageOutcome::Died | DamageOutcome::Ignored => {}
            }
        }
    }
}

/// Live creature attack hitboxes vs the player body.
///
/// The post-hit window gates the whole pass, not individual attackers:
/// hits landing in the same pass all apply, and the window opens once
/// for the volley afterwards.
fn resolve_creature_attacks(
    player: &mut Player,
    creatures: &[Creature],
    events: &mut Vec<GameEvent>,
    sounds: &mut dyn SoundSink,
) {
    if player.invulnerability_timer > 0.0 {
        return;
    }
    let body = player.body_aabb();
    let mut landed = false;
    for creature in creatures {
        let Some(hitbox) = creature.attack_hitbox() else {
            continue;
        };
        if !hitbox.overlaps(&body) {
            continue;
        }
        let damage = creature.descriptor().attack_damage;
        match player.take_unguarded_damage(damage) {
            DamageOutcome::Hurt { remaining } => {
                landed = true;
                events.push(GameEvent::PlayerDamaged {
                    amount: damage,
                    remaining,
                });
                sounds.play(SoundId::PlayerHurt);
            }
            DamageOutcome::Died => {
                landed = true;
                events.push(GameEvent::PlayerDied);
                sounds.play(SoundId::PlayerHurt);
            }
            DamageOutcome::Ignored => {}
        }
    }
    if landed && !player.health.is_dead() {
        player.start_hit_invulnerability();
    }
}

/// Continuous body contact: damage scaled by dt plus a steady shove away
/// from the attacker. Contact bypasses the post-hit window but a dodging
/// player is fully exempt, push included.
fn resolve_contact(
    player: &mut Player,
    creatures: &[Creature],
    boss: Option<&mut Boss>,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if player.is_dodging() {
        return;
    }
    let body = player.body_aabb();

    for creature in creatures {
        if creature.is_dead() || !creature.body_aabb().overlaps(&body) {
            continue;
        }
        let d = creature.descriptor();
        apply_contact(
            player,
            creature.position,
            d.contact_damage_per_sec * dt,
            d.contact_push_force * dt,
            events,
        );
    }

    if let Some(boss) = boss {
        if !boss.is_dead() && boss.body_aabb().overlaps(&body) {
            apply_contact(
                player,
                boss.position,
                boss.contact_damage_per_sec * dt,
                boss.contact_push_force * dt,
                events,
            );
        }
    }
}

fn apply_contact(
    player: &mut Player,
    attacker_pos: glam::Vec2,
    damage: f32,
    push_distance: f32,
    events: &mut Vec<GameEvent>,
) {
    if player.health.is_dead() {
        return;
    }
    let push = push_direction(attacker_pos, player.position, DEFAULT_PUSH_DIR);
    player.position += push * push_distance;
    match player.take_unguarded_damage(damage) {
        DamageOutcome::Hurt { remaining } => {
            events.push(GameEvent::PlayerDamaged {
                amount: damage,
                remaining,
            });
        }
        DamageOutcome::Died => events.push(GameEvent::PlayerDied),
        DamageOutcome::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use murkwood_creature::boss::BossParams;
    use murkwood_creature::creature::CreatureState;
    use murkwood_creature::species::SpeciesKind;
    use murkwood_creature::types::Facing;

    use crate::config::PlayerConfig;
    use crate::world::events::NullSoundSink;

    fn striking_player(position: Vec2) -> Player {
        let mut player = Player::new(PlayerConfig::default(), position);
        player.try_attack();
        // Advance into the hit window without moving
        player.velocity = Vec2::ZERO;
        player.update(player.config().attack_hit_start + 0.01);
        assert!(player.attack_hitbox().is_some());
        player
    }

    #[test]
    fn test_player_hit_damages_and_knocks_back() {
        let mut player = striking_player(Vec2::new(100.0, 0.0));
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(120.0, 0.0))];
        let before = creatures[0].position;
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert!(creatures[0].health.current < creatures[0].health.max);
        assert!(
            creatures[0].position.x > before.x,
            "knockback moves the creature away from the player"
        );
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CreatureDamaged { .. })));
    }

    #[test]
    fn test_player_miss_leaves_creature_alone() {
        let mut player = striking_player(Vec2::new(100.0, 0.0));
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(400.0, 0.0))];
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert_eq!(creatures[0].health.current, creatures[0].health.max);
        assert!(events.is_empty());
    }

    #[test]
    fn test_killing_blow_emits_creature_died() {
        let mut player = striking_player(Vec2::new(100.0, 0.0));
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(120.0, 0.0))];
        creatures[0].health.set(1.0);
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert_eq!(creatures[0].state, CreatureState::Dead);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CreatureDied { .. })));
    }

    #[test]
    fn test_creature_attack_hits_player_inside_window() {
        let mut player = Player::new(PlayerConfig::default(), Vec2::new(100.0, 0.0));
        let mut creature = Creature::new(SpeciesKind::Slime, Vec2::new(80.0, 0.0));
        creature.set_state(CreatureState::Attacking);
        let d = creature.descriptor();
        creature.state_timer = (d.hit_start + d.hit_end) * 0.5;
        assert!(creature.attack_hitbox().is_some());

        let mut events = Vec::new();
        resolve_combat(
            &mut player,
            std::slice::from_mut(&mut creature),
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert!(player.health.current < player.health.max);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDamaged { .. })));
    }

    #[test]
    fn test_simultaneous_attacks_from_two_creatures_both_apply() {
        let mut player = Player::new(PlayerConfig::default(), Vec2::new(100.0, 0.0));
        let mut left = Creature::new(SpeciesKind::Slime, Vec2::new(80.0, 0.0));
        let mut right = Creature::new(SpeciesKind::Slime, Vec2::new(120.0, 0.0));
        left.facing = Facing::Right;
        right.facing = Facing::Left;
        for creature in [&mut left, &mut right] {
            creature.set_state(CreatureState::Attacking);
            let d = creature.descriptor();
            creature.state_timer = (d.hit_start + d.hit_end) * 0.5;
            assert!(creature
                .attack_hitbox()
                .unwrap()
                .overlaps(&player.body_aabb()));
        }
        let damage = left.descriptor().attack_damage;
        let mut creatures = vec![left, right];
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert_eq!(
            player.health.max - player.health.current,
            2.0 * damage,
            "both same-pass attackers must land their hit"
        );
        assert!(
            player.invulnerability_timer > 0.0,
            "the window opens once after the volley"
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::PlayerDamaged { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_contact_damage_and_push_scale_with_dt() {
        let mut player = Player::new(PlayerConfig::default(), Vec2::new(105.0, 0.0));
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(100.0, 0.0))];
        let d = creatures[0].descriptor();
        let dt = 1.0 / 60.0;
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            dt,
            &mut events,
            &mut NullSoundSink,
        );

        let lost = player.health.max - player.health.current;
        assert!((lost - d.contact_damage_per_sec * dt).abs() < 1e-4);
        assert!(player.position.x > 105.0, "pushed away from the creature");
    }

    #[test]
    fn test_dodging_player_ignores_contact_entirely() {
        let mut player = Player::new(PlayerConfig::default(), Vec2::new(105.0, 0.0));
        assert!(player.try_dodge(Vec2::Y));
        let before = player.position;
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(100.0, 0.0))];
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert_eq!(player.health.current, player.health.max);
        assert_eq!(player.position, before, "no contact push while dodging");
        assert!(events.is_empty());
    }

    #[test]
    fn test_dead_player_is_not_shoved_by_contact() {
        let mut player = Player::new(PlayerConfig::default(), Vec2::new(105.0, 0.0));
        player.take_damage(1_000.0);
        assert!(player.health.is_dead());
        let before = player.position;
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(100.0, 0.0))];
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert_eq!(player.position, before, "a corpse does not get pushed");
        assert!(events.is_empty());
    }

    #[test]
    fn test_player_attack_damages_boss() {
        let mut player = striking_player(Vec2::new(100.0, 0.0));
        let mut boss = Boss::new(Vec2::new(130.0, 0.0), BossParams::default());
        let mut creatures: Vec<Creature> = Vec::new();
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            Some(&mut boss),
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert!(boss.health.current < boss.health.max);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::BossDamaged { .. })));
    }

    #[test]
    fn test_dead_creature_neither_takes_nor_deals_contact() {
        let mut player = striking_player(Vec2::new(100.0, 0.0));
        let mut creatures = vec![Creature::new(SpeciesKind::Slime, Vec2::new(110.0, 0.0))];
        creatures[0].take_damage(1000.0);
        let hp = player.health.current;
        let mut events = Vec::new();

        resolve_combat(
            &mut player,
            &mut creatures,
            None,
            1.0 / 60.0,
            &mut events,
            &mut NullSoundSink,
        );

        assert_eq!(player.health.current, hp);
        assert!(events.is_empty(), "a corpse is inert");
    }
}
