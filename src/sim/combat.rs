//! Spell casting: cooldown gating and effect dispatch
//!
//! Heal and Shield act on the player, Chain Lightning damages enemies
//! instantly, and the projectile spells launch straight-line shots at the
//! nearest enemies.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::collision::{enemies_by_distance, nearest_enemy};
use super::effects;
use super::spellbook::SpellKind;
use super::state::{ChainEffect, GameEvent, GameState, Projectile};
use crate::consts::*;
use crate::direction_to;

/// Result of a cast attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOutcome {
    Applied,
    /// Cooldown still running; nothing changed
    OnCooldown,
}

/// Cast a spell if its cooldown has elapsed at `now_ms`
pub fn cast(state: &mut GameState, kind: SpellKind, now_ms: u64) -> CastOutcome {
    let spell = state.spellbook.get_mut(kind);
    if !spell.is_ready(now_ms) {
        log::debug!("{} on cooldown", spell.name);
        state.push_event(GameEvent::CastOnCooldown { kind });
        return CastOutcome::OnCooldown;
    }
    spell.last_cast_ms = Some(now_ms);
    dispatch(state, kind);
    CastOutcome::Applied
}

/// Cast without reading or touching cooldown state (auto-cast only)
pub fn cast_ignoring_cooldown(state: &mut GameState, kind: SpellKind) {
    dispatch(state, kind);
}

fn dispatch(state: &mut GameState, kind: SpellKind) {
    log::debug!("Casting {:?}", kind);
    state.push_event(GameEvent::SpellCast { kind });
    match kind {
        SpellKind::Heal => {
            let amount = -state.spellbook.get(SpellKind::Heal).damage;
            state.player.heal(amount);
            let at = state.player.pos;
            effects::heal_burst(&mut state.particles, &mut state.rng, at);
        }
        SpellKind::Shield => {
            state.player.activate_shield();
            let at = state.player.pos;
            effects::shield_burst(&mut state.particles, &mut state.rng, at);
        }
        SpellKind::Chain => chain_lightning(state),
        SpellKind::Fire | SpellKind::Ice | SpellKind::Lightning => fire_projectiles(state, kind),
    }
}

/// Launch one projectile per targeted enemy, or random shots if none exist
fn fire_projectiles(state: &mut GameState, kind: SpellKind) {
    let spell = state.spellbook.get(kind);
    let (damage, speed, radius, color) = (spell.damage, spell.speed, spell.radius, spell.color);
    let origin = state.player.pos;
    let shots = state.multi_cast_level as usize;

    let make = |dir: Vec2| Projectile {
        pos: origin,
        vel: dir * speed,
        radius,
        color,
        damage,
        spell: kind,
        life: PROJECTILE_LIFETIME_TICKS,
    };

    if state.enemies.is_empty() {
        for _ in 0..shots {
            let angle = state.rng.random::<f32>() * TAU;
            state.projectiles.push(make(Vec2::from_angle(angle)));
        }
        return;
    }

    // Aim at where each target is now; shots don't track
    let targets = enemies_by_distance(&state.enemies, origin);
    for &i in targets.iter().take(shots) {
        if let Some(dir) = direction_to(origin, state.enemies[i].pos) {
            state.projectiles.push(make(dir));
        }
    }
}

/// Hop from the player to the nearest enemy, then enemy to enemy
fn chain_lightning(state: &mut GameState) {
    let spell = state.spellbook.get(SpellKind::Chain);
    let damage = spell.damage;
    let links = spell.chain_count.unwrap_or(0) as usize;
    let origin = state.player.pos;

    let mut chain: Vec<u32> = Vec::with_capacity(links);
    let mut current = nearest_enemy(&state.enemies, origin, &[], None);
    while let Some(idx) = current {
        if chain.len() >= links {
            break;
        }
        chain.push(state.enemies[idx].id);
        let from = state.enemies[idx].pos;
        current = nearest_enemy(&state.enemies, from, &chain, Some(CHAIN_MAX_LINK_DISTANCE));
    }

    let mut points = Vec::with_capacity(chain.len() + 1);
    points.push(origin);
    let mut killed = false;
    for id in chain {
        let Some(idx) = state.enemies.iter().position(|e| e.id == id) else {
            continue;
        };
        let pos = state.enemies[idx].pos;
        points.push(pos);
        if state.enemies[idx].take_damage(damage) {
            state.enemies.remove(idx);
            state.add_kill_score();
            effects::explosion_burst(&mut state.particles, &mut state.rng, pos);
            state.push_event(GameEvent::EnemyDied { id, pos });
            killed = true;
        }
    }
    if killed {
        state.kick_screen_shake();
    }

    state.chain_effects.push(ChainEffect {
        points,
        elapsed: 0,
        max_ticks: CHAIN_EFFECT_TICKS,
    });
}

/// Periodic free cast of a random combat spell
pub fn auto_cast(state: &mut GameState, now_ms: u64) {
    if state.auto_cast_level == 0 {
        return;
    }
    if now_ms.saturating_sub(state.last_auto_cast_ms) <= AUTO_CAST_INTERVAL_MS {
        return;
    }
    let pick = state.rng.random_range(0..SpellKind::AUTO_CASTABLE.len());
    if !state.enemies.is_empty() {
        cast_ignoring_cooldown(state, SpellKind::AUTO_CASTABLE[pick]);
    }
    state.last_auto_cast_ms = now_ms;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyType;

    fn playing() -> GameState {
        let mut state = GameState::new(42, 800.0, 600.0);
        state.start(0);
        state
    }

    fn add_enemy(state: &mut GameState, offset: Vec2, health: f32) -> u32 {
        let pos = state.player.pos + offset;
        let id = state.spawn_enemy_at(EnemyType::Normal, pos, 1.0);
        let enemy = state.enemies.last_mut().expect("just spawned");
        enemy.health = health;
        enemy.max_health = health;
        id
    }

    #[test]
    fn test_second_cast_within_cooldown_is_noop() {
        let mut state = playing();
        assert_eq!(cast(&mut state, SpellKind::Fire, 10_000), CastOutcome::Applied);
        let shots = state.projectiles.len();
        assert_eq!(cast(&mut state, SpellKind::Fire, 10_999), CastOutcome::OnCooldown);
        assert_eq!(state.projectiles.len(), shots);
        assert_eq!(state.spellbook.get(SpellKind::Fire).last_cast_ms, Some(10_000));
        assert_eq!(cast(&mut state, SpellKind::Fire, 11_000), CastOutcome::Applied);
    }

    #[test]
    fn test_heal_restores_up_to_max() {
        let mut state = playing();
        state.player.health = 50;
        cast(&mut state, SpellKind::Heal, 0);
        assert_eq!(state.player.health, 80);
        assert_eq!(state.particles.len(), 20);

        state.player.health = 95;
        cast(&mut state, SpellKind::Heal, 5000);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_shield_recast_resets_timer() {
        let mut state = playing();
        cast(&mut state, SpellKind::Shield, 0);
        assert!(state.player.shield_active);
        assert_eq!(state.particles.len(), 30);
        state.player.shield_ticks = 5;
        cast_ignoring_cooldown(&mut state, SpellKind::Shield);
        assert_eq!(state.player.shield_ticks, SHIELD_DURATION_TICKS);
    }

    #[test]
    fn test_projectiles_aim_at_nearest_enemies() {
        let mut state = playing();
        state.multi_cast_level = 2;
        add_enemy(&mut state, Vec2::new(200.0, 0.0), 50.0);
        add_enemy(&mut state, Vec2::new(0.0, 100.0), 50.0);
        add_enemy(&mut state, Vec2::new(-150.0, 0.0), 50.0);

        cast(&mut state, SpellKind::Ice, 0);
        assert_eq!(state.projectiles.len(), 2);
        let speed = state.spellbook.get(SpellKind::Ice).speed;
        assert!((state.projectiles[0].vel - Vec2::new(0.0, speed)).length() < 1e-4);
        assert!((state.projectiles[1].vel - Vec2::new(-speed, 0.0)).length() < 1e-4);
        assert!(state.projectiles.iter().all(|p| p.life == PROJECTILE_LIFETIME_TICKS));
    }

    #[test]
    fn test_random_shots_without_enemies() {
        let mut state = playing();
        state.multi_cast_level = 3;
        cast(&mut state, SpellKind::Lightning, 0);
        assert_eq!(state.projectiles.len(), 3);
        for p in &state.projectiles {
            assert!((p.vel.length() - 8.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_distance_target_skipped() {
        let mut state = playing();
        state.multi_cast_level = 2;
        add_enemy(&mut state, Vec2::ZERO, 50.0);
        add_enemy(&mut state, Vec2::new(100.0, 0.0), 50.0);
        cast(&mut state, SpellKind::Fire, 0);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_chain_hits_each_link_once() {
        let mut state = playing();
        let a = add_enemy(&mut state, Vec2::new(50.0, 0.0), 100.0);
        let b = add_enemy(&mut state, Vec2::new(150.0, 0.0), 100.0);
        let c = add_enemy(&mut state, Vec2::new(250.0, 0.0), 100.0);
        let d = add_enemy(&mut state, Vec2::new(350.0, 0.0), 100.0);

        cast(&mut state, SpellKind::Chain, 0);
        let health = |id: u32| state.enemies.iter().find(|e| e.id == id).map(|e| e.health);
        assert_eq!(health(a), Some(65.0));
        assert_eq!(health(b), Some(65.0));
        assert_eq!(health(c), Some(65.0));
        assert_eq!(health(d), Some(100.0));
        assert_eq!(state.chain_effects.len(), 1);
        assert_eq!(state.chain_effects[0].points.len(), 4);
        assert_eq!(state.chain_effects[0].points[0], state.player.pos);
    }

    #[test]
    fn test_chain_stops_at_max_link_distance() {
        let mut state = playing();
        let a = add_enemy(&mut state, Vec2::new(400.0, 0.0), 100.0);
        let b = add_enemy(&mut state, Vec2::new(-400.0, 0.0), 100.0);
        cast(&mut state, SpellKind::Chain, 0);
        // First link is unbounded; the hop to b is 800 units
        assert_eq!(state.enemies.iter().find(|e| e.id == a).map(|e| e.health), Some(65.0));
        assert_eq!(state.enemies.iter().find(|e| e.id == b).map(|e| e.health), Some(100.0));
        assert_eq!(state.chain_effects[0].points.len(), 2);
    }

    #[test]
    fn test_chain_without_enemies_leaves_single_point_path() {
        let mut state = playing();
        cast(&mut state, SpellKind::Chain, 0);
        assert_eq!(state.chain_effects.len(), 1);
        assert_eq!(state.chain_effects[0].points, vec![state.player.pos]);
    }

    #[test]
    fn test_chain_kills_score_and_shake() {
        let mut state = playing();
        add_enemy(&mut state, Vec2::new(50.0, 0.0), 20.0);
        add_enemy(&mut state, Vec2::new(100.0, 0.0), 200.0);
        cast(&mut state, SpellKind::Chain, 0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, SCORE_PER_KILL);
        assert_eq!(state.screen_shake, SCREEN_SHAKE_KICK);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::EnemyDied { .. })));
    }

    #[test]
    fn test_auto_cast_respects_interval_and_enemies() {
        let mut state = playing();
        auto_cast(&mut state, 10_000);
        assert!(state.events.is_empty());

        state.auto_cast_level = 1;
        auto_cast(&mut state, 2_000);
        assert!(state.events.is_empty());

        // No enemies: timer restarts, nothing cast
        auto_cast(&mut state, 3_001);
        assert!(state.events.is_empty());
        assert_eq!(state.last_auto_cast_ms, 3_001);

        add_enemy(&mut state, Vec2::new(100.0, 0.0), 1000.0);
        auto_cast(&mut state, 6_002);
        assert!(matches!(state.events.as_slice(), [GameEvent::SpellCast { .. }]));
        // Cooldowns untouched
        assert!(state.spellbook.iter().all(|s| s.last_cast_ms.is_none()));
    }
}
