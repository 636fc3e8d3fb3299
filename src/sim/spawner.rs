//! Enemy wave generation
//!
//! A wave spawns every `ENEMY_SPAWN_INTERVAL_MS`. Waves grow with level up to
//! a cap, specials start appearing after level 2, and speed is scaled up on
//! large arenas so enemies don't crawl across big screens.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyType, GameEvent, GameState};
use crate::consts::*;

/// Enemies per wave: one more every three levels, capped
pub fn wave_size(level: u32) -> u32 {
    (1 + level / 3).min(MAX_ENEMIES_PER_WAVE)
}

/// Chance that a spawned enemy is a special type (only used above level 2)
pub fn special_chance(level: u32) -> f32 {
    (0.3 + level as f32 * 0.05).min(0.7)
}

/// Health before the type multiplier
pub fn base_health(level: u32) -> f32 {
    ENEMY_BASE_HEALTH + level as f32 * ENEMY_HEALTH_PER_LEVEL
}

/// Arena diagonal relative to the reference size, never below 1
pub fn arena_speed_scale(width: f32, height: f32) -> f32 {
    (Vec2::new(width, height).length() / REFERENCE_DIAGONAL).max(1.0)
}

pub fn roll_enemy_type<R: Rng>(rng: &mut R, level: u32) -> EnemyType {
    if rng.random::<f32>() < special_chance(level) && level > 2 {
        EnemyType::SPECIAL[rng.random_range(0..EnemyType::SPECIAL.len())]
    } else {
        EnemyType::Normal
    }
}

/// Random point just outside one of the four arena edges
pub fn edge_position<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * width, -ENEMY_SPAWN_OFFSET),
        1 => Vec2::new(width + ENEMY_SPAWN_OFFSET, rng.random::<f32>() * height),
        2 => Vec2::new(rng.random::<f32>() * width, height + ENEMY_SPAWN_OFFSET),
        _ => Vec2::new(-ENEMY_SPAWN_OFFSET, rng.random::<f32>() * height),
    }
}

/// Build one wave for `level`. Enemies come back with id 0; the caller
/// assigns ids.
pub fn spawn_wave<R: Rng>(rng: &mut R, level: u32, width: f32, height: f32) -> Vec<Enemy> {
    let scale = arena_speed_scale(width, height);
    (0..wave_size(level))
        .map(|_| {
            let pos = edge_position(rng, width, height);
            let kind = roll_enemy_type(rng, level);
            let speed = (ENEMY_BASE_SPEED
                + rng.random::<f32>() * ENEMY_SPEED_JITTER
                + level as f32 * ENEMY_SPEED_PER_LEVEL)
                * kind.speed_multiplier()
                * scale;
            let health = base_health(level) * kind.health_multiplier();
            Enemy {
                id: 0,
                pos,
                vel: Vec2::ZERO,
                radius: ENEMY_RADIUS,
                color: kind.color(),
                health,
                max_health: health,
                speed,
                kind,
            }
        })
        .collect()
}

/// Spawn a wave if the interval has passed. Returns the number spawned.
pub fn spawn_if_due(state: &mut GameState, now_ms: u64) -> usize {
    if now_ms.saturating_sub(state.last_spawn_ms) <= ENEMY_SPAWN_INTERVAL_MS {
        return 0;
    }
    state.last_spawn_ms = now_ms;

    let wave = spawn_wave(&mut state.rng, state.level, state.arena_width, state.arena_height);
    let count = wave.len();
    for mut enemy in wave {
        enemy.id = state.next_entity_id();
        state.enemies.push(enemy);
    }
    log::debug!("Spawned wave of {} at level {}", count, state.level);
    state.push_event(GameEvent::WaveSpawned { count });
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wave_size_scaling() {
        assert_eq!(wave_size(1), 1);
        assert_eq!(wave_size(3), 2);
        assert_eq!(wave_size(6), 3);
        assert_eq!(wave_size(9), 4);
        assert_eq!(wave_size(50), 4);
    }

    #[test]
    fn test_special_chance_capped() {
        assert!((special_chance(1) - 0.35).abs() < 1e-6);
        assert!((special_chance(20) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_low_levels_only_normal() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            assert_eq!(roll_enemy_type(&mut rng, 2), EnemyType::Normal);
        }
        let specials = (0..500)
            .filter(|_| roll_enemy_type(&mut rng, 10) != EnemyType::Normal)
            .count();
        assert!(specials > 0);
    }

    #[test]
    fn test_spawn_positions_outside_edges() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let p = edge_position(&mut rng, 800.0, 600.0);
            let on_vertical = p.x == -ENEMY_SPAWN_OFFSET || p.x == 800.0 + ENEMY_SPAWN_OFFSET;
            let on_horizontal = p.y == -ENEMY_SPAWN_OFFSET || p.y == 600.0 + ENEMY_SPAWN_OFFSET;
            assert!(on_vertical || on_horizontal);
        }
    }

    #[test]
    fn test_level_one_wave_stats() {
        let mut rng = Pcg32::seed_from_u64(9);
        let wave = spawn_wave(&mut rng, 1, 800.0, 600.0);
        assert_eq!(wave.len(), 1);
        let enemy = &wave[0];
        assert_eq!(enemy.kind, EnemyType::Normal);
        assert_eq!(enemy.health, 25.0);
        assert_eq!(enemy.max_health, 25.0);
        // 800x600 has diagonal 1000: scale 1
        assert!(enemy.speed >= 0.55 && enemy.speed <= 1.05);
    }

    #[test]
    fn test_large_arena_speeds_up_enemies() {
        assert_eq!(arena_speed_scale(800.0, 600.0), 1.0);
        assert_eq!(arena_speed_scale(100.0, 100.0), 1.0);
        assert!((arena_speed_scale(1600.0, 1200.0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_interval() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.start(0);
        assert_eq!(spawn_if_due(&mut state, 1500), 0);
        assert_eq!(spawn_if_due(&mut state, 1501), 1);
        assert_eq!(spawn_if_due(&mut state, 2000), 0);
        assert_eq!(spawn_if_due(&mut state, 3002), 1);
        assert_eq!(state.enemies.len(), 2);
        assert_ne!(state.enemies[0].id, state.enemies[1].id);
    }
}
