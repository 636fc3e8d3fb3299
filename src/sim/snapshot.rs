//! Read-only view of the world for the presentation layer
//!
//! Borrowed from `GameState` once per frame; never mutates anything.

use serde::Serialize;

use super::state::{ChainEffect, Enemy, GamePhase, GameState, Particle, Player, Projectile};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub tick: u64,
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub particles: &'a [Particle],
    pub chain_effects: &'a [ChainEffect],
    pub shield_active: bool,
    pub screen_shake: f32,
}

impl<'a> Snapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            arena_width: state.arena_width,
            arena_height: state.arena_height,
            player: &state.player,
            enemies: &state.enemies,
            projectiles: &state.projectiles,
            particles: &state.particles,
            chain_effects: &state.chain_effects,
            shield_active: state.player.shield_active,
            screen_shake: state.screen_shake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyType;
    use glam::Vec2;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(3, 800.0, 600.0);
        state.start(0);
        state.spawn_enemy_at(EnemyType::Fast, Vec2::new(10.0, 10.0), 2.0);
        state.player.activate_shield();

        let snap = Snapshot::of(&state);
        assert_eq!(snap.enemies.len(), 1);
        assert!(snap.shield_active);
        assert_eq!(snap.phase, GamePhase::Playing);

        let json = serde_json::to_value(snap).expect("snapshot serializes");
        assert_eq!(json["enemies"][0]["kind"], "Fast");
        assert_eq!(json["player"]["health"], 100);
    }
}
