//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame. Commands queued
//! since the previous tick are applied first, then (only while Playing) the
//! world advances in a fixed order: auto-cast, spawning, enemies,
//! projectiles, particles and effects, shield timer.

use super::collision::{circles_overlap, first_overlapping, out_of_bounds};
use super::combat::{auto_cast, cast};
use super::effects;
use super::progression::{check_transitions, select_upgrade, start_game};
use super::spawner::spawn_if_due;
use super::state::{EnemyType, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{direction_to, polar_offset};

/// A player command, already decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Alphabetic key for the incantation buffer
    Letter(char),
    /// Upgrade menu choice, 1-based
    ChooseUpgrade(u8),
    Start,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands in arrival order
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn letters(text: &str) -> Self {
        Self {
            commands: text.chars().map(Command::Letter).collect(),
        }
    }
}

/// Advance the game state by one tick. `now_ms` is the clock sampled once
/// for this tick; every cooldown and timer comparison uses it.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    for &command in &input.commands {
        apply_command(state, command, now_ms);
    }

    // Never advance while choosing an upgrade, before start or after game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.decay_screen_shake();
    state.time_ticks += 1;

    auto_cast(state, now_ms);
    if !check_transitions(state) {
        return;
    }

    spawn_if_due(state, now_ms);

    update_enemies(state);
    if !check_transitions(state) {
        return;
    }

    update_projectiles(state);
    if !check_transitions(state) {
        return;
    }

    update_particles(state);
    state.player.tick_shield();
}

fn apply_command(state: &mut GameState, command: Command, now_ms: u64) {
    match command {
        Command::Start => {
            start_game(state, now_ms);
        }
        Command::ChooseUpgrade(choice @ 1..=3) => {
            select_upgrade(state, usize::from(choice - 1));
        }
        Command::ChooseUpgrade(_) => {}
        Command::Letter(letter) => {
            if state.phase != GamePhase::Playing {
                return;
            }
            if let Some(kind) = state.incantations.submit_letter(letter) {
                cast(state, kind, now_ms);
                check_transitions(state);
            }
        }
    }
}

/// Move enemies toward the player and resolve contact
fn update_enemies(state: &mut GameState) {
    let GameState {
        enemies,
        player,
        particles,
        rng,
        events,
        ..
    } = state;

    enemies.retain_mut(|enemy| {
        // No inertia: re-aim at the player's current position every tick
        if let Some(dir) = direction_to(enemy.pos, player.pos) {
            enemy.vel = dir * enemy.speed;
        }
        enemy.pos += enemy.vel;

        if !circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius) {
            return true;
        }

        if player.shield_active {
            let away = enemy.pos - player.pos;
            let angle = away.y.atan2(away.x);
            enemy.pos = polar_offset(player.pos, SHIELD_KNOCKBACK_DISTANCE, angle);
            effects::shield_hit_burst(particles, rng, enemy.pos);
            events.push(GameEvent::ShieldBlocked { pos: enemy.pos });
            return true;
        }

        let mut damage = CONTACT_DAMAGE;
        effects::hit_burst(particles, rng, enemy.pos, effects::HIT_COLOR);
        if enemy.kind == EnemyType::Bomber {
            effects::explosion_burst(particles, rng, enemy.pos);
            damage += BOMBER_EXTRA_DAMAGE;
        }
        player.health -= damage;
        events.push(GameEvent::PlayerHit { damage });
        log::debug!("Player hit by {:?} for {}", enemy.kind, damage);
        false
    });
}

/// Move projectiles, expire them, and resolve the first enemy each one hits
fn update_projectiles(state: &mut GameState) {
    let GameState {
        projectiles,
        enemies,
        particles,
        rng,
        events,
        score,
        screen_shake,
        arena_width,
        arena_height,
        ..
    } = state;
    let (width, height) = (*arena_width, *arena_height);

    projectiles.retain_mut(|projectile| {
        if projectile.life == 0 {
            return false;
        }
        projectile.life -= 1;
        projectile.pos += projectile.vel;

        if out_of_bounds(projectile.pos, width, height, BOUNDS_MARGIN) {
            return false;
        }

        let Some(idx) = first_overlapping(enemies, projectile.pos, projectile.radius) else {
            return true;
        };

        effects::hit_burst(particles, rng, projectile.pos, projectile.color);
        if enemies[idx].take_damage(projectile.damage) {
            // Removed now so later projectiles this tick can't hit it
            let dead = enemies.remove(idx);
            *score += SCORE_PER_KILL;
            *screen_shake = SCREEN_SHAKE_KICK;
            effects::explosion_burst(particles, rng, dead.pos);
            events.push(GameEvent::EnemyDied {
                id: dead.id,
                pos: dead.pos,
            });
        }
        false
    });
}

/// Age particles and chain paths
fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
    state.chain_effects.retain_mut(|effect| {
        effect.elapsed += 1;
        effect.elapsed <= effect.max_ticks
    });
}
