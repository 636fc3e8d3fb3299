//! Spellcast - a typing-driven arcade spellcasting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spells, enemies, collisions, progression)
//! - `platform`: Input queue and clock sources
//! - `game`: Frame-driven controller tying the simulation to its adapters
//! - `ui`: HUD and menu text
//! - `audio`: Sound cue sink
//! - `settings`: Runtime preferences

pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{FrameToken, Game};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Delay between enemy waves (ms). Not re-tuned by level.
    pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 1500;
    /// Delay between auto-cast attempts (ms)
    pub const AUTO_CAST_INTERVAL_MS: u64 = 3000;

    /// Incantation buffer is cleared once it grows past this many letters
    pub const INCANTATION_BUFFER_LIMIT: usize = 10;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_START_HEALTH: i32 = 100;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_BASE_HEALTH: f32 = 20.0;
    pub const ENEMY_HEALTH_PER_LEVEL: f32 = 5.0;
    pub const ENEMY_BASE_SPEED: f32 = 0.5;
    pub const ENEMY_SPEED_JITTER: f32 = 0.5;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.05;
    /// Spawn distance outside the visible edge
    pub const ENEMY_SPAWN_OFFSET: f32 = 30.0;
    pub const MAX_ENEMIES_PER_WAVE: u32 = 4;
    /// Arena diagonal that maps to a speed scale of 1.0
    pub const REFERENCE_DIAGONAL: f32 = 1000.0;

    /// Contact damage
    pub const CONTACT_DAMAGE: i32 = 10;
    pub const BOMBER_EXTRA_DAMAGE: i32 = 20;

    /// Projectiles
    pub const PROJECTILE_LIFETIME_TICKS: u32 = 60;
    /// Projectiles this far outside the arena are discarded
    pub const BOUNDS_MARGIN: f32 = 100.0;

    /// Shield
    pub const SHIELD_DURATION_TICKS: u32 = 120;
    pub const SHIELD_KNOCKBACK_DISTANCE: f32 = 50.0;

    /// Chain lightning
    pub const CHAIN_MAX_LINK_DISTANCE: f32 = 300.0;
    pub const CHAIN_EFFECT_TICKS: u32 = 18;

    /// Scoring
    pub const SCORE_PER_KILL: u32 = 10;
    pub const KILLS_PER_LEVEL: u32 = 10;
    pub const UPGRADE_OFFER_COUNT: usize = 3;

    /// Screen shake
    pub const SCREEN_SHAKE_KICK: f32 = 16.0;
    pub const SCREEN_SHAKE_DECAY: f32 = 0.9;
    pub const SCREEN_SHAKE_FLOOR: f32 = 0.1;
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        Some(delta / distance)
    } else {
        None
    }
}

/// Convert polar (r, theta) around `center` to cartesian
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Pack a `#rrggbb` colour into an `0xRRGGBB` integer at compile time
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
