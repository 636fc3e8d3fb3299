//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock time is passed in, sampled once per tick
//! - Seeded RNG only
//! - Stable iteration order (collection order, ties go to the earlier entity)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod effects;
pub mod incantation;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod spellbook;
pub mod state;
pub mod tick;

pub use combat::{CastOutcome, cast, cast_ignoring_cooldown};
pub use incantation::IncantationMatcher;
pub use progression::{UPGRADES, Upgrade, UpgradeType, apply_upgrade, select_upgrade, start_game};
pub use snapshot::Snapshot;
pub use spawner::spawn_wave;
pub use spellbook::{Spell, SpellKind, Spellbook};
pub use state::{
    ChainEffect, Enemy, EnemyType, GameEvent, GamePhase, GameState, Particle, Player, Projectile,
};
pub use tick::{Command, TickInput, tick};
