//! Score, levels, upgrades and phase transitions
//!
//! Every `KILLS_PER_LEVEL` kills the level is complete: the simulation
//! freezes and three upgrades are offered. Picking one applies it, bumps the
//! level and fully heals the player.

use rand::seq::SliceRandom;
use serde::Serialize;

use super::spellbook::SpellKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// What an upgrade changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpgradeType {
    /// Target spell damage
    Damage,
    /// Target spell projectile speed
    Speed,
    /// Heal amount of the target spell
    Heal,
    MaxHealth,
    /// Damage of every damaging spell
    AllDamage,
    /// Speed of every moving spell
    AllSpeed,
    MultiCast,
    AutoCast,
    /// Chain Lightning link count
    ChainCount,
}

/// Catalog entry. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Upgrade {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: UpgradeType,
    pub spell: Option<SpellKind>,
    pub value: i32,
}

const fn upgrade(
    name: &'static str,
    description: &'static str,
    kind: UpgradeType,
    spell: Option<SpellKind>,
    value: i32,
) -> Upgrade {
    Upgrade {
        name,
        description,
        kind,
        spell,
        value,
    }
}

/// Full upgrade catalog
pub static UPGRADES: [Upgrade; 13] = [
    upgrade("Fire Mastery", "Fireball damage +10", UpgradeType::Damage, Some(SpellKind::Fire), 10),
    upgrade("Ice Mastery", "Ice Spike damage +10", UpgradeType::Damage, Some(SpellKind::Ice), 10),
    upgrade("Lightning Mastery", "Lightning damage +10", UpgradeType::Damage, Some(SpellKind::Lightning), 10),
    upgrade("Healing Mastery", "Heal restores +10 HP", UpgradeType::Heal, Some(SpellKind::Heal), 10),
    upgrade("Fire Speed", "Fireball speed +2", UpgradeType::Speed, Some(SpellKind::Fire), 2),
    upgrade("Ice Speed", "Ice Spike speed +2", UpgradeType::Speed, Some(SpellKind::Ice), 2),
    upgrade("Lightning Speed", "Lightning speed +2", UpgradeType::Speed, Some(SpellKind::Lightning), 2),
    upgrade("Health Boost", "Max health +20", UpgradeType::MaxHealth, None, 20),
    upgrade("Spell Efficiency", "All spell damage +5", UpgradeType::AllDamage, None, 5),
    upgrade("Rapid Casting", "All spell speed +1", UpgradeType::AllSpeed, None, 1),
    upgrade("Multi-Cast", "Cast +1 projectile per spell", UpgradeType::MultiCast, None, 1),
    upgrade("Auto-Cast", "Auto-cast random spell every 3s", UpgradeType::AutoCast, None, 1),
    upgrade("Chain Mastery", "Chain Lightning chains +1 enemy", UpgradeType::ChainCount, Some(SpellKind::Chain), 1),
];

/// Look up a catalog entry by name
pub fn find_upgrade(name: &str) -> Option<&'static Upgrade> {
    UPGRADES.iter().find(|u| u.name == name)
}

/// Level the score has earned
pub fn earned_level(score: u32) -> u32 {
    (score / SCORE_PER_KILL) / KILLS_PER_LEVEL + 1
}

/// Begin a new run. Only valid before the first run or after game over.
pub fn start_game(state: &mut GameState, now_ms: u64) -> bool {
    if !matches!(state.phase, GamePhase::NotStarted | GamePhase::GameOver) {
        return false;
    }
    state.start(now_ms);
    log::info!("Game started (seed {})", state.seed);
    true
}

/// Post-event check while playing: game over first, then level completion.
/// Returns true if the session is still in the Playing phase.
pub fn check_transitions(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {}, level {}", state.score, state.level);
        state.push_event(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        return false;
    }
    if earned_level(state.score) > state.level {
        offer_upgrades(state);
        return false;
    }
    true
}

/// Freeze play and draw three distinct upgrades in random order
fn offer_upgrades(state: &mut GameState) {
    let mut pool: Vec<&'static Upgrade> = UPGRADES.iter().collect();
    pool.shuffle(&mut state.rng);
    pool.truncate(UPGRADE_OFFER_COUNT);
    state.upgrade_offers = pool;
    state.phase = GamePhase::ChoosingUpgrade;
    log::info!(
        "Level {} complete, offering: {:?}",
        state.level,
        state.upgrade_offers.iter().map(|u| u.name).collect::<Vec<_>>()
    );
    state.push_event(GameEvent::LevelComplete { level: state.level });
}

/// Pick an offered upgrade by index (0-based). Invalid picks are ignored.
pub fn select_upgrade(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::ChoosingUpgrade {
        return false;
    }
    let Some(&upgrade) = state.upgrade_offers.get(index) else {
        return false;
    };
    apply_upgrade(state, upgrade);
    state.upgrade_offers.clear();
    state.level += 1;
    state.player.health = state.player.max_health;
    state.phase = GamePhase::Playing;
    log::info!("Chose {}; now level {}", upgrade.name, state.level);
    state.push_event(GameEvent::UpgradeApplied { name: upgrade.name });
    true
}

/// Apply an upgrade's effect to the spellbook or session counters
pub fn apply_upgrade(state: &mut GameState, upgrade: &Upgrade) {
    let value = upgrade.value;
    match (upgrade.kind, upgrade.spell) {
        (UpgradeType::Damage, Some(kind)) => state.spellbook.get_mut(kind).damage += value,
        (UpgradeType::Speed, Some(kind)) => state.spellbook.get_mut(kind).speed += value as f32,
        // Heal spells store healing as negative damage
        (UpgradeType::Heal, Some(kind)) => state.spellbook.get_mut(kind).damage -= value,
        (UpgradeType::ChainCount, Some(kind)) => {
            let spell = state.spellbook.get_mut(kind);
            spell.chain_count = Some(spell.chain_count.unwrap_or(0).saturating_add_signed(value));
        }
        (UpgradeType::MaxHealth, _) => {
            state.player.max_health += value;
            state.player.health += value;
        }
        (UpgradeType::AllDamage, _) => {
            for spell in state.spellbook.iter_mut().filter(|s| s.damage > 0) {
                spell.damage += value;
            }
        }
        (UpgradeType::AllSpeed, _) => {
            for spell in state.spellbook.iter_mut().filter(|s| s.speed > 0.0) {
                spell.speed += value as f32;
            }
        }
        (UpgradeType::MultiCast, _) => state.multi_cast_level += 1,
        (UpgradeType::AutoCast, _) => state.auto_cast_level += 1,
        (kind, None) => log::warn!("Upgrade {:?} needs a target spell", kind),
    }
}
