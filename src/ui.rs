//! HUD and menu text
//!
//! Plain strings for whatever text layer the host has. The game pushes a new
//! `HudText` only when one of its fields changes.

use crate::sim::{GameState, IncantationMatcher, Spellbook, Upgrade};

const IDLE_PROMPT: &str = "Press keys to cast spells!";

/// On-screen status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    /// "health/max"
    pub health: String,
    pub score: u32,
    pub level: u32,
    /// Pending incantation letters or the idle prompt
    pub incantation: String,
}

impl HudText {
    pub fn of(state: &GameState) -> Self {
        Self {
            health: format!("{}/{}", state.player.health, state.player.max_health),
            score: state.score,
            level: state.level,
            incantation: incantation_display(state.incantations.buffer()),
        }
    }
}

pub fn incantation_display(buffer: &str) -> String {
    if buffer.is_empty() {
        IDLE_PROMPT.to_string()
    } else {
        format!("Spell: {}", buffer)
    }
}

/// Title screen: one line per spell, "F + I = Fireball"
pub fn instructions(matcher: &IncantationMatcher, spellbook: &Spellbook) -> Vec<String> {
    matcher
        .incantations()
        .iter()
        .map(|(kind, word)| {
            let keys: Vec<String> = word.chars().map(String::from).collect();
            format!("{} = {}", keys.join(" + "), spellbook.get(*kind).name)
        })
        .collect()
}

pub fn upgrade_menu(level: u32, offers: &[&Upgrade]) -> Vec<String> {
    let mut lines = vec![format!("Level {} Complete!", level), "Choose your upgrade:".to_string()];
    for (i, upgrade) in offers.iter().enumerate() {
        lines.push(format!("{}. {} - {}", i + 1, upgrade.name, upgrade.description));
    }
    lines.push("Press 1, 2, or 3 to select your upgrade!".to_string());
    lines
}

pub fn game_over(score: u32, level: u32) -> Vec<String> {
    vec![
        "Game Over!".to_string(),
        format!("Final Score: {}", score),
        format!("Level Reached: {}", level),
        "Press SPACE to play again!".to_string(),
    ]
}

/// Cooldown bar fill per spell, in registry order
pub fn cooldown_bars(spellbook: &Spellbook, now_ms: u64) -> Vec<(&str, f32)> {
    spellbook
        .iter()
        .map(|s| (s.name.as_str(), s.cooldown_progress(now_ms)))
        .collect()
}
