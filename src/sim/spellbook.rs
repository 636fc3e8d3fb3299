//! Spell definitions and their mutable upgrade/cooldown state

use serde::{Deserialize, Serialize};

use crate::rgb;

/// Every spell the player can learn, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpellKind {
    Fire,
    Ice,
    #[serde(alias = "LIGHT")]
    Lightning,
    Heal,
    Chain,
    Shield,
}

impl SpellKind {
    /// Registry order. Incantation ties are broken by this order.
    pub const ALL: [SpellKind; 6] = [
        SpellKind::Fire,
        SpellKind::Ice,
        SpellKind::Lightning,
        SpellKind::Heal,
        SpellKind::Chain,
        SpellKind::Shield,
    ];

    /// Spells the auto-caster picks from
    pub const AUTO_CASTABLE: [SpellKind; 4] = [
        SpellKind::Fire,
        SpellKind::Ice,
        SpellKind::Lightning,
        SpellKind::Chain,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A spell's stats. Negative damage is a heal magnitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spell {
    pub kind: SpellKind,
    pub name: String,
    pub damage: i32,
    pub color: u32,
    pub radius: f32,
    pub speed: f32,
    pub cooldown_ms: u64,
    /// Clock time of the last successful cast (None = never cast)
    pub last_cast_ms: Option<u64>,
    /// Only Chain Lightning carries a link count
    pub chain_count: Option<u32>,
}

impl Spell {
    /// Starting stats for a spell
    pub fn base(kind: SpellKind) -> Self {
        let (name, damage, color, radius, speed, cooldown_ms) = match kind {
            SpellKind::Fire => ("Fireball", 30, rgb(0xff, 0x44, 0x44), 8.0, 5.0, 1000),
            SpellKind::Ice => ("Ice Spike", 25, rgb(0x44, 0xaa, 0xff), 6.0, 6.0, 800),
            SpellKind::Lightning => ("Lightning", 40, rgb(0xff, 0xff, 0x44), 4.0, 8.0, 1500),
            SpellKind::Heal => ("Heal", -30, rgb(0x44, 0xff, 0x44), 15.0, 0.0, 3000),
            SpellKind::Chain => ("Chain Lightning", 35, rgb(0xff, 0xaa, 0x44), 0.0, 0.0, 2000),
            SpellKind::Shield => ("Shield", 0, rgb(0x88, 0x88, 0xff), 25.0, 0.0, 4000),
        };
        Self {
            kind,
            name: name.to_string(),
            damage,
            color,
            radius,
            speed,
            cooldown_ms,
            last_cast_ms: None,
            chain_count: (kind == SpellKind::Chain).then_some(3),
        }
    }

    /// True if the cooldown has elapsed at `now_ms`
    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_cast_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
        }
    }

    /// Fraction of the cooldown elapsed, clamped to [0, 1]
    pub fn cooldown_progress(&self, now_ms: u64) -> f32 {
        match self.last_cast_ms {
            None => 1.0,
            Some(_) if self.cooldown_ms == 0 => 1.0,
            Some(last) => {
                (now_ms.saturating_sub(last) as f32 / self.cooldown_ms as f32).min(1.0)
            }
        }
    }
}

/// Registry of all spells, indexed by kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spellbook {
    spells: Vec<Spell>,
}

impl Default for Spellbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Spellbook {
    pub fn new() -> Self {
        Self {
            spells: SpellKind::ALL.iter().map(|&k| Spell::base(k)).collect(),
        }
    }

    /// Restore base stats and clear every cooldown
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn get(&self, kind: SpellKind) -> &Spell {
        &self.spells[kind.index()]
    }

    pub fn get_mut(&mut self, kind: SpellKind) -> &mut Spell {
        &mut self.spells[kind.index()]
    }

    /// Spells in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Spell> {
        self.spells.iter_mut()
    }
}
