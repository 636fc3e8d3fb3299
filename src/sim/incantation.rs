//! Typed-letter spell recognition
//!
//! Letters accumulate in a rolling buffer. After every letter the buffer is
//! searched for each configured incantation, in registry order, and the first
//! one contained anywhere in the buffer is cast. Overlapping incantations are
//! not disambiguated: with `F` and `FIRE` both configured, typing `F` casts
//! the first one before the longer word can be finished.

use serde::{Deserialize, Serialize};

use super::spellbook::SpellKind;
use crate::consts::INCANTATION_BUFFER_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncantationMatcher {
    /// (spell, uppercase incantation) in registry order
    incantations: Vec<(SpellKind, String)>,
    buffer: String,
}

impl Default for IncantationMatcher {
    fn default() -> Self {
        Self::new(default_incantations())
    }
}

/// One letter per spell: F, I, L, H, C, S
pub fn default_incantations() -> Vec<(SpellKind, String)> {
    SpellKind::ALL
        .iter()
        .map(|&kind| {
            let letter = match kind {
                SpellKind::Fire => "F",
                SpellKind::Ice => "I",
                SpellKind::Lightning => "L",
                SpellKind::Heal => "H",
                SpellKind::Chain => "C",
                SpellKind::Shield => "S",
            };
            (kind, letter.to_string())
        })
        .collect()
}

impl IncantationMatcher {
    /// Build a matcher. Entries are reordered into registry order; empty
    /// incantations are dropped, and a later entry for the same spell
    /// replaces an earlier one.
    pub fn new(incantations: impl IntoIterator<Item = (SpellKind, String)>) -> Self {
        let mut table: Vec<(SpellKind, String)> = Vec::new();
        for (kind, word) in incantations {
            let word = word.trim().to_uppercase();
            if word.is_empty() {
                log::warn!("Ignoring empty incantation for {:?}", kind);
                continue;
            }
            table.retain(|(k, _)| *k != kind);
            table.push((kind, word));
        }
        table.sort_by_key(|(kind, _)| SpellKind::ALL.iter().position(|k| k == kind));

        Self {
            incantations: table,
            buffer: String::new(),
        }
    }

    /// Defaults for every spell, with `overrides` replacing only the spells
    /// they name
    pub fn with_overrides(overrides: impl IntoIterator<Item = (SpellKind, String)>) -> Self {
        Self::new(default_incantations().into_iter().chain(overrides))
    }

    /// Feed one key. Non-alphabetic characters are ignored.
    /// Returns the spell whose incantation completed, clearing the buffer.
    pub fn submit_letter(&mut self, letter: char) -> Option<SpellKind> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        self.buffer.push(letter.to_ascii_uppercase());

        let matched = self
            .incantations
            .iter()
            .find(|(_, word)| self.buffer.contains(word.as_str()))
            .map(|(kind, _)| *kind);

        if matched.is_some() || self.buffer.len() > INCANTATION_BUFFER_LIMIT {
            self.buffer.clear();
        }
        matched
    }

    /// Pending letters, uppercase
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn incantation_for(&self, kind: SpellKind) -> Option<&str> {
        self.incantations
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, word)| word.as_str())
    }

    /// Configured incantations in registry order
    pub fn incantations(&self) -> &[(SpellKind, String)] {
        &self.incantations
    }
}
