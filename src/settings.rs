//! Game settings and preferences
//!
//! Loaded from a JSON file; anything missing falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::AudioManager;
use crate::sim::incantation::default_incantations;
use crate::sim::{IncantationMatcher, SpellKind};

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena size in pixels; the player sits at its center
    pub arena_width: f32,
    pub arena_height: f32,
    /// RNG seed (None = pick from the system clock)
    pub seed: Option<u64>,
    /// Letter sequence per spell, in any order. Spells left out keep
    /// their default letter.
    pub incantations: Vec<(SpellKind, String)>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: 1280.0,
            arena_height: 720.0,
            seed: None,
            incantations: default_incantations(),
            master_volume: 0.8,
            sfx_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        for (kind, word) in &self.incantations {
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(SettingsError::Invalid(format!(
                    "incantation for {:?} must be letters only, got {:?}",
                    kind, word
                )));
            }
        }
        Ok(())
    }

    pub fn matcher(&self) -> IncantationMatcher {
        IncantationMatcher::with_overrides(self.incantations.iter().cloned())
    }

    pub fn audio(&self) -> AudioManager {
        let mut audio = AudioManager::new();
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_muted(self.muted);
        audio
    }
}
