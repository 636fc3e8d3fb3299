//! Sound cues
//!
//! The core only decides *when* a sound plays. Hosts implement `AudioSink`
//! to actually produce it.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Enemy killed by a spell (not by touching the player)
    EnemyDeath,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::EnemyDied { .. } => Some(SoundEffect::EnemyDeath),
            _ => None,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Volume-aware sink that reports cues through the logger
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.5,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues actually played (muted cues are not counted)
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::trace!("Sound {:?} at volume {:.2}", effect, vol);
    }
}
