//! Frame-driven game controller
//!
//! Owns the session, its clock and the input queue. The host calls
//! `run_frame` once per displayed frame with the token it got back last
//! time. A run that ends returns no token, and starting a new run issues a
//! token from a fresh generation, so a frame scheduled before a restart can
//! never drive the new session.

use crate::audio::{AudioSink, SoundEffect};
use crate::platform::{Clock, InputQueue};
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GamePhase, GameState, Snapshot, start_game, tick};
use crate::ui::HudText;

/// Receives a read-only view of the world each frame
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot<'_>);

    /// Called only when the HUD text changed
    fn update_hud(&mut self, hud: &HudText);
}

/// Permission to run one frame of a particular run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

pub struct Game<C: Clock> {
    pub state: GameState,
    clock: C,
    input: InputQueue,
    generation: u64,
    last_hud: Option<HudText>,
}

impl<C: Clock> Game<C> {
    pub fn new(settings: &Settings, clock: C) -> Self {
        let seed = settings.seed.unwrap_or_else(seed_from_time);
        let mut state = GameState::new(seed, settings.arena_width, settings.arena_height);
        state.incantations = settings.matcher();
        Self {
            state,
            clock,
            input: InputQueue::new(),
            generation: 0,
            last_hud: None,
        }
    }

    /// Letter key: feeds the incantation buffer on the next frame
    pub fn on_alpha_key(&mut self, letter: char) {
        if letter.is_ascii_alphabetic() {
            self.input.push(Command::Letter(letter.to_ascii_uppercase()));
        }
    }

    /// Upgrade menu key (1-3); anything else is ignored when drained
    pub fn on_numeric_choice(&mut self, choice: u8) {
        self.input.push(Command::ChooseUpgrade(choice));
    }

    /// Raw key press from the host
    pub fn on_key(&mut self, key: char) -> Option<FrameToken> {
        if key == ' ' {
            return self.on_start_command();
        }
        self.input.push_key(key);
        None
    }

    /// Start a run. Handled immediately because no frames run while idle.
    /// Returns the token for the first frame, or `None` if a run is active.
    pub fn on_start_command(&mut self) -> Option<FrameToken> {
        let now = self.clock.now_ms();
        if !start_game(&mut self.state, now) {
            return None;
        }
        self.input.clear();
        self.state.drain_events();
        self.last_hud = None;
        self.generation += 1;
        Some(FrameToken {
            generation: self.generation,
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.state)
    }

    /// Run one frame: drain input, tick, emit cues, HUD and snapshot.
    /// Returns the token for the next frame, or `None` when the loop must stop.
    pub fn run_frame(
        &mut self,
        token: FrameToken,
        presenter: &mut impl Presenter,
        audio: &mut impl AudioSink,
    ) -> Option<FrameToken> {
        if token.generation != self.generation {
            log::debug!("Dropping stale frame from generation {}", token.generation);
            return None;
        }

        let now = self.clock.now_ms();
        let input = self.input.drain();
        tick(&mut self.state, &input, now);

        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                audio.play(effect);
            }
            if let GameEvent::GameOver { score, level } = event {
                log::info!("Run ended at level {} with {} points", level, score);
            }
        }

        let hud = HudText::of(&self.state);
        if self.last_hud.as_ref() != Some(&hud) {
            presenter.update_hud(&hud);
            self.last_hud = Some(hud);
        }
        presenter.present(&Snapshot::of(&self.state));

        if self.state.phase == GamePhase::GameOver {
            // Retire every outstanding token for this run
            self.generation += 1;
            return None;
        }
        Some(token)
    }
}

fn seed_from_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
