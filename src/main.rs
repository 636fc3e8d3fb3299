//! Spellcast headless runner
//!
//! Drives the game with a simulated 60 fps clock and an autopilot typist.
//! Usage: `spellcast [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use spellcast::audio::AudioManager;
    use spellcast::game::Presenter;
    use spellcast::platform::{Clock, ManualClock};
    use spellcast::sim::{GamePhase, GameState, Snapshot, SpellKind};
    use spellcast::ui::{self, HudText};
    use spellcast::{Game, Settings};

    const FRAME_MS: u64 = 16;
    const DEFAULT_FRAMES: u64 = 60 * 60 * 3;

    /// Logs HUD changes and keeps frame stats
    #[derive(Default)]
    struct LogPresenter {
        frames: u64,
        peak_enemies: usize,
    }

    impl Presenter for LogPresenter {
        fn present(&mut self, snapshot: &Snapshot<'_>) {
            self.frames += 1;
            self.peak_enemies = self.peak_enemies.max(snapshot.enemies.len());
        }

        fn update_hud(&mut self, hud: &HudText) {
            log::debug!(
                "HP {} | Score {} | Level {} | {}",
                hud.health,
                hud.score,
                hud.level,
                hud.incantation
            );
        }
    }

    /// Pick the spell a sensible player would type next
    fn choose_spell(state: &GameState, now_ms: u64) -> Option<SpellKind> {
        let ready = |kind: SpellKind| state.spellbook.get(kind).is_ready(now_ms);
        let player = &state.player;

        if player.health * 2 < player.max_health && ready(SpellKind::Heal) {
            return Some(SpellKind::Heal);
        }
        let threatened = state
            .enemies
            .iter()
            .any(|e| e.pos.distance(player.pos) < player.radius * 4.0);
        if threatened && !player.shield_active && ready(SpellKind::Shield) {
            return Some(SpellKind::Shield);
        }
        if state.enemies.is_empty() {
            return None;
        }
        [SpellKind::Chain, SpellKind::Lightning, SpellKind::Fire, SpellKind::Ice]
            .into_iter()
            .find(|&kind| ready(kind))
    }

    /// Feed keys for one frame, like the idle-mode paddle but for typing
    fn autopilot<C: Clock>(game: &mut Game<C>, now_ms: u64) {
        match game.phase() {
            GamePhase::ChoosingUpgrade => game.on_numeric_choice(1),
            GamePhase::Playing => {
                if !game.state.incantations.buffer().is_empty() {
                    return;
                }
                let Some(kind) = choose_spell(&game.state, now_ms) else {
                    return;
                };
                let Some(word) = game.state.incantations.incantation_for(kind) else {
                    return;
                };
                let word = word.to_string();
                for letter in word.chars() {
                    game.on_alpha_key(letter);
                }
            }
            GamePhase::NotStarted | GamePhase::GameOver => {}
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_or_default(Path::new(&path)),
            None => Settings::default(),
        };
        let max_frames = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FRAMES);

        let clock = ManualClock::new(0);
        let mut game = Game::new(&settings, clock.clone());
        let mut audio = settings.audio();
        let mut presenter = LogPresenter::default();

        for line in ui::instructions(&game.state.incantations, &game.state.spellbook) {
            log::info!("{}", line);
        }

        let Some(mut token) = game.on_start_command() else {
            log::error!("Could not start a run");
            return;
        };

        let mut last_phase = game.phase();
        while presenter.frames < max_frames {
            clock.advance(FRAME_MS);
            autopilot(&mut game, clock.now_ms());
            match game.run_frame(token, &mut presenter, &mut audio) {
                Some(next) => token = next,
                None => break,
            }

            let phase = game.phase();
            if phase != last_phase && phase == GamePhase::ChoosingUpgrade {
                let offers = &game.state.upgrade_offers;
                for line in ui::upgrade_menu(game.state.level, offers) {
                    log::info!("{}", line);
                }
            }
            last_phase = phase;
        }

        report(&game, &presenter, &audio);
    }

    fn report<C: Clock>(game: &Game<C>, presenter: &LogPresenter, audio: &AudioManager) {
        if game.phase() == GamePhase::GameOver {
            for line in ui::game_over(game.state.score, game.state.level) {
                log::info!("{}", line);
            }
        }
        log::info!(
            "{} frames, peak {} enemies on screen, {} sound cues",
            presenter.frames,
            presenter.peak_enemies,
            audio.played()
        );

        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spellcast (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host links the library directly
}
