//! Game state and core simulation types
//!
//! `GameState` is the whole session: every subsystem receives it by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::incantation::IncantationMatcher;
use super::progression::Upgrade;
use super::spellbook::{SpellKind, Spellbook};
use crate::consts::*;
use crate::rgb;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    NotStarted,
    /// Active gameplay
    Playing,
    /// Level cleared; simulation frozen until an upgrade is picked
    ChoosingUpgrade,
    /// Run ended; waiting for the start command
    GameOver,
}

/// Things that happened during a tick, for adapters and logging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    SpellCast { kind: SpellKind },
    CastOnCooldown { kind: SpellKind },
    WaveSpawned { count: usize },
    /// Enemy killed by spell damage (not by touching the player)
    EnemyDied { id: u32, pos: Vec2 },
    PlayerHit { damage: i32 },
    ShieldBlocked { pos: Vec2 },
    LevelComplete { level: u32 },
    UpgradeApplied { name: &'static str },
    GameOver { score: u32, level: u32 },
}

/// The player, pinned to the arena center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub shield_active: bool,
    pub shield_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_START_HEALTH,
            shield_active: false,
            shield_ticks: 0,
        }
    }

    /// Restore health, never above max
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Start (or restart) the invulnerability window
    pub fn activate_shield(&mut self) {
        self.shield_active = true;
        self.shield_ticks = SHIELD_DURATION_TICKS;
    }

    /// Count the shield down by one tick
    pub fn tick_shield(&mut self) {
        if self.shield_active {
            self.shield_ticks = self.shield_ticks.saturating_sub(1);
            if self.shield_ticks == 0 {
                self.shield_active = false;
            }
        }
    }
}

/// A spell projectile. Flies in a straight line; no homing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    pub damage: i32,
    pub spell: SpellKind,
    /// Remaining lifetime in ticks
    pub life: u32,
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyType {
    #[default]
    Normal,
    Fast,
    Tank,
    Bomber,
}

impl EnemyType {
    /// Types rolled when a special enemy is chosen
    pub const SPECIAL: [EnemyType; 3] = [EnemyType::Fast, EnemyType::Tank, EnemyType::Bomber];

    pub fn health_multiplier(self) -> f32 {
        match self {
            EnemyType::Normal => 1.0,
            EnemyType::Fast => 0.7,
            EnemyType::Tank => 2.0,
            EnemyType::Bomber => 0.8,
        }
    }

    pub fn speed_multiplier(self) -> f32 {
        match self {
            EnemyType::Normal => 1.0,
            EnemyType::Fast => 1.5,
            EnemyType::Tank => 0.7,
            EnemyType::Bomber => 1.2,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            EnemyType::Normal => rgb(0xff, 0x44, 0x44),
            EnemyType::Fast => rgb(0xff, 0x88, 0x44),
            EnemyType::Tank => rgb(0x88, 0x44, 0x44),
            EnemyType::Bomber => rgb(0xff, 0x44, 0x88),
        }
    }
}

/// An enemy converging on the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub kind: EnemyType,
}

impl Enemy {
    /// Apply spell damage. Returns true if this killed the enemy.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        // Health only ever goes down while alive
        self.health -= damage.max(0) as f32;
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A particle for visual effects (no gameplay effect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// Remaining lifetime in ticks
    pub life: u32,
}

/// Lingering chain-lightning path: player, then each link at cast time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEffect {
    pub points: Vec<Vec2>,
    pub elapsed: u32,
    pub max_ticks: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub arena_width: f32,
    pub arena_height: f32,
    pub score: u32,
    pub level: u32,
    /// Projectiles per combat cast
    pub multi_cast_level: u32,
    /// Auto-cast enabled when above zero
    pub auto_cast_level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Clock time of the last wave
    pub last_spawn_ms: u64,
    /// Clock time of the last auto-cast attempt
    pub last_auto_cast_ms: u64,
    pub player: Player,
    pub spellbook: Spellbook,
    pub incantations: IncantationMatcher,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub chain_effects: Vec<ChainEffect>,
    /// Upgrades on offer while choosing (empty otherwise)
    pub upgrade_offers: Vec<&'static Upgrade>,
    /// Authoritative screen shake magnitude
    pub screen_shake: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session in the NotStarted phase
    pub fn new(seed: u64, arena_width: f32, arena_height: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            arena_width,
            arena_height,
            score: 0,
            level: 1,
            multi_cast_level: 1,
            auto_cast_level: 0,
            time_ticks: 0,
            last_spawn_ms: 0,
            last_auto_cast_ms: 0,
            player: Player::new(Vec2::new(arena_width / 2.0, arena_height / 2.0)),
            spellbook: Spellbook::new(),
            incantations: IncantationMatcher::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            chain_effects: Vec::new(),
            upgrade_offers: Vec::new(),
            screen_shake: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset everything a new run starts from and enter Playing.
    /// Arena size, RNG stream and incantation config carry over.
    pub fn start(&mut self, now_ms: u64) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.level = 1;
        self.multi_cast_level = 1;
        self.auto_cast_level = 0;
        self.time_ticks = 0;
        self.last_spawn_ms = now_ms;
        self.last_auto_cast_ms = now_ms;
        self.player = Player::new(self.center());
        self.spellbook.reset();
        self.incantations.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.chain_effects.clear();
        self.upgrade_offers.clear();
        self.screen_shake = 0.0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Change the arena size, keeping the player centered
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena_width = width;
        self.arena_height = height;
        self.player.pos = self.center();
    }

    /// Award a kill
    pub fn add_kill_score(&mut self) {
        self.score += SCORE_PER_KILL;
    }

    /// Set screen shake to a fresh pulse
    pub fn kick_screen_shake(&mut self) {
        self.screen_shake = SCREEN_SHAKE_KICK;
    }

    /// Per-tick multiplicative decay, snapping to zero below the floor
    pub fn decay_screen_shake(&mut self) {
        self.screen_shake *= SCREEN_SHAKE_DECAY;
        if self.screen_shake < SCREEN_SHAKE_FLOOR {
            self.screen_shake = 0.0;
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn an enemy of the given type at a position (stats at current level)
    pub fn spawn_enemy_at(&mut self, kind: EnemyType, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        let health = super::spawner::base_health(self.level) * kind.health_multiplier();
        self.enemies.push(Enemy {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            color: kind.color(),
            health,
            max_health: health,
            speed,
            kind,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_not_started() {
        let state = GameState::new(1, 800.0, 600.0);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.health, PLAYER_START_HEALTH);
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.start(0);
        state.score = 120;
        state.level = 3;
        state.multi_cast_level = 4;
        state.auto_cast_level = 2;
        state.player.health = 5;
        state.spellbook.get_mut(SpellKind::Fire).last_cast_ms = Some(100);
        state.spawn_enemy_at(EnemyType::Tank, Vec2::ZERO, 1.0);

        state.start(5000);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.multi_cast_level, 1);
        assert_eq!(state.auto_cast_level, 0);
        assert_eq!(state.player.health, 100);
        assert!(state.enemies.is_empty());
        assert_eq!(state.spellbook.get(SpellKind::Fire).last_cast_ms, None);
        assert_eq!(state.last_spawn_ms, 5000);
    }

    #[test]
    fn test_shield_counts_down() {
        let mut player = Player::new(Vec2::ZERO);
        player.activate_shield();
        for _ in 0..SHIELD_DURATION_TICKS - 1 {
            player.tick_shield();
        }
        assert!(player.shield_active);
        player.tick_shield();
        assert!(!player.shield_active);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut player = Player::new(Vec2::ZERO);
        player.health = 90;
        player.heal(30);
        assert_eq!(player.health, 100);
    }

    #[test]
    fn test_screen_shake_decay() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.kick_screen_shake();
        state.decay_screen_shake();
        assert!((state.screen_shake - 14.4).abs() < 1e-4);
        state.screen_shake = 0.105;
        state.decay_screen_shake();
        assert_eq!(state.screen_shake, 0.0);
    }

    #[test]
    fn test_resize_recenters_player() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.resize(1000.0, 1000.0);
        assert_eq!(state.player.pos, Vec2::new(500.0, 500.0));
    }
}
