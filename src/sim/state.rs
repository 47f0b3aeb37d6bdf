//! Game state and core simulation types
//!
//! Everything a renderer or a saved snapshot needs lives here. The state is
//! owned by the `Game` controller and lent to the simulation one tick at a time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::entities::Entities;
use super::events::GameEvent;
use super::movement::{Direction, DirectionQueue};
use super::rules::{GameConfig, ModeRules};
use super::spawn;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running
    #[default]
    Menu,
    /// Frozen snapshot while 3, 2, 1 counts down
    Countdown,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Level cleared, waiting for the player to continue
    LevelComplete,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    HitObstacle,
    /// Challenge time ran out before the target was reached
    ChallengeFailed,
    /// Challenge target reached
    ChallengeComplete,
    /// Final level cleared
    Victory,
}

/// Transient overlay shown after an auto-advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelNotification {
    pub level: u32,
    pub start: u64,
    pub duration: u64,
}

impl LevelNotification {
    pub fn is_visible(&self, now: u64) -> bool {
        now < self.start + self.duration
    }
}

/// Countdown before play starts or resumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Number currently displayed (3, 2, 1)
    pub remaining: u32,
    /// When the next decrement happens (ms)
    pub next_step_at: u64,
}

/// Survival mode tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurvivalStats {
    pub start_time: u64,
    pub food_count: u32,
}

impl SurvivalStats {
    /// Elapsed survival time as `m:ss`
    pub fn format_elapsed(&self, now: u64) -> String {
        let secs = now.saturating_sub(self.start_time) / 1000;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Mode, difficulty, challenge and grid chosen at start
    pub config: GameConfig,
    pub phase: GamePhase,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub food_eaten_this_level: u32,
    pub food_per_level: u32,
    /// Wall and obstacle hits over the whole run
    pub wall_hit_count: u32,
    /// `wall_hit_count` when the current level started
    pub level_start_wall_hit_count: u32,
    pub perfect_level_count: u32,
    pub score_multiplier: u32,
    pub is_invincible: bool,
    pub entities: Entities,
    /// Last committed direction
    pub direction: Direction,
    /// Pending direction commands
    pub input_queue: DirectionQueue,
    /// Base interval between ticks (ms) before speed/slow effects
    pub tick_interval_ms: u64,
    pub effects: ActiveEffects,
    pub challenge_start_time: Option<u64>,
    pub survival: SurvivalStats,
    pub level_notification: Option<LevelNotification>,
    pub countdown: Option<Countdown>,
    pub game_over: Option<GameOverReason>,
    /// Challenge outcome, decided when the run ends
    pub challenge_succeeded: Option<bool>,
    /// Simulation steps taken
    pub tick_count: u64,
    /// Cues raised since the last drain (not part of snapshots)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run: centered snake moving right, food placed, level 1 obstacles
    pub fn new<R: Rng + ?Sized>(config: GameConfig, now: u64, rng: &mut R) -> Self {
        let grid = config.grid;
        let mut state = Self {
            config,
            phase: GamePhase::Countdown,
            score: 0,
            level: 1,
            food_eaten_this_level: 0,
            food_per_level: FOOD_PER_LEVEL,
            wall_hit_count: 0,
            level_start_wall_hit_count: 0,
            perfect_level_count: 0,
            score_multiplier: 1,
            is_invincible: false,
            entities: Entities::with_snake(grid.center(), INITIAL_SNAKE_LENGTH),
            direction: Direction::Right,
            input_queue: DirectionQueue::default(),
            tick_interval_ms: config.difficulty.tick_interval_ms(),
            effects: ActiveEffects::default(),
            challenge_start_time: config.challenge.map(|_| now),
            survival: SurvivalStats {
                start_time: now,
                food_count: 0,
            },
            level_notification: None,
            countdown: None,
            game_over: None,
            challenge_succeeded: None,
            tick_count: 0,
            events: Vec::new(),
        };

        spawn::spawn_food(&mut state.entities, &grid, rng, now);
        spawn::generate_obstacles(&mut state.entities, &grid, &config.rules(), 1, rng);

        state
    }

    pub fn rules(&self) -> ModeRules {
        self.config.rules()
    }

    /// Add food points scaled by the active score multiplier
    pub fn award(&mut self, base: u64) {
        self.score += base * self.score_multiplier as u64;
    }

    /// Add a flat bonus (power-up, level, challenge); never multiplied
    pub fn add_bonus(&mut self, points: u64) {
        self.score += points;
    }

    pub fn snake_len(&self) -> usize {
        self.entities.snake.len()
    }

    /// Tick interval after speed/slow effects (ms)
    pub fn effective_interval_ms(&self) -> f64 {
        self.tick_interval_ms as f64 * self.effects.interval_multiplier()
    }

    /// Take all pending cues
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
