//! Grid Snake - a deterministic grid snake simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, effects, progression)
//! - `game`: Phase state machine and frame scheduler that owns the simulation state
//! - `persistence`: Key/value storage collaborator
//! - `highscores` / `settings`: Records and preferences persisted through storage
//! - `audio`: Maps simulation cues to named sounds

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use game::{Game, GameError, GameSummary};
pub use highscores::Leaderboard;
pub use settings::{Settings, Skin};

/// Game configuration constants
pub mod consts {
    /// Playfield in pixels and cell size (the grid is derived from these)
    pub const CANVAS_WIDTH: i32 = 800;
    pub const CANVAS_HEIGHT: i32 = 600;
    pub const CELL_SIZE: i32 = 20;

    /// Tick interval reduction per completed level (ms)
    pub const SPEED_INCREMENT_PER_LEVEL: u64 = 5;
    /// Fastest interval reachable through level progression (ms)
    pub const MIN_LEVEL_TICK_INTERVAL: u64 = 30;

    /// Scoring
    pub const POINTS_FOOD: u64 = 10;
    pub const POINTS_GOLDEN_FOOD: u64 = 50;
    pub const POINTS_POWERUP: u64 = 25;
    pub const POINTS_LEVEL_COMPLETE: u64 = 200;
    pub const POINTS_CHALLENGE_COMPLETE: u64 = 500;

    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    /// Food
    pub const GOLDEN_FOOD_PROBABILITY: f64 = 0.1;
    pub const GOLDEN_FOOD_DURATION: u64 = 5000; // ms

    /// Power-ups
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.15;
    pub const POWERUP_DURATION: u64 = 7000; // speed / slow
    pub const SPEED_BOOST_MULTIPLIER: f64 = 0.5;
    pub const SLOW_MOTION_MULTIPLIER: f64 = 2.0;
    pub const INVINCIBILITY_DURATION: u64 = 5000;
    pub const SCORE_MULTIPLIER_DURATION: u64 = 10000;
    pub const SCORE_MULTIPLIER_VALUE: u32 = 2;
    /// Shrink only applies to snakes longer than this
    pub const SHRINK_MIN_LENGTH: usize = 5;
    pub const SHRINK_AMOUNT: usize = 3;

    /// Levels
    pub const FOOD_PER_LEVEL: u32 = 15;
    pub const MAX_LEVEL: u32 = 10;
    pub const LEVEL_NOTIFICATION_DURATION: u64 = 2000;
    /// Portals appear from this level on (in modes that have them)
    pub const PORTAL_MIN_LEVEL: u32 = 3;

    /// Obstacles
    pub const OBSTACLES_PER_LEVEL: usize = 3;
    pub const MAX_LEVEL_OBSTACLES: usize = 20;

    /// Survival ramp
    pub const SURVIVAL_SPEEDUP_EVERY: u32 = 5;
    pub const SURVIVAL_SPEEDUP_MS: u64 = 3;
    pub const SURVIVAL_MIN_TICK_INTERVAL: u64 = 20;
    pub const SURVIVAL_OBSTACLE_EVERY: u32 = 10;
    pub const SURVIVAL_MAX_OBSTACLES: usize = 30;

    /// Spawning
    pub const SPAWN_MAX_ATTEMPTS: u32 = 100;

    /// Input
    pub const DIRECTION_QUEUE_CAPACITY: usize = 3;

    /// Countdown before play starts / resumes
    pub const COUNTDOWN_START: u32 = 3;
    pub const COUNTDOWN_STEP_MS: u64 = 1000;

    /// Leaderboard
    pub const MAX_LEADERBOARD_ENTRIES: usize = 10;
}
