//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per call, timing decided by the caller
//! - Seeded RNG only, passed in by the owner
//! - Wall-clock time only as an explicit `now` argument
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod entities;
pub mod events;
pub mod grid;
pub mod movement;
pub mod progression;
pub mod rules;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Verdict, resolve_move};
pub use effects::{ActiveEffects, Effect, EffectKind};
pub use entities::{Entities, GoldenFood, PowerUp, PowerUpKind};
pub use events::GameEvent;
pub use grid::{Grid, Position};
pub use movement::{Direction, DirectionQueue};
pub use progression::{ChallengeProgress, challenge_progress, game_over_message};
pub use rules::{Challenge, ConfigError, Difficulty, GameConfig, Mode, ModeRules};
pub use spawn::Placement;
pub use state::{GameOverReason, GamePhase, GameState, LevelNotification};
pub use tick::{TickInput, queue_direction, tick};
