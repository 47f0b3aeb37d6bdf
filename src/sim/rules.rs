//! Typed rule tables
//!
//! Modes, difficulties and challenges are closed enumerations mapped to frozen
//! rule values. Nothing in the simulation mutates these.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::Grid;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Classic,
    Arcade,
    Survival,
    Zen,
}

/// Capability flags for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRules {
    pub has_obstacles: bool,
    pub has_power_ups: bool,
    pub has_portals: bool,
    /// false means edges wrap
    pub walls_death: bool,
    /// No discrete levels
    pub continuous_speed: bool,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Classic, Mode::Arcade, Mode::Survival, Mode::Zen];

    pub fn rules(&self) -> ModeRules {
        match self {
            Mode::Classic => ModeRules {
                has_obstacles: true,
                has_power_ups: true,
                has_portals: false,
                walls_death: true,
                continuous_speed: false,
            },
            Mode::Arcade => ModeRules {
                has_obstacles: true,
                has_power_ups: true,
                has_portals: true,
                walls_death: true,
                continuous_speed: false,
            },
            Mode::Survival => ModeRules {
                has_obstacles: true,
                has_power_ups: false,
                has_portals: false,
                walls_death: true,
                continuous_speed: true,
            },
            Mode::Zen => ModeRules {
                has_obstacles: false,
                has_power_ups: true,
                has_portals: true,
                walls_death: false,
                continuous_speed: false,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::Arcade => "Arcade",
            Mode::Survival => "Survival",
            Mode::Zen => "Zen",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "arcade" => Some(Mode::Arcade),
            "survival" => Some(Mode::Survival),
            "zen" => Some(Mode::Zen),
            _ => None,
        }
    }
}

/// Difficulty selects the base tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Insane,
}

impl Difficulty {
    /// Base milliseconds between ticks (lower = faster)
    pub fn tick_interval_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 100,
            Difficulty::Hard => 60,
            Difficulty::Insane => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "insane" => Some(Difficulty::Insane),
            _ => None,
        }
    }
}

/// Optional challenge layered on top of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Challenge {
    /// Reach the target score within the time limit
    SpeedDemon,
    /// Grow to the target length
    Marathon,
    /// Complete the target number of levels without wall/obstacle hits
    Perfectionist,
}

/// What a challenge measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeKind {
    ScoreRate,
    Length,
    PerfectLevels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeSpec {
    pub target: u64,
    pub time_limit_ms: Option<u64>,
    pub kind: ChallengeKind,
}

impl Challenge {
    pub fn spec(&self) -> ChallengeSpec {
        match self {
            Challenge::SpeedDemon => ChallengeSpec {
                target: 500,
                time_limit_ms: Some(120_000),
                kind: ChallengeKind::ScoreRate,
            },
            Challenge::Marathon => ChallengeSpec {
                target: 50,
                time_limit_ms: None,
                kind: ChallengeKind::Length,
            },
            Challenge::Perfectionist => ChallengeSpec {
                target: 3,
                time_limit_ms: None,
                kind: ChallengeKind::PerfectLevels,
            },
        }
    }

    /// Level transitions happen without the level-complete pause
    pub fn auto_advances(&self) -> bool {
        matches!(self, Challenge::SpeedDemon | Challenge::Marathon)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Challenge::SpeedDemon => "Speed Demon",
            Challenge::Marathon => "Marathon",
            Challenge::Perfectionist => "Perfectionist",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "speeddemon" => Some(Challenge::SpeedDemon),
            "marathon" => Some(Challenge::Marathon),
            "perfectionist" => Some(Challenge::Perfectionist),
            _ => None,
        }
    }
}

/// Rejected game setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{challenge:?} challenge requires levels and cannot be played in {mode:?} mode")]
    IncompatibleChallenge { challenge: Challenge, mode: Mode },
    #[error("grid {width}x{height} is too small for the starting snake")]
    GridTooSmall { width: i32, height: i32 },
}

/// Everything selected before a game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub challenge: Option<Challenge>,
    pub grid: Grid,
}

impl GameConfig {
    pub fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            challenge: None,
            grid: Grid::default(),
        }
    }

    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn rules(&self) -> ModeRules {
        self.mode.rules()
    }

    /// Reject combinations that cannot be played
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.challenge == Some(Challenge::Perfectionist) && self.rules().continuous_speed {
            return Err(ConfigError::IncompatibleChallenge {
                challenge: Challenge::Perfectionist,
                mode: self.mode,
            });
        }
        // The snake is laid out leftwards from the center cell
        let min_width = crate::consts::INITIAL_SNAKE_LENGTH as i32 * 2;
        if self.grid.width < min_width || self.grid.height < 1 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        assert!(Mode::Classic.rules().walls_death);
        assert!(!Mode::Classic.rules().has_portals);
        assert!(Mode::Arcade.rules().has_portals);
        assert!(!Mode::Survival.rules().has_power_ups);
        assert!(Mode::Survival.rules().continuous_speed);
        assert!(!Mode::Zen.rules().walls_death);
        assert!(!Mode::Zen.rules().has_obstacles);
    }

    #[test]
    fn test_difficulty_intervals() {
        assert_eq!(Difficulty::Easy.tick_interval_ms(), 150);
        assert_eq!(Difficulty::Medium.tick_interval_ms(), 100);
        assert_eq!(Difficulty::Hard.tick_interval_ms(), 60);
        assert_eq!(Difficulty::Insane.tick_interval_ms(), 30);
    }

    #[test]
    fn test_perfectionist_rejected_in_survival() {
        let config =
            GameConfig::new(Mode::Survival, Difficulty::Medium).with_challenge(Challenge::Perfectionist);
        assert_eq!(
            config.validate(),
            Err(ConfigError::IncompatibleChallenge {
                challenge: Challenge::Perfectionist,
                mode: Mode::Survival,
            })
        );

        let ok = GameConfig::new(Mode::Survival, Difficulty::Medium).with_challenge(Challenge::Marathon);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(Difficulty::from_name("MED"), Some(Difficulty::Medium));
        assert_eq!(Challenge::from_name("speed-demon"), Some(Challenge::SpeedDemon));
        assert_eq!(Challenge::from_name("Speed Demon"), Some(Challenge::SpeedDemon));
        assert_eq!(Challenge::from_name("nope"), None);
    }
}
