//! Discrete cues emitted while rules fire
//!
//! Consumers (audio, HUD flashes) drain these after each frame. The
//! simulation never waits on them.

use serde::{Deserialize, Serialize};

use super::entities::PowerUpKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EatFood,
    EatGolden,
    HitWall,
    HitSelf,
    Portal,
    PowerUpCollect(PowerUpKind),
    LevelComplete,
    LevelStart,
    ChallengeComplete,
    ChallengeFailed,
    Victory,
    Pause,
    Resume,
    GameOver,
}

impl GameEvent {
    /// Stable cue name for collaborators keyed by string
    pub fn cue_name(&self) -> &'static str {
        match self {
            GameEvent::EatFood => "eatFood",
            GameEvent::EatGolden => "eatGolden",
            GameEvent::HitWall => "hitWall",
            GameEvent::HitSelf => "hitSelf",
            GameEvent::Portal => "portal",
            GameEvent::PowerUpCollect(kind) => match kind {
                PowerUpKind::Speed => "powerupSpeed",
                PowerUpKind::Slow => "powerupSlow",
                PowerUpKind::Invincible => "powerupInvincible",
                PowerUpKind::Multiplier => "powerupMultiplier",
                PowerUpKind::Shrink => "powerupShrink",
            },
            GameEvent::LevelComplete => "levelComplete",
            GameEvent::LevelStart => "levelStart",
            GameEvent::ChallengeComplete => "challengeComplete",
            GameEvent::ChallengeFailed => "challengeFailed",
            GameEvent::Victory => "victory",
            GameEvent::Pause => "pause",
            GameEvent::Resume => "resume",
            GameEvent::GameOver => "gameOver",
        }
    }
}
