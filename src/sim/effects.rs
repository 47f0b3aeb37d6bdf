//! Timed power-up effects
//!
//! Every timed buff is an entry in one table checked against `now` each
//! tick. The invincible and score-multiplier flags are derived from the table,
//! so they revert exactly when the last entry of their kind runs out.

use serde::{Deserialize, Serialize};

use super::entities::PowerUpKind;
use super::events::GameEvent;
use super::state::GameState;
use crate::consts::*;

/// Kinds of timed effect (shrink is instant and has none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Speed,
    Slow,
    Invincible,
    Multiplier,
}

impl EffectKind {
    pub fn duration_ms(&self) -> u64 {
        match self {
            EffectKind::Speed | EffectKind::Slow => POWERUP_DURATION,
            EffectKind::Invincible => INVINCIBILITY_DURATION,
            EffectKind::Multiplier => SCORE_MULTIPLIER_DURATION,
        }
    }
}

impl PowerUpKind {
    /// The timed effect granted by this power-up, if any
    pub fn effect(&self) -> Option<EffectKind> {
        match self {
            PowerUpKind::Speed => Some(EffectKind::Speed),
            PowerUpKind::Slow => Some(EffectKind::Slow),
            PowerUpKind::Invincible => Some(EffectKind::Invincible),
            PowerUpKind::Multiplier => Some(EffectKind::Multiplier),
            PowerUpKind::Shrink => None,
        }
    }
}

/// An active timed modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub start: u64,
    pub end: u64,
}

impl Effect {
    /// Whole seconds left, rounded up (for HUD badges)
    pub fn seconds_left(&self, now: u64) -> u64 {
        self.end.saturating_sub(now).div_ceil(1000)
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    entries: Vec<Effect>,
}

impl ActiveEffects {
    /// Append an effect. Entries of the same kind stack side by side.
    pub fn add(&mut self, kind: EffectKind, duration: u64, now: u64) {
        self.entries.push(Effect {
            kind,
            start: now,
            end: now + duration,
        });
    }

    /// Drop every effect whose end time has been reached
    pub fn expire(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.end > now);
        before - self.entries.len()
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    pub fn entries(&self) -> &[Effect] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Factor applied to the tick interval by speed/slow effects
    pub fn interval_multiplier(&self) -> f64 {
        let mut factor = 1.0;
        if self.is_active(EffectKind::Slow) {
            factor *= SLOW_MOTION_MULTIPLIER;
        }
        if self.is_active(EffectKind::Speed) {
            factor *= SPEED_BOOST_MULTIPLIER;
        }
        factor
    }
}

/// Re-derive the invincible / multiplier flags from the effect table
pub fn sync_flags(state: &mut GameState) {
    state.is_invincible = state.effects.is_active(EffectKind::Invincible);
    state.score_multiplier = if state.effects.is_active(EffectKind::Multiplier) {
        SCORE_MULTIPLIER_VALUE
    } else {
        1
    };
}

/// Expire finished effects and revert their flags
pub fn tick_effects(state: &mut GameState, now: u64) {
    let expired = state.effects.expire(now);
    if expired > 0 {
        log::debug!("{} effect(s) expired at {}ms", expired, now);
    }
    sync_flags(state);
}

/// Apply a collected power-up
pub fn collect_power_up(state: &mut GameState, kind: PowerUpKind, now: u64) {
    state.add_bonus(POINTS_POWERUP);
    state.events.push(GameEvent::PowerUpCollect(kind));

    match kind.effect() {
        Some(effect) => {
            state.effects.add(effect, effect.duration_ms(), now);
            sync_flags(state);
        }
        None => {
            let len = state.entities.snake.len();
            if len > SHRINK_MIN_LENGTH {
                state.entities.snake.truncate(len - SHRINK_AMOUNT);
            }
        }
    }
    log::debug!("Collected {} (snake length {})", kind.name(), state.entities.snake.len());
}
