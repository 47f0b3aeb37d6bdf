//! Level and challenge progression
//!
//! Handles level completion and advancement, challenge targets and
//! deadlines, the survival difficulty ramp and the end-of-run bookkeeping.

use rand::Rng;

use super::events::GameEvent;
use super::rules::{Challenge, ChallengeKind};
use super::spawn;
use super::state::{GameOverReason, GamePhase, GameState, LevelNotification};
use crate::consts::*;

/// Survival ramp after each food item
pub fn on_food_eaten<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if !state.rules().continuous_speed {
        return;
    }
    state.survival.food_count += 1;
    let count = state.survival.food_count;

    if count % SURVIVAL_SPEEDUP_EVERY == 0 {
        state.tick_interval_ms = state
            .tick_interval_ms
            .saturating_sub(SURVIVAL_SPEEDUP_MS)
            .max(SURVIVAL_MIN_TICK_INTERVAL);
        log::debug!("Survival speed-up: interval now {}ms", state.tick_interval_ms);
    }

    if count % SURVIVAL_OBSTACLE_EVERY == 0 {
        let grid = state.config.grid;
        spawn::add_survival_obstacle(&mut state.entities, &grid, rng);
    }
}

/// Complete the level once enough food has been eaten (not in Survival)
pub fn check_level_complete<R: Rng + ?Sized>(state: &mut GameState, now: u64, rng: &mut R) {
    if state.rules().continuous_speed || state.food_eaten_this_level < state.food_per_level {
        return;
    }
    complete_level(state, now, rng);
}

fn complete_level<R: Rng + ?Sized>(state: &mut GameState, now: u64, rng: &mut R) {
    state.add_bonus(POINTS_LEVEL_COMPLETE);
    state.events.push(GameEvent::LevelComplete);

    let wall_hits_this_level = state.wall_hit_count - state.level_start_wall_hit_count;
    if wall_hits_this_level == 0 {
        state.perfect_level_count += 1;
        log::info!(
            "Perfect level {}! Total perfect levels: {}",
            state.level,
            state.perfect_level_count
        );
    }

    if state.level >= MAX_LEVEL {
        state.add_bonus(POINTS_CHALLENGE_COMPLETE);
        state.events.push(GameEvent::Victory);
        end_game(state, GameOverReason::Victory);
        return;
    }

    if state.config.challenge.is_some_and(|c| c.auto_advances()) {
        advance_level(state, rng);
        state.level_notification = Some(LevelNotification {
            level: state.level,
            start: now,
            duration: LEVEL_NOTIFICATION_DURATION,
        });
        log::info!("Auto-advanced to level {}", state.level);
    } else {
        state.phase = GamePhase::LevelComplete;
        state.input_queue.clear();
        log::info!("Level {} complete, waiting to continue", state.level);
    }
}

/// Move to the next level: reset level counters and regenerate the board
pub fn advance_level<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let grid = state.config.grid;
    let rules = state.rules();

    state.level += 1;
    state.food_eaten_this_level = 0;
    state.level_start_wall_hit_count = state.wall_hit_count;
    state.entities.clear_level_items();
    state.tick_interval_ms = state
        .tick_interval_ms
        .saturating_sub(SPEED_INCREMENT_PER_LEVEL)
        .max(MIN_LEVEL_TICK_INTERVAL);

    spawn::generate_obstacles(&mut state.entities, &grid, &rules, state.level, rng);
    spawn::generate_portals(&mut state.entities, &grid, &rules, state.level, rng);
}

/// Challenge targets and deadlines, checked every tick
pub fn update_challenge(state: &mut GameState, now: u64) {
    let Some(challenge) = state.config.challenge else {
        return;
    };
    let spec = challenge.spec();

    match spec.kind {
        ChallengeKind::ScoreRate => {
            let elapsed = now.saturating_sub(state.challenge_start_time.unwrap_or(now));
            let limit = spec.time_limit_ms.unwrap_or(u64::MAX);
            if elapsed >= limit && state.score < spec.target {
                end_game(state, GameOverReason::ChallengeFailed);
            }
        }
        ChallengeKind::Length => {
            if state.snake_len() as u64 >= spec.target {
                state.add_bonus(POINTS_CHALLENGE_COMPLETE);
                end_game(state, GameOverReason::ChallengeComplete);
            }
        }
        ChallengeKind::PerfectLevels => {
            if !state.rules().continuous_speed && state.perfect_level_count as u64 >= spec.target {
                state.add_bonus(POINTS_CHALLENGE_COMPLETE);
                end_game(state, GameOverReason::ChallengeComplete);
            }
        }
    }
}

/// Whether the selected challenge's goal was met
pub fn challenge_met(state: &GameState, challenge: Challenge) -> bool {
    let spec = challenge.spec();
    let value = match spec.kind {
        ChallengeKind::ScoreRate => state.score,
        ChallengeKind::Length => state.snake_len() as u64,
        ChallengeKind::PerfectLevels => state.perfect_level_count as u64,
    };
    value >= spec.target
}

/// End the run and raise the matching cues
pub fn end_game(state: &mut GameState, reason: GameOverReason) {
    state.phase = GamePhase::GameOver;
    state.game_over = Some(reason);
    state.countdown = None;
    state.input_queue.clear();

    match reason {
        GameOverReason::HitWall | GameOverReason::HitObstacle => state.events.push(GameEvent::HitWall),
        GameOverReason::HitSelf => state.events.push(GameEvent::HitSelf),
        _ => {}
    }

    if let Some(challenge) = state.config.challenge {
        let success = challenge_met(state, challenge);
        state.challenge_succeeded = Some(success);
        state.events.push(if success {
            GameEvent::ChallengeComplete
        } else {
            GameEvent::ChallengeFailed
        });
    }
    state.events.push(GameEvent::GameOver);

    log::info!(
        "Game over ({:?}): score {}, level {}, length {}",
        reason,
        state.score,
        state.level,
        state.snake_len()
    );
}

/// HUD readout for the active challenge
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeProgress {
    pub label: String,
    /// 0-100
    pub percent: f64,
}

pub fn challenge_progress(state: &GameState, now: u64) -> Option<ChallengeProgress> {
    let challenge = state.config.challenge?;
    let spec = challenge.spec();
    let target = spec.target.max(1) as f64;

    let (value, label) = match spec.kind {
        ChallengeKind::ScoreRate => {
            let elapsed = now.saturating_sub(state.challenge_start_time.unwrap_or(now));
            let left = spec.time_limit_ms.unwrap_or(0).saturating_sub(elapsed);
            (
                state.score as f64,
                format!(
                    "{}: {}/{} points - {}s left",
                    challenge.as_str(),
                    state.score,
                    spec.target,
                    left.div_ceil(1000)
                ),
            )
        }
        ChallengeKind::Length => (
            state.snake_len() as f64,
            format!("{}: {}/{} segments", challenge.as_str(), state.snake_len(), spec.target),
        ),
        ChallengeKind::PerfectLevels => {
            if state.rules().continuous_speed {
                return None;
            }
            (
                state.perfect_level_count as f64,
                format!(
                    "{}: {}/{} perfect levels",
                    challenge.as_str(),
                    state.perfect_level_count,
                    spec.target
                ),
            )
        }
    };

    Some(ChallengeProgress {
        label,
        percent: (value / target * 100.0).min(100.0),
    })
}

/// Closing line for the game-over screen
pub fn game_over_message(state: &GameState, high_score: u64, now: u64) -> String {
    if state.rules().continuous_speed {
        return format!(
            "You survived for {} and ate {} food items!",
            state.survival.format_elapsed(now),
            state.survival.food_count
        );
    }
    if state.score > high_score {
        "NEW HIGH SCORE! Amazing performance!".to_string()
    } else if state.score as f64 > high_score as f64 * 0.8 {
        "Great job! Almost beat your high score!".to_string()
    } else if state.level >= 5 {
        "Impressive! You made it far!".to_string()
    } else if state.snake_len() >= 20 {
        "That's a long snake! Well done!".to_string()
    } else {
        "Keep practicing! You'll get better!".to_string()
    }
}
