//! Fixed-interval simulation step
//!
//! One call advances the snake by exactly one cell and applies everything that
//! follows from it. Timing (when a step is due) belongs to the controller.

use rand::Rng;

use super::collision::{self, Verdict};
use super::effects;
use super::movement::{self, Direction};
use super::progression;
use super::state::{GamePhase, GameState};

/// Input commands for a single step (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Direction pressed since the last step
    pub turn: Option<Direction>,
}

/// Queue a direction command.
///
/// Dropped (returns false) outside of play or when the queue is full.
/// Reversals are discarded when dequeued, against the direction committed at
/// that point, so a quick two-key U-turn keeps both keys.
pub fn queue_direction(state: &mut GameState, dir: Direction) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.input_queue.push(dir)
}

/// Advance the game state by one step
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, now: u64, rng: &mut R) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if let Some(dir) = input.turn {
        queue_direction(state, dir);
    }

    effects::tick_effects(state, now);

    state.direction = movement::next_direction(state.direction, &mut state.input_queue);
    let new_head = movement::advance(state.entities.head(), state.direction);

    match collision::resolve_move(state, new_head, now, rng) {
        Verdict::Terminal(reason) => {
            progression::end_game(state, reason);
        }
        Verdict::Continue { .. } => {
            collision::expire_golden_food(state, now);
            progression::check_level_complete(state, now, rng);
            if state.phase == GamePhase::Playing {
                progression::update_challenge(state, now);
            }
        }
    }

    state.tick_count += 1;
}
