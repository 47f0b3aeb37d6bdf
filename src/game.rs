//! Game phase controller
//!
//! `Game` owns the seeded RNG and the current `GameState`, runs the
//! menu/countdown/playing/paused/level-complete/game-over state machine and
//! decides when a simulation step is due. Hosts call `frame(now)` once per
//! display refresh and read back `snapshot()` and `drain_events()`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::progression;
use crate::sim::state::Countdown;
use crate::sim::{
    Challenge, ConfigError, Difficulty, Direction, GameConfig, GameEvent, GameOverReason, GamePhase,
    GameState, Mode, TickInput, queue_direction, tick,
};

/// Errors surfaced when starting a game
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Record of a finished game, handed to persistence once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    pub level: u32,
    pub length: usize,
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// When the game ended (ms, host clock)
    pub timestamp_ms: u64,
    pub challenge: Option<Challenge>,
    pub challenge_succeeded: Option<bool>,
    pub reason: GameOverReason,
}

impl GameSummary {
    fn from_state(state: &GameState, reason: GameOverReason, now: u64) -> Self {
        Self {
            score: state.score,
            level: state.level,
            length: state.snake_len(),
            mode: state.config.mode,
            difficulty: state.config.difficulty,
            timestamp_ms: now,
            challenge: state.config.challenge,
            challenge_succeeded: state.challenge_succeeded,
            reason,
        }
    }
}

/// Game instance holding the session state
pub struct Game {
    rng: Pcg32,
    seed: u64,
    state: Option<GameState>,
    /// Time of the last simulation step (ms)
    last_tick: u64,
    summary: Option<GameSummary>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            state: None,
            last_tick: 0,
            summary: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current phase (`Menu` when no game was ever started)
    pub fn phase(&self) -> GamePhase {
        self.state.as_ref().map_or(GamePhase::Menu, |s| s.phase)
    }

    /// Validate the configuration and enter the countdown of a fresh game
    pub fn start_game(&mut self, config: GameConfig, now: u64) -> Result<(), GameError> {
        config.validate()?;

        let mut state = GameState::new(config, now, &mut self.rng);
        state.countdown = Some(countdown_from(now));
        self.state = Some(state);
        self.last_tick = now;
        self.summary = None;

        log::info!(
            "Game started: {} / {}{}",
            config.mode.as_str(),
            config.difficulty.as_str(),
            config
                .challenge
                .map(|c| format!(" / {}", c.as_str()))
                .unwrap_or_default()
        );
        Ok(())
    }

    /// Advance timers and run at most one simulation step
    pub fn frame(&mut self, now: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if state.level_notification.is_some_and(|n| !n.is_visible(now)) {
            state.level_notification = None;
        }

        match state.phase {
            GamePhase::Countdown => {
                if let Some(cd) = state.countdown.as_mut() {
                    while now >= cd.next_step_at && cd.remaining > 0 {
                        cd.remaining -= 1;
                        cd.next_step_at += COUNTDOWN_STEP_MS;
                    }
                    if cd.remaining == 0 {
                        state.countdown = None;
                        state.phase = GamePhase::Playing;
                        self.last_tick = now;
                        log::debug!("Countdown finished at {}ms", now);
                    }
                }
            }
            GamePhase::Playing => {
                if (now.saturating_sub(self.last_tick) as f64) < state.effective_interval_ms() {
                    return;
                }
                tick(state, &TickInput::default(), now, &mut self.rng);
                self.last_tick = now;

                if let Some(reason) = state.game_over {
                    self.summary = Some(GameSummary::from_state(state, reason, now));
                }
            }
            GamePhase::Menu | GamePhase::Paused | GamePhase::LevelComplete | GamePhase::GameOver => {}
        }
    }

    /// Queue a direction; dropped unless playing
    pub fn submit_direction(&mut self, dir: Direction) -> bool {
        self.state
            .as_mut()
            .is_some_and(|state| queue_direction(state, dir))
    }

    /// Pause while playing; resume (through a countdown) while paused
    pub fn request_pause(&mut self, now: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Pause);
                log::info!("Paused at level {}", state.level);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Countdown;
                state.countdown = Some(countdown_from(now));
                state.events.push(GameEvent::Resume);
                log::info!("Resuming");
            }
            _ => {}
        }
    }

    /// Abandon the current game and return to the menu
    pub fn request_quit(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.phase = GamePhase::Menu;
        state.countdown = None;
        state.input_queue.clear();
        log::info!("Returned to menu");
    }

    /// Start the next level after a non-automatic level completion
    pub fn request_continue_level(&mut self, now: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.phase != GamePhase::LevelComplete {
            return;
        }
        progression::advance_level(state, &mut self.rng);
        state.phase = GamePhase::Countdown;
        state.countdown = Some(countdown_from(now));
        state.events.push(GameEvent::LevelStart);
        log::info!("Starting level {}", state.level);
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Cues raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state
            .as_mut()
            .map(GameState::drain_events)
            .unwrap_or_default()
    }

    /// Summary of the last finished game; returned at most once
    pub fn take_summary(&mut self) -> Option<GameSummary> {
        self.summary.take()
    }
}

fn countdown_from(now: u64) -> Countdown {
    Countdown {
        remaining: COUNTDOWN_START,
        next_step_at: now + COUNTDOWN_STEP_MS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EffectKind, Entities, Grid, Position};

    fn started(config: GameConfig) -> Game {
        let mut game = Game::new(2024);
        game.start_game(config, 0).expect("valid config");
        game
    }

    /// Run the countdown out so the game is playing at `COUNTDOWN_START` seconds
    fn play(game: &mut Game) -> u64 {
        let now = COUNTDOWN_START as u64 * COUNTDOWN_STEP_MS;
        game.frame(now);
        assert_eq!(game.phase(), GamePhase::Playing);
        now
    }

    #[test]
    fn test_menu_before_start() {
        let mut game = Game::new(1);
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.snapshot().is_none());
        assert!(!game.submit_direction(Direction::Up));
        game.frame(1000);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_countdown_steps_once_per_second() {
        let mut game = started(GameConfig::default());
        assert_eq!(game.phase(), GamePhase::Countdown);
        game.frame(999);
        assert_eq!(game.snapshot().and_then(|s| s.countdown).map(|c| c.remaining), Some(3));
        game.frame(1000);
        assert_eq!(game.snapshot().and_then(|s| s.countdown).map(|c| c.remaining), Some(2));
        game.frame(2999);
        assert_eq!(game.phase(), GamePhase::Countdown);
        game.frame(3000);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.snapshot().is_some_and(|s| s.countdown.is_none()));
    }

    #[test]
    fn test_countdown_freezes_snapshot() {
        let mut game = started(GameConfig::default());
        let before = game.snapshot().cloned();
        game.frame(500);
        assert_eq!(game.snapshot().map(|s| s.entities.clone()), before.map(|s| s.entities));
    }

    #[test]
    fn test_step_waits_for_interval() {
        let mut game = started(GameConfig::new(Mode::Zen, Difficulty::Medium));
        let t = play(&mut game);
        game.frame(t + 99);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(0));
        game.frame(t + 100);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(1));
        // At most one step per frame, however late
        game.frame(t + 1000);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(2));
    }

    #[test]
    fn test_slow_effect_stretches_interval() {
        let mut game = started(GameConfig::new(Mode::Zen, Difficulty::Medium));
        let t = play(&mut game);
        game.state
            .as_mut()
            .expect("state")
            .effects
            .add(EffectKind::Slow, POWERUP_DURATION, t);

        game.frame(t + 100);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(0));
        game.frame(t + 200);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(1));
    }

    #[test]
    fn test_speed_effect_shortens_interval() {
        let mut game = started(GameConfig::new(Mode::Zen, Difficulty::Medium));
        let t = play(&mut game);
        game.state
            .as_mut()
            .expect("state")
            .effects
            .add(EffectKind::Speed, POWERUP_DURATION, t);

        game.frame(t + 49);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(0));
        game.frame(t + 50);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(1));
        game.frame(t + 100);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(2));
    }

    #[test]
    fn test_rejects_perfectionist_in_survival() {
        let mut game = Game::new(5);
        let config = GameConfig::new(Mode::Survival, Difficulty::Easy).with_challenge(Challenge::Perfectionist);
        let err = game.start_game(config, 0).unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(ConfigError::IncompatibleChallenge { .. })
        ));
        assert!(game.snapshot().is_none());
        assert_eq!(game.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_pause_resume_goes_through_countdown() {
        let mut game = started(GameConfig::new(Mode::Zen, Difficulty::Medium));
        let t = play(&mut game);
        game.request_pause(t + 10);
        assert_eq!(game.phase(), GamePhase::Paused);
        game.frame(t + 5000);
        assert_eq!(game.snapshot().map(|s| s.tick_count), Some(0));

        game.request_pause(t + 6000);
        assert_eq!(game.phase(), GamePhase::Countdown);
        assert_eq!(game.drain_events(), vec![GameEvent::Pause, GameEvent::Resume]);
        game.frame(t + 9000);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_quit_cancels_countdown() {
        let mut game = started(GameConfig::default());
        game.request_quit();
        assert_eq!(game.phase(), GamePhase::Menu);
        game.frame(10_000);
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(game.snapshot().is_some_and(|s| s.countdown.is_none()));
    }

    #[test]
    fn test_continue_level_advances_and_counts_down() {
        let mut game = started(GameConfig::new(Mode::Classic, Difficulty::Medium));
        let t = play(&mut game);
        {
            let state = game.state.as_mut().expect("state");
            state.entities = Entities::with_snake(Position::new(5, 5), 3);
            state.entities.food = Some(Position::new(6, 5));
            state.food_eaten_this_level = FOOD_PER_LEVEL - 1;
        }
        game.frame(t + 100);
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        game.request_continue_level(t + 200);
        assert_eq!(game.phase(), GamePhase::Countdown);
        let state = game.snapshot().expect("state");
        assert_eq!(state.level, 2);
        assert_eq!(state.tick_interval_ms, 95);
        assert_eq!(state.entities.obstacles.len(), 6);
        assert!(game.drain_events().contains(&GameEvent::LevelStart));
    }

    #[test]
    fn test_summary_delivered_once() {
        let config = GameConfig::new(Mode::Classic, Difficulty::Medium).with_grid(Grid::new(10, 10));
        let mut game = started(config);
        let t = play(&mut game);
        {
            let state = game.state.as_mut().expect("state");
            state.entities = Entities::with_snake(Position::new(9, 2), 3);
            state.entities.obstacles.clear();
        }
        game.frame(t + 100);
        assert_eq!(game.phase(), GamePhase::GameOver);

        let summary = game.take_summary().expect("summary");
        assert_eq!(summary.reason, GameOverReason::HitWall);
        assert_eq!(summary.length, 3);
        assert_eq!(summary.timestamp_ms, t + 100);
        assert_eq!(summary.mode, Mode::Classic);
        game.frame(t + 500);
        assert!(game.take_summary().is_none());
    }
}
