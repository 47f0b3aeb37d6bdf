//! Grid Snake headless runner
//!
//! Plays one seeded game with a food-seeking autopilot, logs the cue stream
//! and records the result in file storage.
//!
//! Usage: `grid-snake [seed] [mode] [difficulty] [challenge]`

use grid_snake::audio::SoundBoard;
use grid_snake::highscores::{self, Leaderboard};
use grid_snake::persistence::FileStorage;
use grid_snake::sim::{
    Challenge, Difficulty, Direction, GameConfig, GamePhase, GameState, Mode, Position,
    challenge_progress, game_over_message,
};
use grid_snake::{Game, Settings};

/// Simulated frame length (ms)
const FRAME_MS: u64 = 16;
/// Give up after this much simulated time (ms)
const MAX_RUN_MS: u64 = 30 * 60 * 1000;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let mode = args.get(1).and_then(|s| Mode::from_name(s)).unwrap_or_default();
    let difficulty = args
        .get(2)
        .and_then(|s| Difficulty::from_name(s))
        .unwrap_or_default();
    let mut config = GameConfig::new(mode, difficulty);
    if let Some(challenge) = args.get(3).and_then(|s| Challenge::from_name(s)) {
        config = config.with_challenge(challenge);
    }

    let mut storage = FileStorage::new(std::env::temp_dir().join("grid-snake"));
    let settings = Settings::load(&storage);
    let sound_board = SoundBoard::new(&settings);
    let high_score = highscores::load_high_score(&storage);

    log::info!("Grid Snake (headless) starting with seed: {}", seed);

    let mut game = Game::new(seed);
    if let Err(e) = game.start_game(config, 0) {
        log::error!("Cannot start game: {}", e);
        std::process::exit(2);
    }

    let mut now = 0;
    let mut steered_at = None;
    while now < MAX_RUN_MS {
        now += FRAME_MS;
        game.frame(now);

        for event in game.drain_events() {
            for playback in sound_board.play(event) {
                log::debug!("{:?} -> {:?}", event, playback);
            }
        }

        match game.phase() {
            GamePhase::GameOver | GamePhase::Menu => break,
            GamePhase::LevelComplete => game.request_continue_level(now),
            GamePhase::Playing => {
                if let Some(state) = game.snapshot() {
                    // One decision per simulation step
                    if steered_at != Some(state.tick_count) {
                        steered_at = Some(state.tick_count);
                        if let Some(dir) = autopilot(state) {
                            game.submit_direction(dir);
                        }
                    }
                }
            }
            GamePhase::Countdown | GamePhase::Paused => {}
        }
    }

    if let Some(state) = game.snapshot() {
        if let Some(progress) = challenge_progress(state, now) {
            log::info!("{} ({:.0}%)", progress.label, progress.percent);
        }
        println!("{}", game_over_message(state, high_score, now));
        println!(
            "Score {} | level {} | length {} | {} ticks",
            state.score,
            state.level,
            state.snake_len(),
            state.tick_count
        );
    }

    let Some(summary) = game.take_summary() else {
        log::warn!("Run stopped before the game ended, nothing recorded");
        return;
    };
    match highscores::record_game(&mut storage, &summary) {
        Ok(recorded) => {
            if let Some(rank) = recorded.rank {
                println!("Leaderboard rank #{}", rank);
            }
            if recorded.new_high_score {
                println!("New high score!");
            }
        }
        Err(e) => log::warn!("Could not save result: {}", e),
    }
    let board = Leaderboard::load(&storage);
    log::info!(
        "Leaderboard top score: {:?} ({})",
        board.top_score(),
        storage.dir().display()
    );
}

/// Pick the safe direction that gets closest to food
fn autopilot(state: &GameState) -> Option<Direction> {
    let head = state.entities.head();
    let target = state
        .entities
        .golden_food
        .map(|g| g.pos)
        .or(state.entities.food)
        .unwrap_or(head);

    Direction::ALL
        .into_iter()
        .filter(|d| !d.is_reverse_of(state.direction))
        .filter_map(|d| {
            let next = landing(state, head + d.delta())?;
            let dist = (target - next).abs().element_sum();
            Some((dist, d != state.direction, d))
        })
        .min_by_key(|&(dist, turning, _)| (dist, turning))
        .map(|(_, _, d)| d)
        .filter(|d| *d != state.direction)
}

/// Where the head would end up, or None if the move is fatal
fn landing(state: &GameState, next: Position) -> Option<Position> {
    let grid = state.config.grid;
    let rules = state.rules();
    let next = if grid.in_bounds(next) {
        next
    } else if !rules.walls_death || state.is_invincible {
        grid.wrap(next)
    } else {
        return None;
    };
    let next = state.entities.portal_exit(next).unwrap_or(next);
    if state.is_invincible {
        return Some(next);
    }
    if state.entities.snake_contains(next) || (rules.has_obstacles && state.entities.is_obstacle(next)) {
        return None;
    }
    Some(next)
}
