//! Collision resolution for one head move
//!
//! Checks run in a fixed order and the first terminal match wins. Teleports
//! and item pickups are not terminal and may combine within one tick:
//!
//! 1. walls (kill, or wrap while invincible)
//! 2. wrap-around in modes without deadly walls
//! 3. portal teleport
//! 4. self collision
//! 5. obstacle collision
//! 6. commit the new head
//! 7. food / golden food (grow) or pop the tail
//! 8. power-up pickup

use rand::Rng;

use super::effects;
use super::events::GameEvent;
use super::grid::Position;
use super::progression;
use super::spawn;
use super::state::{GameOverReason, GameState};
use crate::consts::*;

/// Result of resolving a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Head committed; `grew` is true when food was eaten
    Continue { grew: bool },
    /// The move ends the run; nothing was committed
    Terminal(GameOverReason),
}

/// Resolve `new_head` (head + direction, unwrapped) against the board
pub fn resolve_move<R: Rng + ?Sized>(
    state: &mut GameState,
    mut new_head: Position,
    now: u64,
    rng: &mut R,
) -> Verdict {
    let grid = state.config.grid;
    let rules = state.rules();

    if rules.walls_death {
        if !grid.in_bounds(new_head) {
            if state.is_invincible {
                new_head = grid.wrap(new_head);
            } else {
                state.wall_hit_count += 1;
                return Verdict::Terminal(GameOverReason::HitWall);
            }
        }
    } else {
        new_head = grid.wrap(new_head);
    }

    if let Some(exit) = state.entities.portal_exit(new_head) {
        log::debug!("Portal {:?} -> {:?}", new_head, exit);
        new_head = exit;
        state.events.push(GameEvent::Portal);
    }

    if !state.is_invincible && state.entities.snake_contains(new_head) {
        return Verdict::Terminal(GameOverReason::HitSelf);
    }

    if !state.is_invincible && rules.has_obstacles && state.entities.is_obstacle(new_head) {
        state.wall_hit_count += 1;
        return Verdict::Terminal(GameOverReason::HitObstacle);
    }

    state.entities.snake.push_front(new_head);

    let grew = if state.entities.food == Some(new_head) {
        eat(state, false, now, rng);
        true
    } else if state.entities.golden_food.is_some_and(|g| g.pos == new_head) {
        eat(state, true, now, rng);
        // Also drops any golden food rolled by the respawn
        state.entities.golden_food = None;
        true
    } else {
        state.entities.snake.pop_back();
        false
    };

    if let Some(power_up) = state.entities.power_up.filter(|p| p.pos == new_head) {
        state.entities.power_up = None;
        effects::collect_power_up(state, power_up.kind, now);
    }

    Verdict::Continue { grew }
}

/// Score a food item, respawn food and roll the follow-up spawns
fn eat<R: Rng + ?Sized>(state: &mut GameState, golden: bool, now: u64, rng: &mut R) {
    let grid = state.config.grid;
    let rules = state.rules();

    if golden {
        state.award(POINTS_GOLDEN_FOOD);
        state.events.push(GameEvent::EatGolden);
    } else {
        state.award(POINTS_FOOD);
        state.events.push(GameEvent::EatFood);
    }
    state.food_eaten_this_level += 1;

    spawn::spawn_food(&mut state.entities, &grid, rng, now);
    progression::on_food_eaten(state, rng);
    spawn::maybe_spawn_power_up(&mut state.entities, &grid, &rules, rng);
}

/// Clear golden food that has outlived its duration
pub fn expire_golden_food(state: &mut GameState, now: u64) {
    if let Some(golden) = state.entities.golden_food {
        if now.saturating_sub(golden.spawned_at) > GOLDEN_FOOD_DURATION {
            state.entities.golden_food = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{GoldenFood, PowerUp, PowerUpKind};
    use crate::sim::grid::Grid;
    use crate::sim::rules::{Difficulty, GameConfig, Mode};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Empty board with a 3-long snake whose head is at (5, 5) facing right
    fn setup(mode: Mode) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = GameConfig::new(mode, Difficulty::Medium).with_grid(Grid::new(10, 10));
        let mut state = GameState::new(config, 0, &mut rng);
        state.entities = crate::sim::entities::Entities::with_snake(pos(5, 5), 3);
        (state, rng)
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let (mut s, mut rng) = setup(Mode::Classic);
        let v = resolve_move(&mut s, pos(6, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Continue { grew: false });
        assert_eq!(s.entities.head(), pos(6, 5));
        assert_eq!(s.snake_len(), 3);
    }

    #[test]
    fn test_wall_kills_and_counts() {
        let (mut s, mut rng) = setup(Mode::Classic);
        let v = resolve_move(&mut s, pos(10, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Terminal(GameOverReason::HitWall));
        assert_eq!(s.wall_hit_count, 1);
        assert_eq!(s.entities.head(), pos(5, 5), "nothing committed");
    }

    #[test]
    fn test_invincible_wraps_through_wall() {
        let (mut s, mut rng) = setup(Mode::Classic);
        s.is_invincible = true;
        let v = resolve_move(&mut s, pos(10, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Continue { grew: false });
        assert_eq!(s.entities.head(), pos(0, 5));
        assert_eq!(s.wall_hit_count, 0);
    }

    #[test]
    fn test_zen_wraps() {
        let (mut s, mut rng) = setup(Mode::Zen);
        let v = resolve_move(&mut s, pos(5, -1), 0, &mut rng);
        assert_eq!(v, Verdict::Continue { grew: false });
        assert_eq!(s.entities.head(), pos(5, 9));
    }

    #[test]
    fn test_portal_teleports_before_checks() {
        let (mut s, mut rng) = setup(Mode::Arcade);
        s.entities.portals = Some([pos(6, 5), pos(2, 2)]);
        s.entities.food = Some(pos(2, 2));
        let v = resolve_move(&mut s, pos(6, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Continue { grew: true });
        assert_eq!(s.entities.head(), pos(2, 2));
        assert!(s.events.contains(&GameEvent::Portal));
        assert!(s.events.contains(&GameEvent::EatFood));
    }

    #[test]
    fn test_portal_exit_on_body_is_fatal() {
        let (mut s, mut rng) = setup(Mode::Arcade);
        s.entities.portals = Some([pos(6, 5), pos(3, 5)]);
        let v = resolve_move(&mut s, pos(6, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Terminal(GameOverReason::HitSelf));
    }

    #[test]
    fn test_self_collision_includes_tail() {
        let (mut s, mut rng) = setup(Mode::Classic);
        let v = resolve_move(&mut s, pos(3, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Terminal(GameOverReason::HitSelf));
        assert_eq!(s.wall_hit_count, 0);
    }

    #[test]
    fn test_obstacle_counts_as_wall_hit() {
        let (mut s, mut rng) = setup(Mode::Classic);
        s.entities.obstacles = vec![pos(6, 5)];
        let v = resolve_move(&mut s, pos(6, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Terminal(GameOverReason::HitObstacle));
        assert_eq!(s.wall_hit_count, 1);
    }

    #[test]
    fn test_invincible_passes_obstacles_and_body() {
        let (mut s, mut rng) = setup(Mode::Classic);
        s.is_invincible = true;
        s.entities.obstacles = vec![pos(6, 5)];
        assert_eq!(
            resolve_move(&mut s, pos(6, 5), 0, &mut rng),
            Verdict::Continue { grew: false }
        );
    }

    #[test]
    fn test_food_grows_and_scores() {
        let (mut s, mut rng) = setup(Mode::Classic);
        s.entities.food = Some(pos(6, 5));
        let v = resolve_move(&mut s, pos(6, 5), 0, &mut rng);
        assert_eq!(v, Verdict::Continue { grew: true });
        assert_eq!(s.snake_len(), 4);
        assert_eq!(s.score, POINTS_FOOD);
        assert_eq!(s.food_eaten_this_level, 1);
        assert_ne!(s.entities.food, Some(pos(6, 5)));
    }

    #[test]
    fn test_golden_food_grows_and_clears() {
        let (mut s, mut rng) = setup(Mode::Classic);
        s.entities.food = Some(pos(0, 0));
        s.entities.golden_food = Some(GoldenFood {
            pos: pos(6, 5),
            spawned_at: 0,
        });
        let v = resolve_move(&mut s, pos(6, 5), 10, &mut rng);
        assert_eq!(v, Verdict::Continue { grew: true });
        assert_eq!(s.score, POINTS_GOLDEN_FOOD);
        assert_eq!(s.snake_len(), 4);
        assert!(s.events.contains(&GameEvent::EatGolden));
        assert_eq!(s.entities.golden_food, None);
    }

    #[test]
    fn test_golden_food_respawn_roll_is_cleared() {
        // Whatever the respawn rolls, eating golden food leaves none behind
        for seed in 0..64 {
            let (mut s, _) = setup(Mode::Classic);
            let mut rng = Pcg32::seed_from_u64(seed);
            s.entities.food = Some(pos(0, 0));
            s.entities.golden_food = Some(GoldenFood {
                pos: pos(6, 5),
                spawned_at: 0,
            });
            resolve_move(&mut s, pos(6, 5), 10, &mut rng);
            assert_eq!(s.entities.golden_food, None, "seed {seed}");
            assert!(s.entities.food.is_some());
        }
    }

    #[test]
    fn test_power_up_pickup_independent_of_food() {
        let (mut s, mut rng) = setup(Mode::Classic);
        s.entities.food = Some(pos(6, 5));
        s.entities.power_up = Some(PowerUp {
            kind: PowerUpKind::Invincible,
            pos: pos(6, 5),
        });
        resolve_move(&mut s, pos(6, 5), 0, &mut rng);
        assert!(s.is_invincible);
        assert_eq!(s.score, POINTS_FOOD + POINTS_POWERUP);
    }

    #[test]
    fn test_golden_food_expiry() {
        let (mut s, _) = setup(Mode::Classic);
        s.entities.golden_food = Some(GoldenFood {
            pos: pos(1, 1),
            spawned_at: 1000,
        });
        expire_golden_food(&mut s, 1000 + GOLDEN_FOOD_DURATION);
        assert!(s.entities.golden_food.is_some());
        expire_golden_food(&mut s, 1001 + GOLDEN_FOOD_DURATION);
        assert!(s.entities.golden_food.is_none());
    }
}
