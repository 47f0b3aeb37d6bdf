//! Entity registry
//!
//! Positions of everything placed on the grid for the current tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::Position;

/// Golden food: worth more, disappears if not eaten in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenFood {
    pub pos: Position,
    /// Spawn time (ms)
    pub spawned_at: u64,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Slow,
    Invincible,
    Multiplier,
    Shrink,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Speed,
        PowerUpKind::Slow,
        PowerUpKind::Invincible,
        PowerUpKind::Multiplier,
        PowerUpKind::Shrink,
    ];

    /// Display name for HUD badges
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Speed Boost",
            PowerUpKind::Slow => "Slow Motion",
            PowerUpKind::Invincible => "Invincible",
            PowerUpKind::Multiplier => "2x Score",
            PowerUpKind::Shrink => "Shrink",
        }
    }
}

/// A live power-up on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Position,
}

/// All placed entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    /// Snake body, head first
    pub snake: VecDeque<Position>,
    pub food: Option<Position>,
    pub golden_food: Option<GoldenFood>,
    pub obstacles: Vec<Position>,
    /// Linked portal endpoints (none, or exactly one pair)
    pub portals: Option<[Position; 2]>,
    pub power_up: Option<PowerUp>,
}

impl Entities {
    /// Snake laid out horizontally from `head`, trailing to the left
    pub fn with_snake(head: Position, length: usize) -> Self {
        let snake = (0..length as i32)
            .map(|i| Position::new(head.x - i, head.y))
            .collect();
        Self {
            snake,
            ..Default::default()
        }
    }

    pub fn head(&self) -> Position {
        // Snake length is always >= 1
        self.snake[0]
    }

    pub fn snake_contains(&self, pos: Position) -> bool {
        self.snake.iter().any(|&s| s == pos)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    pub fn is_portal(&self, pos: Position) -> bool {
        self.portals.is_some_and(|pair| pair.contains(&pos))
    }

    /// Cell taken by snake, obstacle, food, golden food or portal.
    ///
    /// The live power-up is not included, so a power-up can be placed on any
    /// cell that passes this check.
    pub fn occupied(&self, pos: Position) -> bool {
        self.snake_contains(pos)
            || self.is_obstacle(pos)
            || self.food == Some(pos)
            || self.golden_food.is_some_and(|g| g.pos == pos)
            || self.is_portal(pos)
    }

    /// Check used for every non-power-up spawn
    pub fn blocks_spawn(&self, pos: Position) -> bool {
        self.occupied(pos) || self.power_up.is_some_and(|p| p.pos == pos)
    }

    /// The other endpoint if `pos` is on a portal
    pub fn portal_exit(&self, pos: Position) -> Option<Position> {
        let [a, b] = self.portals?;
        if pos == a {
            Some(b)
        } else if pos == b {
            Some(a)
        } else {
            None
        }
    }

    /// Clear everything that only lives for one level
    pub fn clear_level_items(&mut self) {
        self.obstacles.clear();
        self.portals = None;
        self.golden_food = None;
        self.power_up = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_with_snake_layout() {
        let e = Entities::with_snake(pos(20, 15), 3);
        assert_eq!(e.snake, VecDeque::from(vec![pos(20, 15), pos(19, 15), pos(18, 15)]));
        assert_eq!(e.head(), pos(20, 15));
    }

    #[test]
    fn test_power_up_not_occupied_but_blocks_spawn() {
        let mut e = Entities::with_snake(pos(5, 5), 1);
        e.power_up = Some(PowerUp {
            kind: PowerUpKind::Shrink,
            pos: pos(1, 1),
        });
        assert!(!e.occupied(pos(1, 1)));
        assert!(e.blocks_spawn(pos(1, 1)));
    }

    #[test]
    fn test_occupied_covers_all_entities() {
        let mut e = Entities::with_snake(pos(5, 5), 2);
        e.food = Some(pos(0, 0));
        e.golden_food = Some(GoldenFood {
            pos: pos(1, 0),
            spawned_at: 0,
        });
        e.obstacles.push(pos(2, 0));
        e.portals = Some([pos(3, 0), pos(9, 9)]);

        for p in [pos(5, 5), pos(4, 5), pos(0, 0), pos(1, 0), pos(2, 0), pos(3, 0), pos(9, 9)] {
            assert!(e.occupied(p), "{p:?} should be occupied");
        }
        assert!(!e.occupied(pos(8, 8)));
    }

    #[test]
    fn test_portal_exit() {
        let mut e = Entities::default();
        assert_eq!(e.portal_exit(pos(1, 1)), None);
        e.portals = Some([pos(1, 1), pos(7, 3)]);
        assert_eq!(e.portal_exit(pos(1, 1)), Some(pos(7, 3)));
        assert_eq!(e.portal_exit(pos(7, 3)), Some(pos(1, 1)));
        assert_eq!(e.portal_exit(pos(2, 2)), None);
    }
}
