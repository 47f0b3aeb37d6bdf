//! Direction handling and head advance
//!
//! Input collaborators push cardinal directions into a small queue; each tick
//! consumes at most one of them before the head moves.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Position;
use crate::consts::DIRECTION_QUEUE_CAPACITY;

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Accept only the four cardinal unit vectors
    pub fn from_vector(v: IVec2) -> Option<Self> {
        Direction::ALL.into_iter().find(|d| d.delta() == v)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_reverse_of(&self, other: Direction) -> bool {
        *self == other.opposite()
    }
}

/// Bounded FIFO of pending direction commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    /// Enqueue unless full (the newest input is dropped on overflow)
    pub fn push(&mut self, dir: Direction) -> bool {
        if self.pending.len() >= DIRECTION_QUEUE_CAPACITY {
            return false;
        }
        self.pending.push_back(dir);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Consume at most one queued direction and return the direction to move in.
///
/// A queued reversal of `current` is discarded (it still uses up the tick's
/// dequeue).
pub fn next_direction(current: Direction, queue: &mut DirectionQueue) -> Direction {
    match queue.pop() {
        Some(dir) if !dir.is_reverse_of(current) => dir,
        _ => current,
    }
}

/// Head position after one step, before any wrap or collision handling
#[inline]
pub fn advance(head: Position, dir: Direction) -> Position {
    head + dir.delta()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vector_rejects_non_cardinal() {
        assert_eq!(Direction::from_vector(IVec2::new(1, 0)), Some(Direction::Right));
        assert_eq!(Direction::from_vector(IVec2::new(0, -1)), Some(Direction::Up));
        assert_eq!(Direction::from_vector(IVec2::new(1, 1)), None);
        assert_eq!(Direction::from_vector(IVec2::new(2, 0)), None);
        assert_eq!(Direction::from_vector(IVec2::ZERO), None);
    }

    #[test]
    fn test_queue_capacity_drops_newest() {
        let mut q = DirectionQueue::default();
        assert!(q.push(Direction::Up));
        assert!(q.push(Direction::Left));
        assert!(q.push(Direction::Down));
        assert!(!q.push(Direction::Right));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(Direction::Up));
        assert_eq!(q.pop(), Some(Direction::Left));
        assert_eq!(q.pop(), Some(Direction::Down));
        assert!(q.is_empty());
    }

    #[test]
    fn test_next_direction_consumes_one_per_tick() {
        let mut q = DirectionQueue::default();
        q.push(Direction::Up);
        q.push(Direction::Left);
        let d = next_direction(Direction::Right, &mut q);
        assert_eq!(d, Direction::Up);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_reversal_discarded() {
        let mut q = DirectionQueue::default();
        q.push(Direction::Left);
        assert_eq!(next_direction(Direction::Right, &mut q), Direction::Right);
        assert!(q.is_empty());
    }

    #[test]
    fn test_advance() {
        assert_eq!(advance(IVec2::new(3, 3), Direction::Up), IVec2::new(3, 2));
        assert_eq!(advance(IVec2::new(0, 0), Direction::Left), IVec2::new(-1, 0));
    }
}
