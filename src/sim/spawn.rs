//! Random placement of items and hazards
//!
//! Placement is rejection sampling with a hard attempt cap. When the cap is
//! hit the caller gets an explicit `Placement::Starved` and skips the spawn
//! instead of stacking two entities on one cell.

use rand::Rng;

use super::entities::{Entities, GoldenFood, PowerUp, PowerUpKind};
use super::grid::{Grid, Position};
use super::rules::ModeRules;
use crate::consts::*;

/// Outcome of a placement search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Empty(Position),
    /// No free cell found within the attempt cap
    Starved { last_sample: Position },
}

impl Placement {
    /// The free cell, if one was found
    pub fn position(self) -> Option<Position> {
        match self {
            Placement::Empty(pos) => Some(pos),
            Placement::Starved { .. } => None,
        }
    }
}

/// Draw uniformly from the grid until `blocked` rejects nothing
pub fn random_empty_position<R: Rng + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    blocked: impl Fn(Position) -> bool,
) -> Placement {
    let mut last = Position::ZERO;
    for _ in 0..SPAWN_MAX_ATTEMPTS {
        last = Position::new(rng.random_range(0..grid.width), rng.random_range(0..grid.height));
        if !blocked(last) {
            return Placement::Empty(last);
        }
    }
    Placement::Starved { last_sample: last }
}

fn place_item<R: Rng + ?Sized>(
    entities: &Entities,
    grid: &Grid,
    rng: &mut R,
    what: &str,
) -> Option<Position> {
    match random_empty_position(grid, rng, |p| entities.blocks_spawn(p)) {
        Placement::Empty(pos) => Some(pos),
        Placement::Starved { last_sample } => {
            log::warn!(
                "No free cell for {} after {} attempts (last sample {:?}), skipping",
                what,
                SPAWN_MAX_ATTEMPTS,
                last_sample
            );
            None
        }
    }
}

/// Place food, and independently maybe golden food stamped with `now`
pub fn spawn_food<R: Rng + ?Sized>(entities: &mut Entities, grid: &Grid, rng: &mut R, now: u64) {
    // The eaten food no longer occupies its cell
    entities.food = None;
    let food = place_item(entities, grid, rng, "food");
    entities.food = food;

    if rng.random_bool(GOLDEN_FOOD_PROBABILITY) {
        if let Some(pos) = place_item(entities, grid, rng, "golden food") {
            entities.golden_food = Some(GoldenFood {
                pos,
                spawned_at: now,
            });
        }
    }
}

/// Roll for a power-up after food is eaten. Returns the spawned kind.
pub fn maybe_spawn_power_up<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rules: &ModeRules,
    rng: &mut R,
) -> Option<PowerUpKind> {
    if !rules.has_power_ups || entities.power_up.is_some() {
        return None;
    }
    if !rng.random_bool(POWERUP_SPAWN_CHANCE) {
        return None;
    }

    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = random_empty_position(grid, rng, |p| entities.occupied(p)).position()?;
    entities.power_up = Some(PowerUp { kind, pos });
    log::debug!("Spawned {:?} power-up at {:?}", kind, pos);
    Some(kind)
}

/// Number of obstacles a level starts with
pub fn obstacle_count(level: u32) -> usize {
    (OBSTACLES_PER_LEVEL * level as usize).min(MAX_LEVEL_OBSTACLES)
}

/// Place the obstacle set for a level (modes without obstacles get none)
pub fn generate_obstacles<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rules: &ModeRules,
    level: u32,
    rng: &mut R,
) {
    if !rules.has_obstacles {
        return;
    }
    for _ in 0..obstacle_count(level) {
        match place_item(entities, grid, rng, "obstacle") {
            Some(pos) => entities.obstacles.push(pos),
            None => break,
        }
    }
}

/// Place one portal pair if the mode and level allow it and none exists yet
pub fn generate_portals<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rules: &ModeRules,
    level: u32,
    rng: &mut R,
) {
    if entities.portals.is_some() || !rules.has_portals || level < PORTAL_MIN_LEVEL {
        return;
    }
    let Some(a) = place_item(entities, grid, rng, "portal") else {
        return;
    };
    let Some(b) = random_empty_position(grid, rng, |p| p == a || entities.blocks_spawn(p)).position()
    else {
        log::warn!("No free cell for second portal endpoint, skipping pair");
        return;
    };
    entities.portals = Some([a, b]);
}

/// Survival ramp: one more obstacle, up to the cap
pub fn add_survival_obstacle<R: Rng + ?Sized>(
    entities: &mut Entities,
    grid: &Grid,
    rng: &mut R,
) -> bool {
    if entities.obstacles.len() >= SURVIVAL_MAX_OBSTACLES {
        return false;
    }
    match place_item(entities, grid, rng, "survival obstacle") {
        Some(pos) => {
            entities.obstacles.push(pos);
            true
        }
        None => false,
    }
}
