//! Per-species movement rules.
//!
//! Each rule looks at one particle, draws whatever randomness it needs, and
//! rewrites at most the particle's own cell and one target cell (bombs are the
//! exception: a triggered bomb clears a whole region).

use crate::explosion;
use crate::grid::Grid;
use crate::random::RandomSource;
use sand_core::{Direction, Position, Substance};

/// What a rule did to the particle it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Blocked,
    /// The particle now lives at `to`, possibly after swapping with water.
    Moved { to: Position },
    /// The particle fell off the floor or drifted out of the grid.
    Removed,
    /// Acid ate the metal or sand below it.
    Dissolved { at: Position },
    /// A bomb went off, emptying `cleared` previously occupied cells.
    Exploded { cleared: usize },
}

/// Result of the shared vertical-fall step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fall {
    Moved(Position),
    Landed,
    Stuck,
}

/// Shared gravity step for sand, water, acid and bombs.
///
/// A particle whose row ends up being the last one is deleted in the same
/// step, whether it just arrived there or was already sitting on the floor.
fn fall(grid: &mut Grid, pos: Position, kind: Substance) -> Fall {
    let last_row = grid.last_row();

    let landed = if pos.y == last_row {
        pos
    } else {
        let below = pos.below();
        match grid.cell(below) {
            Some(Substance::Empty) => {
                grid.put(below, kind);
                grid.put(pos, Substance::Empty);
                below
            }
            Some(Substance::Water) if kind.sinks_in_water() => {
                grid.put(below, kind);
                grid.put(pos, Substance::Water);
                below
            }
            _ => pos,
        }
    };

    if landed.y == last_row {
        grid.put(landed, Substance::Empty);
        Fall::Landed
    } else if landed != pos {
        Fall::Moved(landed)
    } else {
        Fall::Stuck
    }
}

/// Step one cell left or right into empty space; leaving the grid deletes the particle.
fn drift<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    pos: Position,
    kind: Substance,
    rng: &mut R,
) -> Outcome {
    let direction = Direction::horizontal()[rng.below(2) as usize];
    let target = pos.step(direction);

    match grid.cell(target) {
        None => {
            grid.put(pos, Substance::Empty);
            Outcome::Removed
        }
        Some(Substance::Empty) => {
            grid.put(target, kind);
            grid.put(pos, Substance::Empty);
            Outcome::Moved { to: target }
        }
        Some(_) => Outcome::Blocked,
    }
}

pub fn move_sand(grid: &mut Grid, pos: Position) -> Outcome {
    match fall(grid, pos, Substance::Sand) {
        Fall::Moved(to) => Outcome::Moved { to },
        Fall::Landed => Outcome::Removed,
        Fall::Stuck => Outcome::Blocked,
    }
}

pub fn move_water<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    pos: Position,
    rng: &mut R,
) -> Outcome {
    match fall(grid, pos, Substance::Water) {
        Fall::Moved(to) => Outcome::Moved { to },
        Fall::Landed => Outcome::Removed,
        Fall::Stuck => drift(grid, pos, Substance::Water, rng),
    }
}

/// Acid falls like sand. When it can't, it mostly spreads like water, sometimes
/// trades places with adjacent water, and occasionally dissolves what it sits on.
pub fn move_acid<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    pos: Position,
    rng: &mut R,
) -> Outcome {
    match fall(grid, pos, Substance::Acid) {
        Fall::Moved(to) => return Outcome::Moved { to },
        Fall::Landed => return Outcome::Removed,
        Fall::Stuck => {}
    }

    let choice = rng.below(100);
    if choice < 80 {
        drift(grid, pos, Substance::Acid, rng)
    } else if choice < 95 {
        let direction = Direction::cardinal()[rng.below(4) as usize];
        let target = pos.step(direction);
        match grid.cell(target) {
            None => {
                grid.put(pos, Substance::Empty);
                Outcome::Removed
            }
            Some(Substance::Water) => {
                grid.put(target, Substance::Acid);
                grid.put(pos, Substance::Water);
                Outcome::Moved { to: target }
            }
            Some(_) => Outcome::Blocked,
        }
    } else {
        let below = pos.below();
        match grid.cell(below) {
            Some(kind) if kind.is_soluble() => {
                grid.put(below, Substance::Empty);
                Outcome::Dissolved { at: below }
            }
            _ => Outcome::Blocked,
        }
    }
}

/// Gas rises 80% of the time and otherwise wanders sideways, bubbling up
/// through water and vanishing at the grid edges.
pub fn move_gas<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    pos: Position,
    rng: &mut R,
) -> Outcome {
    let direction = if rng.below(100) < 20 {
        Direction::horizontal()[rng.below(2) as usize]
    } else {
        Direction::Up
    };
    let target = pos.step(direction);

    match grid.cell(target) {
        None => {
            grid.put(pos, Substance::Empty);
            Outcome::Removed
        }
        Some(Substance::Empty) => {
            grid.put(target, Substance::Gas);
            grid.put(pos, Substance::Empty);
            Outcome::Moved { to: target }
        }
        Some(Substance::Water) => {
            grid.put(target, Substance::Gas);
            grid.put(pos, Substance::Water);
            Outcome::Moved { to: target }
        }
        Some(_) => Outcome::Blocked,
    }
}

/// Bombs fall, and once resting next to acid they blow up.
pub fn move_bomb(grid: &mut Grid, pos: Position, radius: i32) -> Outcome {
    match fall(grid, pos, Substance::Bomb) {
        Fall::Moved(to) => Outcome::Moved { to },
        Fall::Landed => Outcome::Removed,
        Fall::Stuck if explosion::next_to_acid(grid, pos) => Outcome::Exploded {
            cleared: explosion::detonate(grid, pos, radius),
        },
        Fall::Stuck => Outcome::Blocked,
    }
}
