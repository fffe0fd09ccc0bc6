//! The tick scheduler: scan order, activation gate and rule dispatch.

use crate::grid::Grid;
use crate::random::RandomSource;
use crate::rules::{self, Outcome};
use sand_core::{Error, Position, Result, Speed, Substance, WorldConfig};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Counters collected over one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Cells that passed the activation gate
    pub activations: u64,
    /// Activated cells that held a non-inert substance
    pub rules_applied: u64,
    pub moved: u64,
    pub removed: u64,
    pub dissolved: u64,
    pub explosions: u64,
    /// Occupied cells emptied by explosions
    pub cleared: u64,
}

impl TickStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Blocked => {}
            Outcome::Moved { .. } => self.moved += 1,
            Outcome::Removed => self.removed += 1,
            Outcome::Dissolved { .. } => self.dissolved += 1,
            Outcome::Exploded { cleared } => {
                self.explosions += 1;
                self.cleared += cleared as u64;
            }
        }
    }

    pub fn merge(&mut self, other: &TickStats) {
        self.activations += other.activations;
        self.rules_applied += other.rules_applied;
        self.moved += other.moved;
        self.removed += other.removed;
        self.dissolved += other.dissolved;
        self.explosions += other.explosions;
        self.cleared += other.cleared;
    }
}

/// Applies the species rules to a grid, one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    radius: i32,
}

impl RuleEngine {
    pub fn new(radius: i32) -> Result<Self> {
        if radius <= 0 {
            return Err(Error::InvalidConfiguration(format!(
                "explosion radius must be positive, got {}",
                radius
            )));
        }
        Ok(Self { radius })
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        Self::new(config.radius)
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Run one simulation step over the whole grid.
    pub fn tick<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid,
        speed: Speed,
        rng: &mut R,
    ) -> TickStats {
        self.tick_observed(grid, speed, rng, |_, _| {})
    }

    /// Same as [`RuleEngine::tick`], calling `observer` with the position and
    /// kind of every particle right before its rule runs.
    ///
    /// Rows are scanned bottom to top and each row right to left, so a
    /// particle that falls lands on a row that was already visited. Particles
    /// moving up or left would land ahead of the scan; the cells they move
    /// into are skipped for the rest of the tick so that every particle gets
    /// at most one rule application.
    pub fn tick_observed<R, F>(
        &self,
        grid: &mut Grid,
        speed: Speed,
        rng: &mut R,
        mut observer: F,
    ) -> TickStats
    where
        R: RandomSource + ?Sized,
        F: FnMut(Position, Substance),
    {
        let width = grid.width();
        let height = grid.height();
        let mut settled = vec![false; (width as usize) * (height as usize)];
        let mut stats = TickStats::default();

        for y in (0..height).rev() {
            for x in (0..width).rev() {
                if rng.below(100) >= speed.get() {
                    continue;
                }
                stats.activations += 1;

                let index = (y * width + x) as usize;
                if settled[index] {
                    continue;
                }

                let pos = Position::new(x, y);
                let Some(kind) = grid.cell(pos) else {
                    continue;
                };
                if kind.is_inert() {
                    continue;
                }

                observer(pos, kind);
                stats.rules_applied += 1;

                let outcome = self.apply(grid, pos, kind, rng);
                if let Outcome::Moved { to } = outcome {
                    settled[(to.y * width + to.x) as usize] = true;
                }
                stats.record(outcome);
            }
        }

        trace!(
            activations = stats.activations,
            rules_applied = stats.rules_applied,
            moved = stats.moved,
            removed = stats.removed,
            dissolved = stats.dissolved,
            explosions = stats.explosions,
            "Tick complete"
        );

        stats
    }

    fn apply<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid,
        pos: Position,
        kind: Substance,
        rng: &mut R,
    ) -> Outcome {
        match kind {
            Substance::Empty | Substance::Metal => Outcome::Blocked,
            Substance::Sand => rules::move_sand(grid, pos),
            Substance::Water => rules::move_water(grid, pos, rng),
            Substance::Acid => rules::move_acid(grid, pos, rng),
            Substance::Gas => rules::move_gas(grid, pos, rng),
            Substance::Bomb => rules::move_bomb(grid, pos, self.radius),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self { radius: 5 }
    }
}
