//! Falling sand simulation engine.
//!
//! A bounded grid of substances evolves one tick at a time under per-species
//! rules: gravity, sinking through water, sideways drift, rising gas, acid
//! dissolution and bomb explosions.

pub mod grid;
pub mod random;
pub mod rules;
pub mod explosion;
pub mod engine;
pub mod session;

pub use grid::Grid;
pub use random::{ChaChaSource, RandomSource, ScriptedSource};
pub use rules::Outcome;
pub use engine::{RuleEngine, TickStats};
pub use session::{Command, RunSummary, Session};
