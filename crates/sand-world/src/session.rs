//! Interactive session: grid, engine and the settings a front end adjusts
//! between ticks.

use crate::engine::{RuleEngine, TickStats};
use crate::grid::Grid;
use crate::random::ChaChaSource;
use sand_core::{Position, Result, SimConfig, Speed, Substance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// A control issued by the front end between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Paint with this substance from now on
    Brush(Substance),
    Clear,
    TogglePause,
    SpeedUp,
    SpeedDown,
}

impl Command {
    /// Keyboard binding, case-insensitive.
    pub fn from_key(key: char) -> Option<Command> {
        let command = match key.to_ascii_lowercase() {
            'b' => Command::Brush(Substance::Empty),
            'm' => Command::Brush(Substance::Metal),
            's' => Command::Brush(Substance::Sand),
            'w' => Command::Brush(Substance::Water),
            'a' => Command::Brush(Substance::Acid),
            'g' => Command::Brush(Substance::Gas),
            'v' => Command::Brush(Substance::Bomb),
            'c' => Command::Clear,
            'p' => Command::TogglePause,
            'u' => Command::SpeedUp,
            'd' => Command::SpeedDown,
            _ => return None,
        };
        Some(command)
    }
}

pub struct Session {
    grid: Grid,
    engine: RuleEngine,
    rng: ChaChaSource,
    speed: Speed,
    brush: Substance,
    paused: bool,
    tick: u64,
    snapshot_interval: u64,
}

impl Session {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            grid: Grid::from_config(&config.world_config)?,
            engine: RuleEngine::from_config(&config.world_config)?,
            rng: ChaChaSource::seeded(config.seed),
            speed: config.initial_speed()?,
            brush: Substance::Metal,
            paused: false,
            tick: 0,
            snapshot_interval: config.snapshot_interval,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn brush(&self) -> Substance {
        self.brush
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks actually simulated (paused steps don't count).
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Write the current brush substance into one cell.
    pub fn paint(&mut self, pos: Position) -> Result<()> {
        self.grid.set(pos, self.brush)
    }

    /// Write an explicit substance into one cell.
    pub fn paint_with(&mut self, pos: Position, kind: Substance) -> Result<()> {
        self.grid.set(pos, kind)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Brush(kind) => self.brush = kind,
            Command::Clear => self.grid.clear(),
            Command::TogglePause => self.paused = !self.paused,
            Command::SpeedUp => self.speed = self.speed.faster(),
            Command::SpeedDown => self.speed = self.speed.slower(),
        }
        debug!(
            ?command,
            brush = %self.brush,
            speed = self.speed.get(),
            paused = self.paused,
            "Applied command"
        );
    }

    /// Apply every recognised key in `keys`, returning how many were used.
    pub fn apply_keys(&mut self, keys: &str) -> usize {
        let commands: Vec<Command> = keys.chars().filter_map(Command::from_key).collect();
        for command in &commands {
            self.apply(*command);
        }
        commands.len()
    }

    /// Advance one tick unless paused.
    pub fn step(&mut self) -> Option<TickStats> {
        if self.paused {
            return None;
        }
        let stats = self.engine.tick(&mut self.grid, self.speed, &mut self.rng);
        self.tick += 1;
        Some(stats)
    }

    /// Step `num_ticks` times, logging a population snapshot every
    /// `snapshot_interval` simulated ticks.
    #[instrument(skip(self), fields(speed = self.speed.get()))]
    pub fn run(&mut self, num_ticks: u64) -> RunSummary {
        info!("Starting run for {} ticks", num_ticks);

        let initial_population = self.grid.occupied();
        let mut totals = TickStats::default();
        let mut simulated = 0;

        for _ in 0..num_ticks {
            let Some(stats) = self.step() else {
                continue;
            };
            totals.merge(&stats);
            simulated += 1;

            if self.tick % self.snapshot_interval == 0 {
                self.emit_population_snapshot();
            }
        }

        let summary = RunSummary {
            ticks_requested: num_ticks,
            ticks_simulated: simulated,
            initial_population,
            final_population: self.grid.occupied(),
            totals,
        };

        info!(
            ticks_simulated = summary.ticks_simulated,
            initial_population = summary.initial_population,
            final_population = summary.final_population,
            moved = summary.totals.moved,
            removed = summary.totals.removed,
            dissolved = summary.totals.dissolved,
            explosions = summary.totals.explosions,
            cleared = summary.totals.cleared,
            "Run complete"
        );

        summary
    }

    /// Count of every substance currently on the grid.
    pub fn population(&self) -> BTreeMap<Substance, usize> {
        Substance::all()
            .into_iter()
            .map(|kind| (kind, self.grid.count(kind)))
            .collect()
    }

    fn emit_population_snapshot(&self) {
        info!(
            tick = self.tick,
            metal = self.grid.count(Substance::Metal),
            sand = self.grid.count(Substance::Sand),
            water = self.grid.count(Substance::Water),
            acid = self.grid.count(Substance::Acid),
            gas = self.grid.count(Substance::Gas),
            bomb = self.grid.count(Substance::Bomb),
            "Population snapshot"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks_requested: u64,
    pub ticks_simulated: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub totals: TickStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sand_core::{Error, WorldConfig};

    fn small_config() -> SimConfig {
        SimConfig {
            seed: 42,
            speed: 100,
            snapshot_interval: 5,
            world_config: WorldConfig {
                width: 12,
                height: 12,
                radius: 3,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_session_creation() {
        let session = Session::new(&small_config()).unwrap();
        assert_eq!(session.grid().width(), 12);
        assert_eq!(session.speed().get(), 100);
        assert_eq!(session.brush(), Substance::Metal);
        assert!(!session.is_paused());
        assert_eq!(session.grid().occupied(), 0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = SimConfig {
            speed: 0,
            ..small_config()
        };
        assert!(matches!(
            Session::new(&config),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key('S'), Some(Command::Brush(Substance::Sand)));
        assert_eq!(Command::from_key('v'), Some(Command::Brush(Substance::Bomb)));
        assert_eq!(Command::from_key('b'), Some(Command::Brush(Substance::Empty)));
        assert_eq!(Command::from_key('p'), Some(Command::TogglePause));
        assert_eq!(Command::from_key('x'), None);
        assert_eq!(Command::from_key('1'), None);
    }

    #[test]
    fn test_paint_uses_brush() {
        let mut session = Session::new(&small_config()).unwrap();
        session.paint(Position::new(1, 1)).unwrap();
        session.apply(Command::Brush(Substance::Water));
        session.paint(Position::new(2, 1)).unwrap();

        assert_eq!(session.grid().get(Position::new(1, 1)).unwrap(), Substance::Metal);
        assert_eq!(session.grid().get(Position::new(2, 1)).unwrap(), Substance::Water);
        assert!(matches!(
            session.paint(Position::new(12, 0)),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_speed_commands() {
        let mut session = Session::new(&SimConfig::default()).unwrap();
        assert_eq!(session.speed().get(), 19);
        session.apply(Command::SpeedUp);
        assert_eq!(session.speed().get(), 57);
        session.apply(Command::SpeedUp);
        assert_eq!(session.speed().get(), 100);
        assert_eq!(session.apply_keys("ddddd"), 5);
        assert_eq!(session.speed().get(), 1);
    }

    #[test]
    fn test_pause_skips_ticks() {
        let mut session = Session::new(&small_config()).unwrap();
        session.paint_with(Position::new(3, 0), Substance::Sand).unwrap();

        session.apply(Command::TogglePause);
        assert!(session.step().is_none());
        assert_eq!(session.grid().get(Position::new(3, 0)).unwrap(), Substance::Sand);
        assert_eq!(session.ticks(), 0);

        session.apply(Command::TogglePause);
        assert!(session.step().is_some());
        assert_eq!(session.grid().get(Position::new(3, 1)).unwrap(), Substance::Sand);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn test_clear_command() {
        let mut session = Session::new(&small_config()).unwrap();
        session.apply_keys("s");
        for x in 0..12 {
            session.paint(Position::new(x, 4)).unwrap();
        }
        assert_eq!(session.grid().count(Substance::Sand), 12);
        session.apply_keys("c");
        assert_eq!(session.grid().occupied(), 0);
    }

    #[test]
    fn test_run_summary() {
        let mut session = Session::new(&small_config()).unwrap();
        session.apply(Command::Brush(Substance::Sand));
        for x in 0..12 {
            session.paint(Position::new(x, 0)).unwrap();
        }

        let summary = session.run(20);
        assert_eq!(summary.ticks_requested, 20);
        assert_eq!(summary.ticks_simulated, 20);
        assert_eq!(summary.initial_population, 12);
        // at full speed every grain reaches the floor within 11 ticks
        assert_eq!(summary.final_population, 0);
        assert_eq!(summary.totals.removed, 12);
        assert_eq!(session.ticks(), 20);
    }

    #[test]
    fn test_population_counts() {
        let mut session = Session::new(&small_config()).unwrap();
        session.paint_with(Position::new(0, 0), Substance::Gas).unwrap();
        session.paint_with(Position::new(1, 0), Substance::Gas).unwrap();
        session.paint_with(Position::new(5, 5), Substance::Acid).unwrap();

        let population = session.population();
        assert_eq!(population[&Substance::Gas], 2);
        assert_eq!(population[&Substance::Acid], 1);
        assert_eq!(population[&Substance::Empty], 141);
        assert_eq!(population.len(), 7);
        // keyed by substance, so iteration follows discriminant order
        let kinds: Vec<Substance> = population.keys().copied().collect();
        assert_eq!(kinds, Substance::all());
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let build = || {
            let mut session = Session::new(&small_config()).unwrap();
            for x in 0..12 {
                session.paint_with(Position::new(x, 11 - x % 4), Substance::Metal).unwrap();
                session.paint_with(Position::new(x, 2), Substance::Water).unwrap();
                session.paint_with(Position::new(x, 3), Substance::Acid).unwrap();
                session.paint_with(Position::new(x, 6), Substance::Gas).unwrap();
            }
            session.run(15);
            session.grid().clone()
        };
        assert_eq!(build(), build());
    }
}
