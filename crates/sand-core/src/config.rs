//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Speed;
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Width of the world grid (columns)
    pub width: i32,
    /// Height of the world grid (rows)
    pub height: i32,
    /// Half-extent of the square a bomb clears
    pub radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            radius: 5,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.radius <= 0 {
            return Err(Error::InvalidConfiguration(format!(
                "explosion radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Simulation session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of ticks a headless run performs
    pub num_ticks: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Initial activation probability (percent)
    pub speed: u32,
    /// Ticks between population snapshots in the log
    pub snapshot_interval: u64,
    /// World configuration
    pub world_config: WorldConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_ticks: 1_000,
            seed: 0,
            speed: 19,
            snapshot_interval: 100,
            world_config: WorldConfig::default(),
        }
    }
}

impl SimConfig {
    /// Check every field before any tick runs.
    pub fn validate(&self) -> Result<()> {
        self.world_config.validate()?;
        Speed::new(self.speed)?;
        if self.snapshot_interval == 0 {
            return Err(Error::InvalidConfiguration(
                "snapshot interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn initial_speed(&self) -> Result<Speed> {
        Speed::new(self.speed)
    }
}
