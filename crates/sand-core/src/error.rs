//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid coordinate: ({x}, {y}) is outside a {width}x{height} grid")]
    InvalidCoordinate {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
