//! Core type definitions for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of substance occupying a grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Substance {
    #[default]
    Empty = 0,
    Metal = 1,
    Sand = 2,
    Water = 3,
    Acid = 4,
    Gas = 5,
    Bomb = 6,
}

impl Substance {
    pub fn all() -> [Substance; 7] {
        [
            Substance::Empty,
            Substance::Metal,
            Substance::Sand,
            Substance::Water,
            Substance::Acid,
            Substance::Gas,
            Substance::Bomb,
        ]
    }

    /// Inert kinds are never relocated by a rule of their own.
    pub fn is_inert(self) -> bool {
        matches!(self, Substance::Empty | Substance::Metal)
    }

    /// Kinds that sink through water instead of resting on it.
    pub fn sinks_in_water(self) -> bool {
        matches!(self, Substance::Sand | Substance::Acid)
    }

    /// Kinds an acid particle can eat away.
    pub fn is_soluble(self) -> bool {
        matches!(self, Substance::Metal | Substance::Sand)
    }
}

impl fmt::Display for Substance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Substance::Empty => "empty",
            Substance::Metal => "metal",
            Substance::Sand => "sand",
            Substance::Water => "water",
            Substance::Acid => "acid",
            Substance::Gas => "gas",
            Substance::Bomb => "bomb",
        };
        f.write_str(name)
    }
}

/// 2D position in the world. `x` is the column, `y` the row (row 0 is the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    pub fn below(&self) -> Self {
        self.add(0, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction for movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Sideways choices, indexed by a draw in `[0, 2)`.
    pub fn horizontal() -> [Direction; 2] {
        [Direction::Left, Direction::Right]
    }

    /// All four choices, indexed by a draw in `[0, 4)`.
    pub fn cardinal() -> [Direction; 4] {
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
    }
}

/// Per-cell activation probability, as a percentage in `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Speed(u32);

impl Speed {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidConfiguration(format!(
                "speed must be in [{}, {}], got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn full() -> Self {
        Self(Self::MAX)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Triple the speed, capped at 100.
    pub fn faster(self) -> Self {
        Self((self.0 * 3).min(Self::MAX))
    }

    /// Divide the speed by three, never dropping below 1.
    pub fn slower(self) -> Self {
        Self((self.0 / 3).max(Self::MIN))
    }
}

impl TryFrom<u32> for Speed {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Speed::new(value)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
