//! 2D grid of substance cells.

use sand_core::{Error, Position, Result, Substance, WorldConfig};

/// A bounded, row-major grid. Every in-range cell holds exactly one substance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Substance>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![Substance::Empty; size],
        })
    }

    /// Create an empty grid from world configuration
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Index of the bottom row
    pub fn last_row(&self) -> i32 {
        self.height - 1
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Get substance at position
    pub fn get(&self, pos: Position) -> Result<Substance> {
        self.cell(pos).ok_or_else(|| self.invalid(pos))
    }

    /// Set substance at position
    pub fn set(&mut self, pos: Position, kind: Substance) -> Result<()> {
        match self.index_of(pos) {
            Some(index) => {
                self.cells[index] = kind;
                Ok(())
            }
            None => Err(self.invalid(pos)),
        }
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Substance::Empty);
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: Substance) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// Number of non-empty cells
    pub fn occupied(&self) -> usize {
        self.cells.len() - self.count(Substance::Empty)
    }

    /// Rows from top to bottom, for renderers.
    pub fn rows(&self) -> impl Iterator<Item = &[Substance]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Substance)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Substance at `pos`, or `None` when it lies outside the grid.
    pub(crate) fn cell(&self, pos: Position) -> Option<Substance> {
        self.index_of(pos).map(|index| self.cells[index])
    }

    /// Write a cell the caller has already bounds-checked. Out-of-range
    /// writes are dropped.
    pub(crate) fn put(&mut self, pos: Position, kind: Substance) {
        debug_assert!(self.contains(pos), "write outside grid at {}", pos);
        if let Some(index) = self.index_of(pos) {
            self.cells[index] = kind;
        }
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    fn invalid(&self, pos: Position) -> Error {
        Error::InvalidCoordinate {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        }
    }
}
