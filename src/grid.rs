//! Square board of cell colors kept in one flat buffer.

use crate::color::CellColor;
use thiserror::Error;

/// Errors produced by grid operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A grid must have at least one cell per side.
    #[error("grid size must be at least 1, got {0}")]
    InvalidSize(usize),
    /// Cell coordinates outside `[0, size)`.
    #[error("cell ({i}, {j}) is outside a {size}x{size} grid")]
    OutOfBounds { i: usize, j: usize, size: usize },
}

/// Square N×N grid of cell colors.
///
/// `i` selects the column (horizontal pixel axis) and `j` the row, matching how the
/// canvas lays cells out. Storage is a single buffer indexed `i * size + j`, which is
/// also the layout the grid shader reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellColor>,
}

impl Grid {
    /// All-dead grid of `size` × `size` cells.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size < 1 {
            return Err(GridError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![CellColor::WHITE; size * size],
        })
    }

    /// Fresh all-dead grid of `new_size`. The current pattern is never carried over.
    pub fn resized(&self, new_size: usize) -> Result<Self, GridError> {
        Self::new(new_size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<CellColor> {
        if i < self.size && j < self.size {
            Some(self.cells[self.index(i, j)])
        } else {
            None
        }
    }

    /// Overwrites one cell in place.
    pub fn set(&mut self, i: usize, j: usize, color: CellColor) -> Result<(), GridError> {
        self.check_bounds(i, j)?;
        let idx = self.index(i, j);
        self.cells[idx] = color;
        Ok(())
    }

    /// Copy of this grid with cell `(i, j)` replaced; `self` is left untouched.
    pub fn with_cell(&self, i: usize, j: usize, color: CellColor) -> Result<Self, GridError> {
        let mut next = self.clone();
        next.set(i, j, color)?;
        Ok(next)
    }

    /// Kills a live cell, or paints a dead one with `paint`. Returns the new color.
    pub fn toggle(&mut self, i: usize, j: usize, paint: CellColor) -> Result<CellColor, GridError> {
        self.check_bounds(i, j)?;
        let idx = self.index(i, j);
        let next = if self.cells[idx].is_alive() {
            CellColor::WHITE
        } else {
            paint
        };
        self.cells[idx] = next;
        Ok(next)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| !c.is_alive())
    }

    /// Raw cell storage in `i * size + j` order.
    pub fn cells(&self) -> &[CellColor] {
        &self.cells
    }

    /// Builds a grid from a cell buffer already laid out in `i * size + j` order.
    pub(crate) fn from_cells(size: usize, cells: Vec<CellColor>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<(), GridError> {
        if i >= self.size || j >= self.size {
            return Err(GridError::OutOfBounds { i, j, size: self.size });
        }
        Ok(())
    }
}
