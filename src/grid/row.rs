//! A row of cells with its own slot capacity
//!
//! The owning [`Table`](super::Table) decides how many cells are live; the
//! row only guarantees storage for them.

use super::cell::Cell;
use super::error::{GridError, Result};
use super::growth;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
    capacity: usize,
}

impl Row {
    /// Row with `cell_count` fresh cells, each reserving `cell_capacity` bytes
    ///
    /// Slot storage is sized to at least one cell. Cells built before a
    /// failure are dropped with the partial row.
    pub fn new(cell_count: usize, cell_capacity: usize) -> Result<Self> {
        let capacity = cell_count.max(1);
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(capacity)
            .map_err(|_| GridError::AllocationFailure {
                requested: capacity,
            })?;

        for _ in 0..cell_count {
            cells.push(Cell::with_capacity(cell_capacity)?);
        }
        Ok(Self { cells, capacity })
    }

    /// Number of cells held
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Allocated cell slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    pub fn get_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grow slot storage so `needed` cells fit
    pub(crate) fn ensure_cell_capacity(&mut self, needed: usize) -> Result<()> {
        growth::reserve_for(&mut self.cells, &mut self.capacity, needed)
    }

    /// Place `cell` at 0-based `index`, shifting later cells right
    ///
    /// Callers reserve a slot with [`Row::ensure_cell_capacity`] first, so
    /// this never reallocates.
    pub(crate) fn insert_cell(&mut self, index: usize, cell: Cell) {
        debug_assert!(self.cells.len() < self.capacity);
        self.cells.insert(index, cell);
    }

    /// Take the cell at 0-based `index`, shifting later cells left
    pub(crate) fn remove_cell(&mut self, index: usize) -> Cell {
        self.cells.remove(index)
    }
}
