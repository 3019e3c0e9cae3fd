//! The table: rows of equal logical width
//!
//! Positions passed to the structural edits are 1-based, matching how a
//! user addresses rows and columns. Every edit reserves storage and builds
//! new rows/cells before touching existing data, so a failed call leaves the
//! table exactly as it was.

use std::io::{self, Write};

use super::cell::{Cell, DEFAULT_CELL_CAPACITY};
use super::error::{GridError, Result};
use super::growth;
use super::row::Row;

/// Row slots allocated by a new table
const INITIAL_ROW_CAPACITY: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
    col_count: usize,
    capacity: usize,
    cell_capacity: usize,
}

impl Table {
    /// Empty table with one row slot pre-allocated
    pub fn new() -> Result<Self> {
        Self::with_cell_capacity(DEFAULT_CELL_CAPACITY)
    }

    /// Empty table whose new cells reserve `cell_capacity` bytes each
    pub fn with_cell_capacity(cell_capacity: usize) -> Result<Self> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(INITIAL_ROW_CAPACITY)
            .map_err(|_| GridError::AllocationFailure {
                requested: INITIAL_ROW_CAPACITY,
            })?;

        Ok(Self {
            rows,
            col_count: 0,
            capacity: INITIAL_ROW_CAPACITY,
            cell_capacity,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Allocated row slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert an empty row so it becomes row `position` (1-based)
    pub fn insert_row(&mut self, position: usize) -> Result<()> {
        let index = insert_index(position, self.row_count())?;

        let needed = self.row_count() + 1;
        growth::reserve_for(&mut self.rows, &mut self.capacity, needed)?;
        let row = Row::new(self.col_count, self.cell_capacity)?;

        self.rows.insert(index, row);
        tracing::debug!(
            "Inserted row at {} ({}x{})",
            position,
            self.row_count(),
            self.col_count
        );
        Ok(())
    }

    /// Insert an empty column so it becomes column `position` (1-based)
    ///
    /// Every row gets its slot reserved and its new cell built before any
    /// row is widened, so either all rows grow or none do.
    pub fn insert_column(&mut self, position: usize) -> Result<()> {
        let index = insert_index(position, self.col_count)?;

        let needed = self.col_count + 1;
        for row in &mut self.rows {
            row.ensure_cell_capacity(needed)?;
        }

        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(self.rows.len())
            .map_err(|_| GridError::AllocationFailure {
                requested: self.rows.len(),
            })?;
        for _ in 0..self.rows.len() {
            fresh.push(Cell::with_capacity(self.cell_capacity)?);
        }

        for (row, cell) in self.rows.iter_mut().zip(fresh) {
            row.insert_cell(index, cell);
        }
        self.col_count += 1;

        tracing::debug!(
            "Inserted column at {} ({}x{})",
            position,
            self.row_count(),
            self.col_count
        );
        Ok(())
    }

    /// Remove row `position` (1-based) and release its cells
    pub fn delete_row(&mut self, position: usize) -> Result<()> {
        let index = existing_index(position, self.row_count())?;
        drop(self.rows.remove(index));

        tracing::debug!(
            "Deleted row {} ({}x{})",
            position,
            self.row_count(),
            self.col_count
        );
        Ok(())
    }

    /// Remove column `position` (1-based) from every row
    pub fn delete_column(&mut self, position: usize) -> Result<()> {
        let index = existing_index(position, self.col_count)?;
        for row in &mut self.rows {
            drop(row.remove_cell(index));
        }
        self.col_count -= 1;

        tracing::debug!(
            "Deleted column {} ({}x{})",
            position,
            self.row_count(),
            self.col_count
        );
        Ok(())
    }

    /// Append an empty row after the last one
    pub fn append_row(&mut self) -> Result<()> {
        self.insert_row(self.row_count() + 1)
    }

    /// Append an empty column after the last one
    pub fn append_column(&mut self) -> Result<()> {
        self.insert_column(self.col_count + 1)
    }

    /// Cell at 0-based `(row, col)`, or `None` outside the logical bounds
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if col >= self.col_count {
            return None;
        }
        self.rows.get(row)?.get(col)
    }

    /// Mutable cell at 0-based `(row, col)`
    pub fn get_cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if col >= self.col_count {
            return None;
        }
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Row at 0-based `row`
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Every row as text: cells joined by `delimiter`, newline-terminated
    pub fn serialize(&self, delimiter: char) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for (col, cell) in row.cells().iter().enumerate() {
                if col > 0 {
                    out.push(delimiter);
                }
                out.push_str(&cell.as_str());
            }
            out.push('\n');
        }
        out
    }

    /// Write the same output as [`Table::serialize`] without re-encoding cell bytes
    pub fn write_to<W: Write>(&self, out: &mut W, delimiter: char) -> io::Result<()> {
        let mut delim = [0u8; 4];
        let delim = delimiter.encode_utf8(&mut delim).as_bytes();

        for row in &self.rows {
            for (col, cell) in row.cells().iter().enumerate() {
                if col > 0 {
                    out.write_all(delim)?;
                }
                out.write_all(cell.text())?;
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// 0-based index for inserting at 1-based `position` among `count` elements
fn insert_index(position: usize, count: usize) -> Result<usize> {
    let max = count + 1;
    if position == 0 || position > max {
        return Err(GridError::OutOfRange { position, max });
    }
    Ok(position - 1)
}

/// 0-based index of the existing element at 1-based `position`
fn existing_index(position: usize, count: usize) -> Result<usize> {
    if position == 0 || position > count {
        return Err(GridError::OutOfRange {
            position,
            max: count,
        });
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows()
            .map(|row| row.cells().iter().map(|c| c.as_str().into_owned()).collect())
            .collect()
    }

    fn filled(rows: usize, cols: usize) -> Table {
        let mut table = Table::new().unwrap();
        for _ in 0..rows {
            table.append_row().unwrap();
        }
        for _ in 0..cols {
            table.append_column().unwrap();
        }
        for r in 0..rows {
            for c in 0..cols {
                let text = format!("{}{}", r, c);
                table.get_cell_mut(r, c).unwrap().set_text(text.as_bytes()).unwrap();
            }
        }
        table
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new().unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.col_count(), 0);
        assert_eq!(table.capacity(), 1);
        assert!(table.get_cell(0, 0).is_none());
        assert_eq!(table.serialize(':'), "");
    }

    #[test]
    fn test_three_by_three_scenario() {
        let mut table = Table::new().unwrap();
        table.insert_row(1).unwrap();
        table.insert_row(2).unwrap();
        table.insert_row(3).unwrap();
        table.insert_column(1).unwrap();
        table.insert_column(2).unwrap();
        table.insert_column(3).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.col_count(), 3);
        assert_eq!(table.serialize(':'), "::\n::\n::\n");
    }

    #[test]
    fn test_rows_without_columns_serialize_as_blank_lines() {
        let mut table = Table::new().unwrap();
        table.insert_row(1).unwrap();
        table.insert_row(1).unwrap();
        assert_eq!(table.serialize(','), "\n\n");
        assert!(table.get_cell(0, 0).is_none());
    }

    #[test]
    fn test_insert_row_in_middle_keeps_order() {
        let mut table = filled(3, 2);
        table.insert_row(2).unwrap();

        assert_eq!(
            texts(&table),
            vec![
                vec!["00", "01"],
                vec!["", ""],
                vec!["10", "11"],
                vec!["20", "21"],
            ]
        );
    }

    #[test]
    fn test_insert_row_at_front_and_end() {
        let mut table = filled(2, 1);
        table.insert_row(1).unwrap();
        table.insert_row(4).unwrap();
        assert_eq!(texts(&table), vec![vec![""], vec!["00"], vec!["10"], vec![""]]);
    }

    #[test]
    fn test_insert_row_rejects_bad_positions() {
        let mut table = filled(2, 2);
        assert_eq!(
            table.insert_row(0),
            Err(GridError::OutOfRange { position: 0, max: 3 })
        );
        assert_eq!(
            table.insert_row(4),
            Err(GridError::OutOfRange { position: 4, max: 3 })
        );
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_insert_column_in_middle_shifts_cells() {
        let mut table = filled(2, 2);
        table.insert_column(2).unwrap();

        assert_eq!(table.col_count(), 3);
        assert_eq!(texts(&table), vec![vec!["00", "", "01"], vec!["10", "", "11"]]);
    }

    #[test]
    fn test_insert_column_rejects_bad_positions() {
        let mut table = filled(2, 2);
        assert!(table.insert_column(0).is_err());
        assert!(table.insert_column(4).is_err());
        assert_eq!(table.col_count(), 2);
        assert!(table.rows().all(|r| r.len() == 2));
    }

    #[test]
    fn test_insert_column_failure_leaves_table_unchanged() {
        let mut table = Table::with_cell_capacity(usize::MAX).unwrap();
        table.insert_row(1).unwrap();
        table.insert_row(1).unwrap();

        let err = table.insert_column(1).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(table.col_count(), 0);
        assert!(table.rows().all(|r| r.is_empty()));
    }

    #[test]
    fn test_insert_row_failure_leaves_table_unchanged() {
        let mut table = Table::with_cell_capacity(usize::MAX).unwrap();
        table.insert_column(1).unwrap();

        let err = table.insert_row(1).unwrap_err();
        assert!(err.is_allocation_failure());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.col_count(), 1);
    }

    #[test]
    fn test_delete_row() {
        let mut table = filled(3, 2);
        table.delete_row(2).unwrap();
        assert_eq!(texts(&table), vec![vec!["00", "01"], vec!["20", "21"]]);

        assert_eq!(
            table.delete_row(3),
            Err(GridError::OutOfRange { position: 3, max: 2 })
        );
        assert!(table.delete_row(0).is_err());
    }

    #[test]
    fn test_delete_column() {
        let mut table = filled(2, 3);
        table.delete_column(1).unwrap();
        assert_eq!(table.col_count(), 2);
        assert_eq!(texts(&table), vec![vec!["01", "02"], vec!["11", "12"]]);

        table.delete_column(2).unwrap();
        table.delete_column(1).unwrap();
        assert_eq!(table.col_count(), 0);
        assert!(table.delete_column(1).is_err());
        assert_eq!(table.serialize(';'), "\n\n");
    }

    #[test]
    fn test_delete_everything_then_rebuild() {
        let mut table = filled(2, 2);
        table.delete_row(1).unwrap();
        table.delete_row(1).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.col_count(), 2);

        table.insert_row(1).unwrap();
        assert_eq!(table.row(0).unwrap().len(), 2);
    }

    #[test]
    fn test_get_cell_bounds() {
        let table = filled(2, 3);
        assert_eq!(table.get_cell(1, 2).unwrap().as_str(), "12");
        assert!(table.get_cell(2, 0).is_none());
        assert!(table.get_cell(0, 3).is_none());
    }

    #[test]
    fn test_capacity_grows_by_rule() {
        let mut table = Table::new().unwrap();
        let mut seen = vec![table.capacity()];
        for _ in 0..5 {
            table.append_row().unwrap();
            if seen.last() != Some(&table.capacity()) {
                seen.push(table.capacity());
            }
        }
        assert_eq!(seen, vec![1, 2, 4, 8]);
    }

    #[test]
    fn test_serialize_and_write_to_agree() {
        let table = filled(2, 3);
        let mut bytes = Vec::new();
        table.write_to(&mut bytes, '|').unwrap();

        assert_eq!(table.serialize('|'), "00|01|02\n10|11|12\n");
        assert_eq!(String::from_utf8(bytes).unwrap(), table.serialize('|'));
    }
}
