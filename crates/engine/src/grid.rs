//! Grid snapshots and the structural/content operations on them.
//!
//! A `Grid` is an immutable value. Every operation takes `&self` and returns a
//! new `Grid`; rows that an operation does not touch are shared with the input
//! (cells live behind an `Arc`), so snapshots are cheap to keep in history.
//!
//! Invariants held by every operation:
//! - every row has exactly `col_count()` cells
//! - row and column counts never drop below 1
//! - a row's id never changes once assigned

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Axis, GridError, Result};
use crate::row_id::RowId;

// =============================================================================
// Row
// =============================================================================

/// One storage row: a stable id plus its cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    cells: Arc<[String]>,
}

impl Row {
    fn blank(cols: usize) -> Self {
        Self::from_cells(vec![String::new(); cols])
    }

    fn from_cells(cells: Vec<String>) -> Self {
        Self {
            id: RowId::fresh(),
            cells: cells.into(),
        }
    }

    /// Same id, new cells.
    fn with_cells(&self, cells: Vec<String>) -> Self {
        Self {
            id: self.id,
            cells: cells.into(),
        }
    }

    fn map_cells(&self, f: impl FnOnce(&mut Vec<String>)) -> Self {
        let mut cells = self.cells.to_vec();
        f(&mut cells);
        self.with_cells(cells)
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell text, or None past the last column.
    pub fn cell(&self, col: usize) -> Option<&str> {
        self.cells.get(col).map(String::as_str)
    }

    /// True if both rows share the same cell storage (not just equal text).
    pub fn shares_cells_with(&self, other: &Row) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

// =============================================================================
// Insert sides
// =============================================================================

/// Where a new row goes relative to the reference row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSide {
    Above,
    Below,
}

/// Where a new column goes relative to the reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSide {
    Left,
    Right,
}

impl FromStr for RowSide {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "above" => Ok(RowSide::Above),
            "below" => Ok(RowSide::Below),
            other => Err(format!("expected 'above' or 'below', got '{}'", other)),
        }
    }
}

impl FromStr for ColumnSide {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(ColumnSide::Left),
            "right" => Ok(ColumnSide::Right),
            other => Err(format!("expected 'left' or 'right', got '{}'", other)),
        }
    }
}

// =============================================================================
// Grid
// =============================================================================

/// A complete snapshot of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
    cols: usize,
}

impl Grid {
    /// Build a grid from seed data.
    ///
    /// Row count is `max(seed rows, min_rows, 1)`, column count is
    /// `max(widest seed row, min_cols, 1)`. Missing cells are empty and every
    /// row gets a fresh id.
    pub fn initialize<R, S>(seed: &[R], min_rows: usize, min_cols: usize) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let widest = seed.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let cols = widest.max(min_cols).max(1);
        let row_count = seed.len().max(min_rows).max(1);

        let rows = (0..row_count)
            .map(|i| {
                let mut cells: Vec<String> = seed
                    .get(i)
                    .map(|r| r.as_ref().iter().map(|c| c.as_ref().to_string()).collect())
                    .unwrap_or_default();
                cells.resize(cols, String::new());
                Row::from_cells(cells)
            })
            .collect();

        Self { rows, cols }
    }

    /// A blank grid of the given shape (each dimension at least 1).
    pub fn blank(rows: usize, cols: usize) -> Self {
        let cols = cols.max(1);
        Self {
            rows: (0..rows.max(1)).map(|_| Row::blank(cols)).collect(),
            cols,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Rows in storage order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    pub fn find_row_index_by_id(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn row_by_id(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Cell text without row ids, in storage order.
    pub fn to_data(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.cells.to_vec()).collect()
    }

    /// True if every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| r.cells.iter().all(String::is_empty))
    }

    fn index_of(&self, id: RowId) -> Result<usize> {
        self.find_row_index_by_id(id).ok_or(GridError::UnknownRow(id))
    }

    fn check_row(&self, index: usize) -> Result<()> {
        GridError::check(Axis::Row, index, self.rows.len())
    }

    fn check_col(&self, col: usize) -> Result<()> {
        GridError::check(Axis::Column, col, self.cols)
    }

    /// Replace one row, sharing every other row with `self`.
    fn replace_row(&self, index: usize, row: Row) -> Grid {
        let mut rows = self.rows.clone();
        rows[index] = row;
        Grid { rows, cols: self.cols }
    }

    fn map_rows(&self, cols: usize, f: impl Fn(&Row) -> Row) -> Grid {
        Grid {
            rows: self.rows.iter().map(f).collect(),
            cols,
        }
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    /// Set one cell in the row with `id`.
    pub fn set_cell(&self, id: RowId, col: usize, value: impl Into<String>) -> Result<Grid> {
        let index = self.index_of(id)?;
        self.set_cell_at(index, col, value)
    }

    /// Set one cell addressed by storage row index.
    pub fn set_cell_at(&self, row: usize, col: usize, value: impl Into<String>) -> Result<Grid> {
        self.check_row(row)?;
        self.check_col(col)?;
        let value = value.into();
        let updated = self.rows[row].map_cells(|cells| cells[col] = value);
        Ok(self.replace_row(row, updated))
    }

    pub fn clear_cell_by_id(&self, id: RowId, col: usize) -> Result<Grid> {
        self.set_cell(id, col, String::new())
    }

    pub fn clear_cell_by_index(&self, row: usize, col: usize) -> Result<Grid> {
        self.set_cell_at(row, col, String::new())
    }

    /// Empty every cell of one row; the row keeps its id.
    pub fn clear_row(&self, row: usize) -> Result<Grid> {
        self.check_row(row)?;
        let cleared = self.rows[row].with_cells(vec![String::new(); self.cols]);
        Ok(self.replace_row(row, cleared))
    }

    /// Empty one column in every row.
    pub fn clear_column(&self, col: usize) -> Result<Grid> {
        self.check_col(col)?;
        Ok(self.map_rows(self.cols, |r| r.map_cells(|cells| cells[col].clear())))
    }

    /// Empty every cell, keeping shape and row ids.
    pub fn clear_all(&self) -> Grid {
        let cols = self.cols;
        self.map_rows(cols, |r| r.with_cells(vec![String::new(); cols]))
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Insert one empty row next to the row at `at`.
    pub fn insert_row(&self, at: usize, side: RowSide) -> Result<Grid> {
        self.check_row(at)?;
        let index = match side {
            RowSide::Above => at,
            RowSide::Below => at + 1,
        };
        self.insert_rows(index, 1)
    }

    /// Insert `count` empty rows so the first lands at `index`.
    /// `index == row_count()` appends.
    pub fn insert_rows(&self, index: usize, count: usize) -> Result<Grid> {
        GridError::check(Axis::Row, index, self.rows.len() + 1)?;
        let mut rows = self.rows.clone();
        rows.splice(index..index, (0..count).map(|_| Row::blank(self.cols)));
        Ok(Grid { rows, cols: self.cols })
    }

    /// Append one empty row.
    pub fn add_row(&self) -> Grid {
        let mut rows = self.rows.clone();
        rows.push(Row::blank(self.cols));
        Grid { rows, cols: self.cols }
    }

    /// Remove the row at `at`. Removing the only row is a no-op.
    pub fn delete_row(&self, at: usize) -> Result<Grid> {
        self.check_row(at)?;
        if self.rows.len() <= 1 {
            return Ok(self.clone());
        }
        let mut rows = self.rows.clone();
        rows.remove(at);
        Ok(Grid { rows, cols: self.cols })
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Insert one empty column next to the column at `at`.
    pub fn insert_column(&self, at: usize, side: ColumnSide) -> Result<Grid> {
        self.check_col(at)?;
        let index = match side {
            ColumnSide::Left => at,
            ColumnSide::Right => at + 1,
        };
        self.insert_columns(index, 1)
    }

    /// Insert `count` empty columns so the first lands at `index`.
    /// `index == col_count()` appends.
    pub fn insert_columns(&self, index: usize, count: usize) -> Result<Grid> {
        GridError::check(Axis::Column, index, self.cols + 1)?;
        Ok(self.map_rows(self.cols + count, |r| {
            r.map_cells(|cells| {
                cells.splice(index..index, std::iter::repeat(String::new()).take(count));
            })
        }))
    }

    /// Append one empty column.
    pub fn add_column(&self) -> Grid {
        self.append_columns(1)
    }

    /// Append `count` empty columns.
    pub fn append_columns(&self, count: usize) -> Grid {
        let cols = self.cols + count;
        self.map_rows(cols, |r| r.map_cells(|cells| cells.resize(cols, String::new())))
    }

    /// Remove column `at` from every row. Removing the only column is a no-op.
    pub fn delete_column(&self, at: usize) -> Result<Grid> {
        self.check_col(at)?;
        if self.cols <= 1 {
            return Ok(self.clone());
        }
        Ok(self.map_rows(self.cols - 1, |r| {
            r.map_cells(|cells| {
                cells.remove(at);
            })
        }))
    }
}

impl fmt::Display for Grid {
    /// Tab-separated cells, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row.cells.join("\t"))?;
        }
        Ok(())
    }
}
