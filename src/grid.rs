//! Row-major grids of ball positions.
//!
//! A [`Grid`] is used both for frames (where every ball is, or should be)
//! and for target grids (where a targeted animation wants balls to settle).
//! Positions are in calibrated travel units: `0.0` is the top of the
//! sculpture and `-max_distance` is the bottom.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KinesisError;

/// Fixed dimensions of a ball grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

impl GridSize {
    /// Grid size with the given row and column counts.
    #[must_use]
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Total number of balls.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.columns
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// A complete grid of positions, one per ball, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: GridSize,
    cells: Vec<f64>,
}

impl Grid {
    /// Grid with every cell set to `value`.
    #[must_use]
    pub fn filled(size: GridSize, value: f64) -> Self {
        Self {
            size,
            cells: vec![value; size.cell_count()],
        }
    }

    /// Grid built by evaluating `f(row, column)` for every cell in
    /// row-major order.
    pub fn from_fn(
        size: GridSize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        let mut cells = Vec::with_capacity(size.cell_count());
        for row in 0..size.rows {
            for column in 0..size.columns {
                cells.push(f(row, column));
            }
        }
        Self { size, cells }
    }

    /// Grid from nested rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, KinesisError> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || columns == 0 {
            return Err(KinesisError::MalformedGrid(
                "grid must have at least one row and one column".to_owned(),
            ));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != columns) {
            return Err(KinesisError::MalformedGrid(format!(
                "row {bad} has {} columns, expected {columns}",
                rows[bad].len()
            )));
        }
        let size = GridSize::new(rows.len(), columns);
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Dimensions of the grid.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Position at `(row, column)`.
    ///
    /// # Panics
    ///
    /// If the cell is outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.cells[self.index(row, column)]
    }

    /// Overwrite the position at `(row, column)`.
    ///
    /// # Panics
    ///
    /// If the cell is outside the grid.
    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        let idx = self.index(row, column);
        self.cells[idx] = value;
    }

    /// Iterate `(row, column, position)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let columns = self.size.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / columns, i % columns, v))
    }

    /// Flat row-major view of all positions.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Mutable flat row-major view of all positions.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Copy of the grid as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.size.columns.max(1))
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Fail with [`KinesisError::DimensionMismatch`] unless the grid has
    /// exactly the `expected` dimensions.
    pub fn ensure_size(
        &self,
        expected: GridSize,
        origin: &str,
    ) -> Result<(), KinesisError> {
        if self.size == expected && self.cells.len() == expected.cell_count()
        {
            Ok(())
        } else {
            Err(KinesisError::DimensionMismatch {
                origin: origin.to_owned(),
                expected,
                found: self.size,
            })
        }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.size.rows && column < self.size.columns,
            "cell ({row}, {column}) outside {} grid",
            self.size
        );
        row * self.size.columns + column
    }
}
