//! Shape module - rectangular occupancy matrices
//!
//! A shape is the piece's bounding box; `true` marks a filled sub-cell
//! relative to the box's top-left corner.

use thiserror::Error;

/// Rejected shape matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no rows or no columns")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular boolean matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    /// Row-major (dy * width + dx)
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values (top row first).
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let s = Shape::from_rows(&[[0u8, 1, 1], [1, 1, 0]]).unwrap();
    /// assert_eq!((s.width(), s.height()), (3, 2));
    /// assert!(Shape::from_rows(&[vec![1u8, 1], vec![1]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if width == 0 {
            return Err(ShapeError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(ShapeError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values.iter().map(|&v| v != 0));
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Build a shape from fixed-width rows; rectangular by construction.
    pub(crate) fn from_grid<const W: usize>(rows: &[[u8; W]]) -> Self {
        Self {
            width: W,
            height: rows.len(),
            cells: rows.iter().flatten().map(|&v| v != 0).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether sub-cell (dx, dy) is filled. Out-of-box reads are empty.
    pub fn is_filled(&self, dx: usize, dy: usize) -> bool {
        dx < self.width && dy < self.height && self.cells[dy * self.width + dx]
    }

    /// Offsets (dx, dy) of every filled sub-cell, row by row
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }

    /// Clockwise quarter turn: transpose, then reverse each resulting row.
    ///
    /// Row `i` of the result is column `i` of `self` read bottom to top.
    pub fn rotated_cw(&self) -> Self {
        let width = self.height;
        let height = self.width;
        let mut cells = Vec::with_capacity(self.cells.len());
        for new_y in 0..height {
            for new_x in 0..width {
                let src_y = self.height - 1 - new_x;
                cells.push(self.cells[src_y * self.width + new_y]);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Rows as 0/1 values (top row first)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&f| u8::from(f)).collect())
            .collect()
    }
}
