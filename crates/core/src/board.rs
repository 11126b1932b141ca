//! Board module - manages the game grid
//!
//! The board is a `rows x columns` grid where each cell is empty or holds a
//! palette color. Cells live in one flat row-major `Vec` for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Coordinates are signed so callers can ask about positions above the top
//! edge (negative y) while a piece is still entering the board.

use crate::types::{Cell, Color};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u16,
    columns: u16,
    /// Flat array of cells, row-major order (y * columns + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u16, columns: u16) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows as usize * columns as usize],
        }
    }

    /// Build a board from explicit rows (top row first).
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return None;
        }
        let height = u16::try_from(rows.len()).ok()?;
        let width = u16::try_from(columns).ok()?;
        Some(Self {
            rows: height,
            columns: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.columns as i32 || y < 0 || y >= self.rows as i32 {
            return None;
        }
        Some((y as usize) * (self.columns as usize) + (x as usize))
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether a piece sub-cell at (x, y) would be blocked.
    ///
    /// Left, right and bottom edges always block. Rows above the top edge
    /// (`y < 0`) never block: only the horizontal bounds apply there.
    /// Inside the board the cell's occupancy decides.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.columns as i32 || y >= self.rows as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.cell(x, y), Some(Some(_)))
    }

    /// Write a color into the cell at (x, y).
    /// Returns false (and writes nothing) if out of bounds, including rows above the top.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Color) -> bool {
        self.put(x, y, Some(color))
    }

    /// Overwrite the cell at (x, y), occupied or empty.
    /// Returns false if out of bounds
    pub fn put(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Row `y` as a slice, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows as usize {
            return None;
        }
        let width = self.columns as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. Surviving rows keep their relative
    /// order and slide down; one empty row appears at the top for each row
    /// removed. Adjacent full rows are handled in the same pass.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.columns as usize;
        let mut cleared = 0usize;
        let mut write_y = self.rows as usize;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }

            // Move the surviving row down to the write position
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        }

        // Fresh empty rows at the top
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy the board out as nested rows (top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.columns.max(1) as usize)
            .map(<[Cell]>::to_vec)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_ROWS, crate::types::BOARD_COLUMNS)
    }
}
