//! Board module - manages the game grid
//!
//! The board is a 10x40 grid where each cell is empty, garbage, or a locked piece kind.
//! Uses a flat array for cache locality; cloning a board is a single memcpy, which the
//! search tree relies on.
//! Coordinates: (row, col) where row ranges 0..39 (bottom to top) and col 0..9 (left to right).

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, VISIBLE_HEIGHT};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The game board - 10 columns x 40 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some(row * BOARD_WIDTH + col)
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Check if a signed position is filled; out-of-bounds counts as filled
    pub fn is_blocked(&self, row: i8, col: i8) -> bool {
        if row < 0 || col < 0 {
            return true;
        }
        !self.is_empty(row as usize, col as usize)
    }

    /// Fill every listed cell with `cell`
    pub fn set_cells(&mut self, cells: &[(usize, usize)], cell: Cell) {
        for &(row, col) in cells {
            self.set(row, col, cell);
        }
    }

    /// Empty every listed cell
    pub fn clear_cells(&mut self, cells: &[(usize, usize)]) {
        self.set_cells(cells, Cell::Empty);
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT {
            return false;
        }
        let start = row * BOARD_WIDTH;
        self.cells[start..start + BOARD_WIDTH]
            .iter()
            .all(|cell| cell.is_filled())
    }

    /// Remove the listed rows, shifting everything above down and refilling the top
    /// with empty rows. Rows may be given in any order; duplicates are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut write_row = 0usize;

        // Scan from bottom to top, compacting kept rows downwards
        for read_row in 0..BOARD_HEIGHT {
            if rows.contains(&read_row) {
                continue;
            }
            if write_row != read_row {
                let src = read_row * BOARD_WIDTH;
                self.cells
                    .copy_within(src..src + BOARD_WIDTH, write_row * BOARD_WIDTH);
            }
            write_row += 1;
        }

        for cell in &mut self.cells[write_row * BOARD_WIDTH..] {
            *cell = Cell::Empty;
        }
    }

    /// Push a garbage row in at the bottom, leaving `empty_col` open.
    /// Everything moves up one row and the top row falls off the board.
    pub fn insert_garbage_row(&mut self, empty_col: usize) {
        self.cells.copy_within(0..BOARD_SIZE - BOARD_WIDTH, BOARD_WIDTH);
        for (col, cell) in self.cells[..BOARD_WIDTH].iter_mut().enumerate() {
            *cell = if col == empty_col {
                Cell::Empty
            } else {
                Cell::Garbage
            };
        }
    }

    /// True when every cell on the board is empty
    pub fn is_all_clear(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Column heights counted in rows (index of the top filled cell + 1, 0 for an empty
    /// column). Cells listed in `ignore` are treated as empty.
    pub fn column_heights(&self, ignore: &[(usize, usize)]) -> [usize; BOARD_WIDTH] {
        let mut heights = [0usize; BOARD_WIDTH];
        for (col, height) in heights.iter_mut().enumerate() {
            for row in (0..BOARD_HEIGHT).rev() {
                if self.cells[row * BOARD_WIDTH + col].is_filled() && !ignore.contains(&(row, col)) {
                    *height = row + 1;
                    break;
                }
            }
        }
        heights
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Write the visible rows as snapshot codes, top visible row first
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH]; VISIBLE_HEIGHT]) {
        for (i, line) in out.iter_mut().enumerate() {
            let row = VISIBLE_HEIGHT - 1 - i;
            for (col, code) in line.iter_mut().enumerate() {
                *code = self.cells[row * BOARD_WIDTH + col].code();
            }
        }
    }

    /// Build a board from text rows, top row first; the last line is row 0.
    /// `.` is empty, `G` garbage, any piece letter a locked piece.
    ///
    /// ```
    /// use tetro_duel_core::Board;
    ///
    /// let board = Board::from_rows(&["..........", "GGGGGGGGG."]);
    /// assert!(board.is_empty(0, 9));
    /// assert!(!board.is_empty(0, 0));
    /// assert!(board.is_empty(1, 0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (i, line) in rows.iter().rev().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'G' | 'g' | '#' => Cell::Garbage,
                    other => crate::types::PieceKind::from_char(other)
                        .map(Cell::Piece)
                        .unwrap_or(Cell::Empty),
                };
                board.set(i, col, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
