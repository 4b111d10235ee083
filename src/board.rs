//! Playfield grid, collision queries and row clearing

use crate::tetromino::{BlockKind, Position};

/// Standard playfield dimensions
pub const GRID_COLS: usize = 10;
pub const VISIBLE_ROWS: usize = 20;
/// Hidden rows above the visible playfield, used as spawn headroom
pub const BUFFER_ROWS: usize = 2;
pub const GRID_ROWS: usize = VISIBLE_ROWS + BUFFER_ROWS;

/// Value reported by [`Grid::cell_value`] for coordinates off the grid
pub const OUT_OF_BOUNDS: i32 = -1;

/// A cell on the grid - either empty or holding a locked tile of some kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// 0 for empty, the kind ordinal otherwise
    pub fn value(&self) -> i32 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => i32::from(kind.ordinal()),
        }
    }
}

/// Fixed-size cell matrix. Row 0 is the top buffer row, rows grow downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major, `rows * cols` cells
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_ROWS, GRID_COLS)
    }
}

impl Grid {
    /// Create an empty grid; dimensions never change afterwards
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Get the cell at (row, col), None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Numeric cell value: 0 empty, kind ordinal when filled,
    /// [`OUT_OF_BOUNDS`] off the grid
    pub fn cell_value(&self, row: i32, col: i32) -> i32 {
        self.get(row, col).map_or(OUT_OF_BOUNDS, |cell| cell.value())
    }

    /// Set a cell. Out-of-bounds writes are dropped and return false.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => {
                // Callers validate positions first, so landing here is an engine bug
                tracing::warn!(row, col, "ignoring out-of-bounds grid write");
                false
            }
        }
    }

    /// True only if (row, col) is on the grid and empty
    pub fn is_cell_empty(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_empty())
    }

    /// Check if every position is on the grid and empty
    pub fn are_positions_empty(&self, positions: &[Position]) -> bool {
        positions
            .iter()
            .all(|pos| self.is_cell_empty(pos.row, pos.col))
    }

    /// Write a block's tiles as permanent cells of `kind`
    pub fn lock_tiles(&mut self, positions: &[Position], kind: BlockKind) {
        for pos in positions {
            self.set(pos.row, pos.col, Cell::Filled(kind));
        }
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(Cell::is_filled)
    }

    fn clear_row(&mut self, row: usize) {
        self.cells[row * self.cols..(row + 1) * self.cols].fill(Cell::Empty);
    }

    fn move_row_down(&mut self, row: usize, by: usize) {
        let src = row * self.cols;
        let dst = (row + by) * self.cols;
        self.cells.copy_within(src..src + self.cols, dst);
        self.clear_row(row);
    }

    /// Clear full rows and let everything above fall into the gaps.
    ///
    /// Single bottom-to-top pass: full rows are emptied and counted, and each
    /// surviving row is moved down by the number of rows cleared below it.
    /// Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for row in (0..self.rows).rev() {
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            } else if cleared > 0 {
                self.move_row_down(row, cleared);
            }
        }
        cleared
    }

    /// Check if the grid is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Rows shown to the player (everything below the buffer), top to bottom,
    /// as (absolute row index, cells)
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        (BUFFER_ROWS.min(self.rows)..self.rows).map(move |row| (row, self.row(row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, row: i32, kind: BlockKind) {
        for col in 0..grid.cols() as i32 {
            grid.set(row, col, Cell::Filled(kind));
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::default();
        assert_eq!(grid.rows(), 22);
        assert_eq!(grid.cols(), 10);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::default();
        assert!(grid.set(5, 5, Cell::Filled(BlockKind::Z)));
        assert_eq!(grid.get(5, 5), Some(Cell::Filled(BlockKind::Z)));
        assert_eq!(grid.cell_value(5, 5), 7);
        assert_eq!(grid.cell_value(5, 6), 0);
        assert!(!grid.is_cell_empty(5, 5));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::default();
        for (row, col) in [(-1, 0), (0, -1), (22, 0), (0, 10), (-5, -5), (100, 100)] {
            assert_eq!(grid.get(row, col), None);
            assert_eq!(grid.cell_value(row, col), OUT_OF_BOUNDS);
            assert!(!grid.is_cell_empty(row, col), "({row}, {col})");
        }
    }

    #[test]
    fn test_out_of_bounds_write_is_ignored() {
        let mut grid = Grid::default();
        assert!(!grid.set(-1, 3, Cell::Filled(BlockKind::T)));
        assert!(!grid.set(3, 10, Cell::Filled(BlockKind::T)));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clear_two_bottom_rows() {
        let mut grid = Grid::default();
        fill_row(&mut grid, 21, BlockKind::I);
        fill_row(&mut grid, 20, BlockKind::O);

        assert_eq!(grid.clear_full_rows(), 2);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clear_moves_partial_row_down() {
        let mut grid = Grid::default();
        fill_row(&mut grid, 21, BlockKind::I);
        for col in 0..5 {
            grid.set(20, col, Cell::Filled(BlockKind::L));
        }

        assert_eq!(grid.clear_full_rows(), 1);
        for col in 0..5 {
            assert_eq!(grid.get(21, col), Some(Cell::Filled(BlockKind::L)));
        }
        for col in 5..10 {
            assert_eq!(grid.get(21, col), Some(Cell::Empty));
        }
        for col in 0..10 {
            assert_eq!(grid.get(20, col), Some(Cell::Empty));
        }
    }

    #[test]
    fn test_clear_with_gap_between_full_rows() {
        let mut grid = Grid::default();
        fill_row(&mut grid, 21, BlockKind::I);
        grid.set(20, 0, Cell::Filled(BlockKind::S));
        fill_row(&mut grid, 19, BlockKind::J);
        grid.set(18, 9, Cell::Filled(BlockKind::T));

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.get(21, 0), Some(Cell::Filled(BlockKind::S)));
        assert_eq!(grid.get(20, 9), Some(Cell::Filled(BlockKind::T)));
        assert!(grid.is_cell_empty(19, 9));
        assert!(grid.is_cell_empty(18, 9));
    }

    #[test]
    fn test_no_full_rows_is_noop() {
        let mut grid = Grid::default();
        grid.set(21, 0, Cell::Filled(BlockKind::O));
        let before = grid.clone();
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_visible_rows_skip_buffer() {
        let grid = Grid::default();
        let rows: Vec<_> = grid.visible_rows().map(|(row, _)| row).collect();
        assert_eq!(rows.len(), VISIBLE_ROWS);
        assert_eq!(rows.first(), Some(&BUFFER_ROWS));
        assert_eq!(rows.last(), Some(&(GRID_ROWS - 1)));
    }
}
