//! Fixed-size game board.
//!
//! Provides [`Board`], a `ROWS x COLS` grid of [`Cell`]s. The board is also the
//! snake's only record of where it is: body cells carry the direction towards
//! the next segment, so no separate position list exists.

use crate::types::{Cell, Coord};
use rand::Rng;

/// Number of board rows.
pub const ROWS: usize = 4;

/// Number of board columns.
pub const COLS: usize = 20;

/// Errors that can occur during board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// The coordinate lies outside the board.
    OutOfBounds(Coord),

    /// No empty cell is left to place food on.
    Full,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds(coord) => {
                write!(f, "coordinate {} is outside the {}x{} board", coord, COLS, ROWS)
            }
            BoardError::Full => {
                write!(f, "board has no empty cell left")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// A `ROWS x COLS` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Clears every cell to `Empty`.
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }

    /// Returns true if `coord` lies on the board.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < COLS && (coord.y as usize) < ROWS
    }

    /// Returns the cell at `coord`, or `None` if it lies outside the board.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.contains(coord) {
            Some(self.cells[coord.y as usize][coord.x as usize])
        } else {
            None
        }
    }

    /// Returns the cell at `coord`.
    ///
    /// # Errors
    /// * `OutOfBounds` - The coordinate is not on the board
    pub fn cell_at(&self, coord: Coord) -> Result<Cell, BoardError> {
        self.get(coord).ok_or(BoardError::OutOfBounds(coord))
    }

    /// Overwrites the cell at `coord`.
    ///
    /// # Errors
    /// * `OutOfBounds` - The coordinate is not on the board
    pub fn set_cell(&mut self, coord: Coord, cell: Cell) -> Result<(), BoardError> {
        if !self.contains(coord) {
            return Err(BoardError::OutOfBounds(coord));
        }

        self.cells[coord.y as usize][coord.x as usize] = cell;
        Ok(())
    }

    /// Iterates over all cells in row-major order together with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &cell)| (Coord::new(x as i8, y as i8), cell))
        })
    }

    /// Counts the cells matching `predicate`.
    pub fn count(&self, predicate: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().flatten().filter(|&&cell| predicate(cell)).count()
    }

    /// Returns the number of empty cells.
    pub fn empty_cells(&self) -> usize {
        self.count(Cell::is_empty)
    }

    /// Marks a uniformly random empty cell as `Food` and returns its coordinate.
    ///
    /// Draws random cells until an empty one turns up. Only called once at
    /// least one empty cell is known to exist, so the loop ends with
    /// probability 1.
    ///
    /// # Errors
    /// * `Full` - No empty cell exists; the board is left untouched
    pub fn place_food<R: Rng>(&mut self, rng: &mut R) -> Result<Coord, BoardError> {
        if self.empty_cells() == 0 {
            return Err(BoardError::Full);
        }

        loop {
            let coord = random_coord(rng);
            if self.cells[coord.y as usize][coord.x as usize].is_empty() {
                self.cells[coord.y as usize][coord.x as usize] = Cell::Food;
                return Ok(coord);
            }
        }
    }

    /// Makes `count` independent attempts to place an obstacle on a random cell.
    ///
    /// Attempts that land on a non-empty cell are skipped, so fewer than
    /// `count` obstacles may end up on the board. Returns how many were placed.
    pub fn place_obstacles<R: Rng>(&mut self, count: u8, rng: &mut R) -> u8 {
        let mut placed = 0;

        for _ in 0..count {
            let coord = random_coord(rng);
            let cell = &mut self.cells[coord.y as usize][coord.x as usize];
            if cell.is_empty() {
                *cell = Cell::Obstacle;
                placed += 1;
            }
        }

        placed
    }
}

fn random_coord<R: Rng>(rng: &mut R) -> Coord {
    let x = rng.random_range(0..COLS as i8);
    let y = rng.random_range(0..ROWS as i8);
    Coord::new(x, y)
}
