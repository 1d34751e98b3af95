//! Core grid types shared by the board and the snake.

/// Direction of travel on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards column 0.
    Left,

    /// Towards the last column.
    Right,

    /// Towards row 0.
    Up,

    /// Towards the last row.
    Down,
}

impl Direction {
    /// Order in which direction buttons are checked; the first pressed one wins.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns the `(dx, dy)` unit vector for this direction.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// A signed board coordinate.
///
/// Signed so a step can land one cell outside the board (column -1, row -1,
/// `COLS` or `ROWS`) and be rejected before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coord {
    /// Column.
    pub x: i8,

    /// Row.
    pub y: i8,
}

impl Coord {
    /// Creates a coordinate from a column and a row.
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring coordinate one cell away in `direction`.
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    /// Nothing here.
    #[default]
    Empty,

    /// The snake's head.
    Head,

    /// Food; eating it grows the snake.
    Food,

    /// A fixed obstacle; running into it ends the round.
    Obstacle,

    /// A body segment. The direction points at the next segment towards the head.
    Body(Direction),
}

impl Cell {
    /// Returns true for `Empty`.
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns true for `Head` and any `Body` segment.
    #[inline]
    pub const fn is_snake(self) -> bool {
        matches!(self, Cell::Head | Cell::Body(_))
    }

    /// Returns true for any `Body` segment.
    #[inline]
    pub const fn is_body(self) -> bool {
        matches!(self, Cell::Body(_))
    }
}
