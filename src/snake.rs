//! Snake controller.
//!
//! Provides [`Snake`], which moves the snake across a [`Board`] one cell per
//! step. The snake keeps only its head, tail, heading and length; the segments
//! in between live on the board as `Body(direction)` cells, each pointing at
//! the next segment towards the head. Retracting the tail is a single lookup
//! of the direction stored under it.

use crate::board::{Board, BoardError};
use crate::types::{Cell, Coord, Direction};

/// Tail position the snake starts from after a reset.
pub const START_TAIL: Coord = Coord::new(0, 0);

/// Heading the snake starts with after a reset.
pub const START_HEADING: Direction = Direction::Right;

/// Length the snake starts with after a reset.
pub const START_LENGTH: u8 = 4;

/// Whether the snake can still move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SnakeState {
    /// Moving.
    Alive,

    /// Hit something; only a full reset brings it back.
    Crashed,
}

/// What the snake ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Collision {
    /// Stepped off the board.
    Wall,

    /// Stepped onto its own body or an obstacle.
    Occupied,
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Moved onto an empty cell; `vacated` is the old tail cell, now empty.
    Moved { vacated: Coord },

    /// Moved onto food and grew by one cell.
    AteFood,

    /// Hit a wall, its own body or an obstacle. The board was not modified.
    Crashed(Collision),
}

/// Errors that can occur during snake operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SnakeError {
    /// `step` called after the snake crashed.
    NotAlive,

    /// The cell under the tail is not a body segment, so the body chain is broken.
    BrokenChain(Coord),

    /// A board access failed.
    Board(BoardError),
}

impl core::fmt::Display for SnakeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SnakeError::NotAlive => write!(f, "snake has crashed and cannot move"),
            SnakeError::BrokenChain(coord) => {
                write!(f, "tail cell {} is not a body segment", coord)
            }
            SnakeError::Board(err) => write!(f, "board error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SnakeError {}

impl From<BoardError> for SnakeError {
    fn from(err: BoardError) -> Self {
        SnakeError::Board(err)
    }
}

/// The snake's head, tail, heading and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    head: Coord,
    tail: Coord,
    heading: Direction,
    length: u8,
    state: SnakeState,
}

impl Snake {
    /// Writes a fresh snake onto `board` and returns it.
    ///
    /// The snake lies along the top row from [`START_TAIL`], [`START_LENGTH`]
    /// cells long, facing [`START_HEADING`]. The caller clears the board first.
    ///
    /// # Errors
    /// * `Board` - The start position does not fit on the board
    pub fn spawn(board: &mut Board) -> Result<Self, SnakeError> {
        let mut segment = START_TAIL;
        for _ in 1..START_LENGTH {
            board.set_cell(segment, Cell::Body(START_HEADING))?;
            segment = segment.step(START_HEADING);
        }
        board.set_cell(segment, Cell::Head)?;

        Ok(Self {
            head: segment,
            tail: START_TAIL,
            heading: START_HEADING,
            length: START_LENGTH,
            state: SnakeState::Alive,
        })
    }

    /// Advances the snake one cell in `heading`.
    ///
    /// Off-board or occupied targets crash the snake without touching the
    /// board. Food grows the snake by leaving the tail in place; otherwise the
    /// tail follows the direction stored in its cell and the old tail cell is
    /// cleared.
    ///
    /// No reversal guard: heading straight back into the neck is a legal,
    /// fatal move.
    ///
    /// # Errors
    /// * `NotAlive` - The snake has already crashed
    /// * `BrokenChain` - The tail cell is not a body segment
    pub fn step(&mut self, board: &mut Board, heading: Direction) -> Result<StepOutcome, SnakeError> {
        if self.state != SnakeState::Alive {
            return Err(SnakeError::NotAlive);
        }

        let new_head = self.head.step(heading);

        let target = match board.get(new_head) {
            None => return Ok(self.crash(Collision::Wall)),
            Some(cell) => cell,
        };

        let outcome = match target {
            Cell::Empty => {
                let tail_direction = match board.cell_at(self.tail)? {
                    Cell::Body(direction) => direction,
                    // A length-1 snake's tail is its head, which becomes body below.
                    Cell::Head if self.length == 1 => heading,
                    _ => return Err(SnakeError::BrokenChain(self.tail)),
                };

                board.set_cell(self.head, Cell::Body(heading))?;
                board.set_cell(new_head, Cell::Head)?;

                let vacated = self.tail;
                board.set_cell(vacated, Cell::Empty)?;
                self.tail = vacated.step(tail_direction);

                StepOutcome::Moved { vacated }
            }
            Cell::Food => {
                board.set_cell(self.head, Cell::Body(heading))?;
                board.set_cell(new_head, Cell::Head)?;
                self.length = self.length.saturating_add(1);

                StepOutcome::AteFood
            }
            Cell::Head | Cell::Body(_) | Cell::Obstacle => {
                return Ok(self.crash(Collision::Occupied));
            }
        };

        self.head = new_head;
        self.heading = heading;
        Ok(outcome)
    }

    fn crash(&mut self, collision: Collision) -> StepOutcome {
        self.state = SnakeState::Crashed;
        StepOutcome::Crashed(collision)
    }

    /// Walks the body chain from tail to head, calling `visit` for every segment.
    ///
    /// Returns the number of segments visited, head included.
    ///
    /// # Errors
    /// * `BrokenChain` - A segment that should be body is not, or the walk does
    ///   not reach the head within `length` cells
    pub fn walk(&self, board: &Board, mut visit: impl FnMut(Coord, Cell)) -> Result<u8, SnakeError> {
        let mut coord = self.tail;

        for visited in 1..=self.length {
            let cell = board.cell_at(coord)?;
            visit(coord, cell);

            match cell {
                Cell::Head if coord == self.head => return Ok(visited),
                Cell::Body(direction) => coord = coord.step(direction),
                _ => return Err(SnakeError::BrokenChain(coord)),
            }
        }

        Err(SnakeError::BrokenChain(coord))
    }

    /// Returns the head coordinate.
    pub fn head(&self) -> Coord {
        self.head
    }

    /// Returns the tail coordinate.
    pub fn tail(&self) -> Coord {
        self.tail
    }

    /// Returns the direction of the last step.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the number of cells the snake occupies.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Returns the current state.
    pub fn state(&self) -> SnakeState {
        self.state
    }

    /// Returns true while the snake can move.
    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{COLS, ROWS};

    fn spawned() -> (Board, Snake) {
        let mut board = Board::new();
        let snake = Snake::spawn(&mut board).unwrap();
        (board, snake)
    }

    #[test]
    fn spawn_lays_out_start_position() {
        let (board, snake) = spawned();
        assert_eq!(snake.tail(), Coord::new(0, 0));
        assert_eq!(snake.head(), Coord::new(3, 0));
        assert_eq!(snake.heading(), Direction::Right);
        assert_eq!(snake.length(), 4);
        for x in 0..3 {
            assert_eq!(board.cell_at(Coord::new(x, 0)).unwrap(), Cell::Body(Direction::Right));
        }
        assert_eq!(board.cell_at(Coord::new(3, 0)).unwrap(), Cell::Head);
    }

    #[test]
    fn walk_reaches_head_in_length_cells() {
        let (board, snake) = spawned();
        let mut seen = 0;
        let visited = snake.walk(&board, |_, _| seen += 1).unwrap();
        assert_eq!(visited, 4);
        assert_eq!(seen, 4);
    }

    #[test]
    fn walk_detects_broken_chain() {
        let (mut board, snake) = spawned();
        board.set_cell(Coord::new(1, 0), Cell::Empty).unwrap();
        assert_eq!(
            snake.walk(&board, |_, _| {}),
            Err(SnakeError::BrokenChain(Coord::new(1, 0)))
        );
    }

    #[test]
    fn plain_move_retracts_tail() {
        let (mut board, mut snake) = spawned();
        let outcome = snake.step(&mut board, Direction::Down).unwrap();

        assert_eq!(outcome, StepOutcome::Moved { vacated: Coord::new(0, 0) });
        assert_eq!(snake.head(), Coord::new(3, 1));
        assert_eq!(snake.tail(), Coord::new(1, 0));
        assert_eq!(snake.heading(), Direction::Down);
        assert_eq!(board.cell_at(Coord::new(3, 0)).unwrap(), Cell::Body(Direction::Down));
        assert_eq!(board.cell_at(Coord::new(0, 0)).unwrap(), Cell::Empty);
        assert_eq!(snake.walk(&board, |_, _| {}).unwrap(), 4);
    }

    #[test]
    fn tail_follows_turns() {
        let (mut board, mut snake) = spawned();
        snake.step(&mut board, Direction::Down).unwrap();
        snake.step(&mut board, Direction::Down).unwrap();
        snake.step(&mut board, Direction::Left).unwrap();
        // Tail has walked along the top row and turned down at column 3.
        snake.step(&mut board, Direction::Left).unwrap();
        assert_eq!(snake.tail(), Coord::new(3, 1));
        assert_eq!(snake.head(), Coord::new(1, 2));
        assert_eq!(board.count(Cell::is_body), 3);
        assert_eq!(snake.walk(&board, |_, _| {}).unwrap(), 4);
    }

    #[test]
    fn eating_grows_without_moving_tail() {
        let (mut board, mut snake) = spawned();
        board.set_cell(Coord::new(4, 0), Cell::Food).unwrap();

        let outcome = snake.step(&mut board, Direction::Right).unwrap();

        assert_eq!(outcome, StepOutcome::AteFood);
        assert_eq!(snake.length(), 5);
        assert_eq!(snake.tail(), Coord::new(0, 0));
        assert_eq!(snake.head(), Coord::new(4, 0));
        assert_eq!(board.cell_at(Coord::new(3, 0)).unwrap(), Cell::Body(Direction::Right));
        assert_eq!(board.count(Cell::is_body), 4);
    }

    #[test]
    fn wall_hit_leaves_board_untouched() {
        let (mut board, mut snake) = spawned();
        let before = board.clone();

        let outcome = snake.step(&mut board, Direction::Up).unwrap();

        assert_eq!(outcome, StepOutcome::Crashed(Collision::Wall));
        assert_eq!(snake.state(), SnakeState::Crashed);
        assert_eq!(snake.head(), Coord::new(3, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn reversing_into_neck_is_fatal() {
        let (mut board, mut snake) = spawned();
        let outcome = snake.step(&mut board, Direction::Left).unwrap();
        assert_eq!(outcome, StepOutcome::Crashed(Collision::Occupied));
        assert!(!snake.is_alive());
    }

    #[test]
    fn obstacle_is_fatal() {
        let (mut board, mut snake) = spawned();
        board.set_cell(Coord::new(4, 0), Cell::Obstacle).unwrap();
        let before = board.clone();
        let outcome = snake.step(&mut board, Direction::Right).unwrap();
        assert_eq!(outcome, StepOutcome::Crashed(Collision::Occupied));
        assert_eq!(board, before);
    }

    #[test]
    fn step_after_crash_is_rejected() {
        let (mut board, mut snake) = spawned();
        snake.step(&mut board, Direction::Up).unwrap();
        assert_eq!(snake.step(&mut board, Direction::Right), Err(SnakeError::NotAlive));
    }

    #[test]
    fn running_the_full_width_hits_the_far_wall() {
        let (mut board, mut snake) = spawned();
        for _ in 0..(COLS - 4) {
            assert!(matches!(
                snake.step(&mut board, Direction::Right).unwrap(),
                StepOutcome::Moved { .. }
            ));
        }
        assert_eq!(snake.head(), Coord::new(COLS as i8 - 1, 0));
        let before = board.clone();
        assert_eq!(
            snake.step(&mut board, Direction::Right).unwrap(),
            StepOutcome::Crashed(Collision::Wall)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn bottom_wall() {
        let (mut board, mut snake) = spawned();
        for _ in 0..(ROWS - 1) {
            snake.step(&mut board, Direction::Down).unwrap();
        }
        let before = board.clone();
        assert_eq!(
            snake.step(&mut board, Direction::Down).unwrap(),
            StepOutcome::Crashed(Collision::Wall)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn left_wall_leaves_board_untouched() {
        let (mut board, mut snake) = spawned();
        snake.step(&mut board, Direction::Down).unwrap();
        for _ in 0..3 {
            assert!(matches!(
                snake.step(&mut board, Direction::Left).unwrap(),
                StepOutcome::Moved { .. }
            ));
        }
        assert_eq!(snake.head(), Coord::new(0, 1));
        let before = board.clone();

        assert_eq!(
            snake.step(&mut board, Direction::Left).unwrap(),
            StepOutcome::Crashed(Collision::Wall)
        );
        assert_eq!(snake.head(), Coord::new(0, 1));
        assert_eq!(board, before);
    }

    #[test]
    fn corrupted_tail_is_reported() {
        let (mut board, mut snake) = spawned();
        board.set_cell(Coord::new(0, 0), Cell::Food).unwrap();
        assert_eq!(
            snake.step(&mut board, Direction::Down),
            Err(SnakeError::BrokenChain(Coord::new(0, 0)))
        );
    }
}
