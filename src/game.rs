//! Game state aggregate and per-tick game logic.
//!
//! [`GameState`] owns the board, the snake and the session counters. Its
//! [`tick`](GameState::tick) runs one pass of the control loop without touching
//! any hardware: restart and pause edge detection, direction input, the step
//! prescaler, scoring and the speed curve. What happened is returned as a
//! [`TickReport`] for the presentation layer to act on.

use crate::board::{Board, BoardError};
use crate::config::GameConfig;
use crate::input::{Button, ButtonSnapshot};
use crate::snake::{Collision, START_HEADING, Snake, SnakeError, StepOutcome};
use crate::types::{Coord, Direction};
use heapless::Vec;
use rand::Rng;

/// Upper bound on events a single tick can produce.
pub const MAX_EVENTS: usize = 6;

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameEvent {
    /// The restart button started a fresh round.
    Restarted,

    /// The pause button flipped the pause flag.
    PauseToggled {
        /// Pause flag after the toggle.
        paused: bool,
    },

    /// The snake moved onto an empty cell.
    Moved {
        /// The old tail cell, now empty.
        vacated: Coord,
    },

    /// The snake ate food.
    AteFood {
        /// Score after eating.
        score: u16,
    },

    /// The step delay dropped by one tick.
    SpeedUp {
        /// Step delay after the drop.
        step_delay: u8,
    },

    /// No empty cell was left for new food.
    BoardFull,

    /// The snake hit something and the round is over.
    Crashed(Collision),
}

/// Events produced by one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    events: Vec<GameEvent, MAX_EVENTS>,
    paused: bool,
}

impl TickReport {
    /// Returns the events in the order they happened.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Returns true if game logic was skipped because the game is paused.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Returns true if `event` happened this tick.
    pub fn contains(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }

    /// Returns the collision, if the snake crashed this tick.
    pub fn crash(&self) -> Option<Collision> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Crashed(collision) => Some(*collision),
            _ => None,
        })
    }

    fn push(&mut self, event: GameEvent) {
        if self.events.push(event).is_err() {
            warn!("tick event list full, dropping {:?}", event);
        }
    }
}

/// Errors that can occur while advancing the game.
///
/// Crashes are gameplay and never show up here; these are broken invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// A board operation failed.
    Board(BoardError),

    /// A snake operation failed.
    Snake(SnakeError),
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::Board(err) => write!(f, "board error: {}", err),
            GameError::Snake(err) => write!(f, "snake error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<SnakeError> for GameError {
    fn from(err: SnakeError) -> Self {
        GameError::Snake(err)
    }
}

/// Board, snake and session counters of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    snake: Snake,
    heading: Direction,
    score: u16,
    step_delay: u8,
    prescaler: u8,
    paused: bool,
    restart_held: bool,
    pause_held: bool,
}

impl GameState {
    /// Creates a game with a freshly laid out round.
    ///
    /// # Errors
    /// Only on broken invariants; see [`reset`](Self::reset).
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self, GameError> {
        let mut board = Board::new();
        let snake = Snake::spawn(&mut board)?;

        let mut state = Self {
            config,
            board,
            snake,
            heading: START_HEADING,
            score: 0,
            step_delay: config.initial_step_delay(),
            prescaler: 0,
            paused: false,
            restart_held: false,
            pause_held: false,
        };
        state.reset(rng)?;
        Ok(state)
    }

    /// Starts a new round: clears the board, spawns the snake at its start
    /// position, places food and obstacles, zeroes the score and restores the
    /// initial step delay.
    ///
    /// The pause flag and the button latches are left alone so a held restart
    /// button does not fire again on the next tick.
    ///
    /// # Errors
    /// Only if the start position does not fit the board or the fresh board
    /// has no room for food, neither of which happens on the fixed grid.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.board.reset();
        self.snake = Snake::spawn(&mut self.board)?;
        self.heading = self.snake.heading();

        let food = self.board.place_food(rng)?;
        let obstacles = self.board.place_obstacles(self.config.obstacle_count(), rng);

        self.score = 0;
        self.step_delay = self.config.initial_step_delay();
        self.prescaler = 0;

        debug!("round reset: food at {}, {} obstacles", food, obstacles);
        Ok(())
    }

    /// Runs one pass of the control loop.
    ///
    /// In order: a restart press starts a new round whatever the state; a pause
    /// press toggles pause; while paused nothing else happens. Otherwise, if
    /// the snake is alive, the first pressed direction (Left, Right, Up, Down)
    /// becomes the heading, the prescaler counts up, and once it reaches the
    /// step delay the snake takes one step.
    ///
    /// # Errors
    /// Only on broken invariants, e.g. a corrupted body chain.
    pub fn tick<R: Rng>(&mut self, buttons: ButtonSnapshot, rng: &mut R) -> Result<TickReport, GameError> {
        let mut report = TickReport::default();

        if buttons.is_pressed(Button::Restart) {
            if !self.restart_held {
                self.reset(rng)?;
                self.restart_held = true;
                info!("restart pressed");
                report.push(GameEvent::Restarted);
            }
        } else {
            self.restart_held = false;
        }

        if buttons.is_pressed(Button::Pause) {
            if !self.pause_held {
                self.paused = !self.paused;
                self.pause_held = true;
                info!("pause toggled: {}", self.paused);
                report.push(GameEvent::PauseToggled { paused: self.paused });
            }
        } else {
            self.pause_held = false;
        }

        if self.paused {
            report.paused = true;
            return Ok(report);
        }

        if !self.snake.is_alive() {
            return Ok(report);
        }

        if let Some(direction) = buttons.direction() {
            self.heading = direction;
        }

        self.prescaler = self.prescaler.saturating_add(1);
        if self.prescaler >= self.step_delay {
            self.prescaler = 0;
            self.advance(rng, &mut report)?;
        }

        Ok(report)
    }

    fn advance<R: Rng>(&mut self, rng: &mut R, report: &mut TickReport) -> Result<(), GameError> {
        match self.snake.step(&mut self.board, self.heading)? {
            StepOutcome::Moved { vacated } => {
                trace!("snake moved to {}", self.snake.head());
                report.push(GameEvent::Moved { vacated });
            }
            StepOutcome::AteFood => {
                self.score = self.score.saturating_add(self.config.food_score());
                report.push(GameEvent::AteFood { score: self.score });

                match self.board.place_food(rng) {
                    Ok(_) => {}
                    Err(BoardError::Full) => {
                        warn!("board full, no room for food");
                        report.push(GameEvent::BoardFull);
                    }
                    Err(err) => return Err(err.into()),
                }

                if self.score % self.config.speed_up_every() == 0
                    && self.step_delay > self.config.min_step_delay()
                {
                    self.step_delay -= 1;
                    debug!("speed up: step delay {}", self.step_delay);
                    report.push(GameEvent::SpeedUp {
                        step_delay: self.step_delay,
                    });
                }
            }
            StepOutcome::Crashed(collision) => {
                info!("crashed into {:?} with score {}", collision, self.score);
                report.push(GameEvent::Crashed(collision));
            }
        }

        Ok(())
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board for direct edits, e.g. to lay out a fixed scenario.
    ///
    /// Edits must keep the snake's body chain intact.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the snake.
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Returns the heading the next step will use.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the current score.
    pub fn score(&self) -> u16 {
        self.score
    }

    /// Returns the current ticks between steps.
    pub fn step_delay(&self) -> u8 {
        self.step_delay
    }

    /// Returns true while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once the snake has crashed and before the next reset.
    pub fn is_crashed(&self) -> bool {
        !self.snake.is_alive()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
