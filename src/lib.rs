#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Board`**: Fixed 4x20 grid of `Cell`s; also the snake's only position list
//! - **`Snake`**: Head, tail, heading and length; moves one cell per step
//! - **`GameState`**: Board, snake, score, speed, pause and restart handling for one game
//! - **`GameSession`**: Runs a `GameState` against display, buzzer, storage and delay hardware
//! - **`Debouncer`**: Turns bouncing raw input levels into stable per-channel levels
//! - **`Buttons`**: The six game buttons on top of a `Debouncer`
//! - **`GameConfig`**: Speed curve, scoring, obstacles and presentation timing
//! - **`CharDisplay`**, **`Buzzer`**, **`HighScoreStore`**, **`InputPins`**, **`BusyDelay`**:
//!   Traits to implement for your hardware
//!
//! Everything runs from a single loop: sample the buttons, call
//! `GameSession::update`, repeat. Nothing allocates.

#[macro_use]
mod fmt;

pub mod board;
pub mod config;
pub mod debounce;
pub mod display;
pub mod game;
pub mod input;
pub mod session;
pub mod snake;
pub mod time;
pub mod types;

pub use board::{Board, BoardError, COLS, ROWS};
pub use config::{ConfigError, GameConfig, GameConfigBuilder, Tone};
pub use debounce::{ChannelId, DebounceError, Debouncer, Edge, InputPins};
pub use display::{CharDisplay, Glyph};
pub use game::{GameError, GameEvent, GameState, TickReport};
pub use input::{Button, ButtonSnapshot, Buttons, Polarity};
pub use session::{Buzzer, GameSession, HighScoreStore, SessionState};
pub use snake::{Collision, Snake, SnakeError, SnakeState, StepOutcome};
pub use time::{BusyDelay, TICK_MS};
pub use types::{Cell, Coord, Direction};
