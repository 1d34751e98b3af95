//! Game buttons on top of the generic debouncer.

use crate::debounce::{ChannelId, DebounceError, Debouncer, InputPins};
use crate::types::Direction;

/// Number of game buttons.
pub const BUTTON_COUNT: usize = 6;

/// A game button. The discriminant is the debouncer channel it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Turn left.
    Left = 0,

    /// Turn right.
    Right = 1,

    /// Turn up.
    Up = 2,

    /// Turn down.
    Down = 3,

    /// Toggle pause.
    Pause = 4,

    /// Start a new round.
    Restart = 5,
}

impl Button {
    /// All buttons in channel order.
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Pause,
        Button::Restart,
    ];

    /// Returns the debouncer channel this button is wired to.
    #[inline]
    pub const fn channel(self) -> ChannelId {
        ChannelId(self as usize)
    }
}

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// A high level means pressed.
    #[default]
    ActiveHigh,

    /// A low level means pressed, as with pull-up buttons to ground.
    ActiveLow,
}

/// Debounced pressed/released state of every button for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot {
    pressed: [bool; BUTTON_COUNT],
}

impl ButtonSnapshot {
    /// A snapshot with no button pressed.
    pub const NONE: Self = Self {
        pressed: [false; BUTTON_COUNT],
    };

    /// Returns a copy with `button` marked pressed.
    pub const fn with(mut self, button: Button) -> Self {
        self.pressed[button as usize] = true;
        self
    }

    /// Returns true if `button` is held down.
    #[inline]
    pub const fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button as usize]
    }

    /// Returns the requested direction, checking Left, Right, Up, Down in that
    /// order. The first pressed one wins; `None` keeps the current heading.
    pub fn direction(&self) -> Option<Direction> {
        Direction::PRIORITY
            .into_iter()
            .find(|&dir| self.is_pressed(direction_button(dir)))
    }
}

const fn direction_button(direction: Direction) -> Button {
    match direction {
        Direction::Left => Button::Left,
        Direction::Right => Button::Right,
        Direction::Up => Button::Up,
        Direction::Down => Button::Down,
    }
}

/// The six game buttons behind one debouncer.
#[derive(Debug, Clone)]
pub struct Buttons {
    debouncer: Debouncer<BUTTON_COUNT>,
    polarity: Polarity,
}

impl Buttons {
    /// Creates the button set.
    ///
    /// # Errors
    /// * `ZeroThreshold` - `threshold` is zero
    pub fn new(threshold: u8, polarity: Polarity) -> Result<Self, DebounceError> {
        Ok(Self {
            debouncer: Debouncer::new(threshold)?,
            polarity,
        })
    }

    /// Samples every button once. Call on every tick before reading a snapshot.
    pub fn sample<P: InputPins>(&mut self, pins: &mut P) {
        match self.polarity {
            Polarity::ActiveHigh => self.debouncer.sample_all(pins),
            Polarity::ActiveLow => self.debouncer.sample_all(&mut Inverted(pins)),
        }
    }

    /// Returns the debounced state of all buttons.
    pub fn snapshot(&self) -> ButtonSnapshot {
        ButtonSnapshot {
            pressed: self.debouncer.levels(),
        }
    }

    /// Returns the debounced state of one button.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.snapshot().is_pressed(button)
    }
}

struct Inverted<'p, P>(&'p mut P);

impl<P: InputPins> InputPins for Inverted<'_, P> {
    fn raw_level(&mut self, channel: ChannelId) -> bool {
        !self.0.raw_level(channel)
    }
}
