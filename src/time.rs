//! Timing abstractions for the control loop.

/// Nominal period of one control-loop tick, in milliseconds.
///
/// The step delay and debounce threshold are counted in ticks of this length.
pub const TICK_MS: u32 = 10;

/// Trait for blocking delays.
///
/// Used for the pause screen, the game-over screen and the growth animation.
/// These stall the whole control loop. No input is sampled while
/// a delay runs and it cannot be cancelled.
pub trait BusyDelay {
    /// Blocks for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
