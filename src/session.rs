//! Game session: the game state wired to display, buzzer, high-score storage
//! and delays.
//!
//! Provides [`GameSession`], which runs [`GameState::tick`] and turns the
//! resulting events into screens and sounds. Also defines the [`Buzzer`] and
//! [`HighScoreStore`] traits for hardware abstraction.

use crate::config::GameConfig;
use crate::debounce::InputPins;
use crate::display::{self, CharDisplay};
use crate::game::{GameError, GameEvent, GameState, TickReport};
use crate::input::{ButtonSnapshot, Buttons};
use crate::time::BusyDelay;
use rand::Rng;

/// Trait for abstracting tone hardware.
pub trait Buzzer {
    /// Starts a tone and returns without waiting for it to finish.
    fn play_tone(&mut self, frequency_hz: u16, duration_ms: u16);
}

/// Trait for abstracting persistent high-score storage.
///
/// Implementations decide whether a save actually writes, e.g. by skipping
/// writes of an unchanged value to spare EEPROM wear. Handle storage errors
/// internally - these methods cannot fail.
pub trait HighScoreStore {
    /// Returns the stored high score.
    fn load_high_score(&mut self) -> u16;

    /// Stores `score` as the high score.
    fn save_high_score(&mut self, score: u16);
}

/// The current state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// The snake is moving.
    Playing,
    /// Game logic is frozen until pause is pressed again.
    Paused,
    /// The snake crashed. Only lasts past the crash tick when auto restart is off.
    GameOver,
}

/// Runs the game against display, buzzer, storage and delay hardware.
///
/// The session owns its peripherals and the random number generator. The
/// host loop samples the buttons and calls [`update`](Self::update) once per
/// tick, forever.
///
/// # Type Parameters
/// * `R` - Random number generator
/// * `D` - Display implementation type
/// * `B` - Buzzer implementation type
/// * `S` - High-score storage implementation type
/// * `T` - Delay implementation type
pub struct GameSession<R, D, B, S, T> {
    game: GameState,
    rng: R,
    display: D,
    buzzer: B,
    store: S,
    delay: T,
    high_score: u16,
}

impl<R, D, B, S, T> GameSession<R, D, B, S, T>
where
    R: Rng,
    D: CharDisplay,
    B: Buzzer,
    S: HighScoreStore,
    T: BusyDelay,
{
    /// Boots the game: uploads the glyph set, shows the title screen, lays
    /// out the first round and loads the high score.
    ///
    /// # Errors
    /// Only on broken invariants; see [`GameState::new`].
    pub fn new(
        config: GameConfig,
        mut rng: R,
        mut display: D,
        buzzer: B,
        mut store: S,
        delay: T,
    ) -> Result<Self, GameError> {
        display::upload_static_glyphs(&mut display);
        display.clear();
        display.print_text("Snake game");
        display.set_cursor(0, 1);
        display.print_text("Press any key");

        let game = GameState::new(config, &mut rng)?;
        let high_score = store.load_high_score();
        info!("snake booted, high score {}", high_score);

        Ok(Self {
            game,
            rng,
            display,
            buzzer,
            store,
            delay,
            high_score,
        })
    }

    /// Samples `buttons` from `pins` and runs one tick.
    ///
    /// # Errors
    /// Only on broken invariants; see [`update`](Self::update).
    pub fn poll<P: InputPins>(&mut self, buttons: &mut Buttons, pins: &mut P) -> Result<TickReport, GameError> {
        buttons.sample(pins);
        self.update(buttons.snapshot())
    }

    /// Runs one tick with the given debounced button state and presents the
    /// outcome.
    ///
    /// Eating plays the eat tone, flashes the growth animation and prints the
    /// score. A crash shows the game-over screen, updates and saves the high
    /// score and, with auto restart on, starts the next round. A paused tick
    /// shows the pause screen. Animations and screens block for their
    /// configured time.
    ///
    /// # Errors
    /// Only on broken invariants, e.g. a corrupted body chain.
    pub fn update(&mut self, buttons: ButtonSnapshot) -> Result<TickReport, GameError> {
        let report = self.game.tick(buttons, &mut self.rng)?;

        for event in report.events() {
            match *event {
                GameEvent::Restarted => self.display.clear(),
                GameEvent::AteFood { score } => self.present_food(score),
                GameEvent::Crashed(_) => self.game_over()?,
                GameEvent::PauseToggled { .. }
                | GameEvent::Moved { .. }
                | GameEvent::SpeedUp { .. }
                | GameEvent::BoardFull => {}
            }
        }

        if report.paused() {
            self.show_pause_screen();
        }

        Ok(report)
    }

    /// Draws the board on the display.
    ///
    /// The session never calls this itself; the host decides when to redraw.
    /// Returns the number of glyph slots used.
    pub fn render_board(&mut self) -> usize {
        display::render_board(&mut self.display, self.game.board())
    }

    fn present_food(&mut self, score: u16) {
        let config = *self.game.config();

        let tone = config.eat_tone();
        self.buzzer.play_tone(tone.frequency_hz, tone.duration_ms);

        // render_board may have reassigned slot 0.
        self.display.define_glyph(0, &display::STATIC_GLYPHS[0]);
        for _ in 0..config.growth_flashes() {
            self.display.draw_custom_char(0);
            self.delay.delay_ms(config.growth_flash_ms());
            self.display.clear();
            self.delay.delay_ms(config.growth_flash_ms());
        }

        self.display.set_cursor(0, 3);
        self.display.print_text("Score: ");
        self.display.print_number(score);
    }

    fn game_over(&mut self) -> Result<(), GameError> {
        let config = *self.game.config();
        let score = self.game.score();

        let tone = config.crash_tone();
        self.buzzer.play_tone(tone.frequency_hz, tone.duration_ms);

        self.display.clear();
        self.display.set_cursor(5, 1);
        self.display.print_text("Game Over");
        self.display.set_cursor(4, 2);
        self.display.print_text("Score: ");
        self.display.print_number(score);

        if score > self.high_score {
            info!("new high score {}", score);
            self.high_score = score;
        }
        self.store.save_high_score(self.high_score);

        self.display.set_cursor(10, 3);
        self.display.print_text("Hi: ");
        self.display.print_number(self.high_score);

        self.delay.delay_ms(config.game_over_ms());

        if config.auto_restart() {
            self.game.reset(&mut self.rng)?;
            self.display.clear();
        }

        Ok(())
    }

    fn show_pause_screen(&mut self) {
        self.display.clear();
        self.display.set_cursor(5, 1);
        self.display.print_text("Paused");
        self.delay.delay_ms(self.game.config().pause_screen_ms());
    }

    /// Returns the current session state.
    pub fn state(&self) -> SessionState {
        if self.game.is_paused() {
            SessionState::Paused
        } else if self.game.is_crashed() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        }
    }

    /// Returns the game state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Returns the game state for direct edits, e.g. to lay out a fixed scenario.
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    /// Returns the best score seen so far, stored or played.
    pub fn high_score(&self) -> u16 {
        self.high_score
    }

    /// Returns the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the buzzer.
    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    /// Returns the high-score store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the delay provider.
    pub fn delay(&self) -> &T {
        &self.delay
    }
}
