//! Shared test infrastructure for lcd-snake integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use lcd_snake::{
    BusyDelay, Buzzer, ButtonSnapshot, Cell, ChannelId, CharDisplay, COLS, Coord, GameConfig,
    GameSession, GameState, Glyph, HighScoreStore, InputPins, ROWS, TickReport,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

// ============================================================================
// Mock Display
// ============================================================================

/// One recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Cursor(u8, u8),
    Text(heapless::String<32>),
    Number(u16),
    DefineGlyph(u8, Glyph),
    DrawGlyph(u8),
}

/// Mock display that records every call for testing
pub struct MockDisplay {
    ops: heapless::Vec<DisplayOp, 512>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            ops: heapless::Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    pub fn count(&self, op: &DisplayOp) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    /// True if `text` was printed right after the cursor moved to `col`, `row`
    pub fn printed_at(&self, col: u8, row: u8, text: &str) -> bool {
        self.ops.windows(2).any(|pair| {
            pair[0] == DisplayOp::Cursor(col, row) && pair[1] == text_op(text)
        })
    }

    /// True if `number` was printed right after `label`
    pub fn printed_number_after(&self, label: &str, number: u16) -> bool {
        self.ops
            .windows(2)
            .any(|pair| pair[0] == text_op(label) && pair[1] == DisplayOp::Number(number))
    }

    pub fn printed(&self, text: &str) -> bool {
        self.ops.contains(&text_op(text))
    }
}

pub fn text_op(text: &str) -> DisplayOp {
    let mut s = heapless::String::new();
    let _ = s.push_str(text);
    DisplayOp::Text(s)
}

impl CharDisplay for MockDisplay {
    fn clear(&mut self) {
        let _ = self.ops.push(DisplayOp::Clear);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let _ = self.ops.push(DisplayOp::Cursor(col, row));
    }

    fn print_text(&mut self, text: &str) {
        let _ = self.ops.push(text_op(text));
    }

    fn print_number(&mut self, value: u16) {
        let _ = self.ops.push(DisplayOp::Number(value));
    }

    fn define_glyph(&mut self, id: u8, pattern: &Glyph) {
        let _ = self.ops.push(DisplayOp::DefineGlyph(id, *pattern));
    }

    fn draw_custom_char(&mut self, id: u8) {
        let _ = self.ops.push(DisplayOp::DrawGlyph(id));
    }
}

// ============================================================================
// Mock Buzzer, Store and Delay
// ============================================================================

/// Mock buzzer that records (frequency, duration) pairs
pub struct MockBuzzer {
    tones: heapless::Vec<(u16, u16), 32>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self {
            tones: heapless::Vec::new(),
        }
    }

    pub fn tones(&self) -> &[(u16, u16)] {
        &self.tones
    }
}

impl Buzzer for MockBuzzer {
    fn play_tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        let _ = self.tones.push((frequency_hz, duration_ms));
    }
}

/// Mock high-score store holding a single value
pub struct MockStore {
    pub stored: u16,
    pub saves: heapless::Vec<u16, 32>,
}

impl MockStore {
    pub fn with_score(stored: u16) -> Self {
        Self {
            stored,
            saves: heapless::Vec::new(),
        }
    }
}

impl HighScoreStore for MockStore {
    fn load_high_score(&mut self) -> u16 {
        self.stored
    }

    fn save_high_score(&mut self, score: u16) {
        let _ = self.saves.push(score);
        self.stored = score;
    }
}

/// Mock delay that only adds up the requested time
pub struct MockDelay {
    pub total_ms: u32,
    pub calls: heapless::Vec<u32, 64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            total_ms: 0,
            calls: heapless::Vec::new(),
        }
    }
}

impl BusyDelay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        let _ = self.calls.push(ms);
    }
}

// ============================================================================
// Mock Input Pins
// ============================================================================

/// Input pins whose levels the test sets directly
pub struct MockPins {
    pub levels: [bool; 6],
}

impl MockPins {
    pub fn new() -> Self {
        Self { levels: [false; 6] }
    }

    pub fn set(&mut self, channel: usize, level: bool) {
        self.levels[channel] = level;
    }
}

impl InputPins for MockPins {
    fn raw_level(&mut self, channel: ChannelId) -> bool {
        self.levels[channel.0]
    }
}

// ============================================================================
// Game Helpers
// ============================================================================

pub type TestSession = GameSession<SmallRng, MockDisplay, MockBuzzer, MockStore, MockDelay>;

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

pub fn new_game(config: GameConfig, seed: u64) -> (GameState, SmallRng) {
    let mut rng = rng(seed);
    let game = GameState::new(config, &mut rng).unwrap();
    (game, rng)
}

pub fn new_session(config: GameConfig, high_score: u16) -> TestSession {
    GameSession::new(
        config,
        rng(7),
        MockDisplay::new(),
        MockBuzzer::new(),
        MockStore::with_score(high_score),
        MockDelay::new(),
    )
    .unwrap()
}

/// Removes all food and obstacles so a scenario can lay out its own
pub fn clear_items(game: &mut GameState) {
    for y in 0..ROWS as i8 {
        for x in 0..COLS as i8 {
            let coord = Coord::new(x, y);
            if matches!(game.board().cell_at(coord).unwrap(), Cell::Food | Cell::Obstacle) {
                game.board_mut().set_cell(coord, Cell::Empty).unwrap();
            }
        }
    }
}

/// Clears the board of items and puts a single food at `food`
pub fn lay_out(game: &mut GameState, food: Coord) {
    clear_items(game);
    game.board_mut().set_cell(food, Cell::Food).unwrap();
}

/// Ticks with `buttons` held until the snake steps, returning that tick's report
pub fn tick_until_step(game: &mut GameState, rng: &mut SmallRng, buttons: ButtonSnapshot) -> TickReport {
    for _ in 0..=u8::MAX as usize {
        let report = game.tick(buttons, rng).unwrap();
        let stepped = report.events().iter().any(|e| {
            matches!(
                e,
                lcd_snake::GameEvent::Moved { .. }
                    | lcd_snake::GameEvent::AteFood { .. }
                    | lcd_snake::GameEvent::Crashed(_)
            )
        });
        if stepped {
            return report;
        }
    }
    panic!("snake never stepped");
}

/// Ticks a session with `buttons` held until the snake steps
pub fn session_until_step(session: &mut TestSession, buttons: ButtonSnapshot) -> TickReport {
    for _ in 0..=u8::MAX as usize {
        let report = session.update(buttons).unwrap();
        let stepped = report.events().iter().any(|e| {
            matches!(
                e,
                lcd_snake::GameEvent::Moved { .. }
                    | lcd_snake::GameEvent::AteFood { .. }
                    | lcd_snake::GameEvent::Crashed(_)
            )
        });
        if stepped {
            return report;
        }
    }
    panic!("snake never stepped");
}

pub fn body_cells(game: &GameState) -> usize {
    game.board().count(|c| c.is_body())
}

pub fn head_cells(game: &GameState) -> usize {
    game.board().count(|c| c == Cell::Head)
}

pub fn food_cells(game: &GameState) -> usize {
    game.board().count(|c| c == Cell::Food)
}
