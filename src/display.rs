//! Character display abstraction, custom glyphs and board rendering.
//!
//! A custom character on an HD44780-style display is 5x8 pixels, one byte
//! per pixel row. Each glyph here stacks two 4-row sub-glyphs, so one display
//! character shows two board cells on top of each other and the 4-row board
//! fits in the top two display rows, leaving the bottom rows for text.

use crate::board::{Board, COLS, ROWS};
use crate::types::{Cell, Coord};
use heapless::Vec;

/// Pixel rows of one custom character.
pub type Glyph = [u8; 8];

/// Pixel rows of one half-height sub-glyph.
pub type SubGlyph = [u8; 4];

/// Number of custom character slots on the display.
pub const GLYPH_SLOTS: usize = 8;

/// Sub-glyph for the snake's head.
pub const HEAD: SubGlyph = [15, 21, 21, 30];

/// Sub-glyph for a body segment.
pub const BODY: SubGlyph = [15, 31, 31, 30];

/// Sub-glyph for food.
pub const FOOD: SubGlyph = [10, 21, 17, 14];

/// Sub-glyph for an obstacle.
pub const OBSTACLE: SubGlyph = [31, 17, 17, 31];

/// Blank sub-glyph.
pub const NONE: SubGlyph = [0, 0, 0, 0];

/// Glyph set uploaded at boot, by slot: body/body, body/none, none/body,
/// head/none, food/none, none/food.
pub const STATIC_GLYPHS: [Glyph; 6] = [
    stack(BODY, BODY),
    stack(BODY, NONE),
    stack(NONE, BODY),
    stack(HEAD, NONE),
    stack(FOOD, NONE),
    stack(NONE, FOOD),
];

/// Character printed when a cell pair cannot get a glyph slot.
const OVERFLOW_TEXT: &str = "#";

/// Trait for abstracting character display hardware.
///
/// Implement this for your LCD driver. Handle any bus errors internally -
/// these methods cannot fail.
pub trait CharDisplay {
    /// Clears the display and homes the cursor.
    fn clear(&mut self);

    /// Moves the cursor to `col`, `row`.
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Prints text at the cursor.
    fn print_text(&mut self, text: &str);

    /// Prints a decimal number at the cursor.
    fn print_number(&mut self, value: u16);

    /// Uploads the pixel rows of custom character `id`.
    fn define_glyph(&mut self, id: u8, pattern: &Glyph);

    /// Prints custom character `id` at the cursor.
    fn draw_custom_char(&mut self, id: u8);
}

/// Stacks two sub-glyphs into one glyph, `top` above `bottom`.
pub const fn stack(top: SubGlyph, bottom: SubGlyph) -> Glyph {
    [
        top[0], top[1], top[2], top[3], bottom[0], bottom[1], bottom[2], bottom[3],
    ]
}

/// Returns the sub-glyph drawn for `cell`.
pub const fn sub_glyph(cell: Cell) -> SubGlyph {
    match cell {
        Cell::Empty => NONE,
        Cell::Head => HEAD,
        Cell::Food => FOOD,
        Cell::Obstacle => OBSTACLE,
        Cell::Body(_) => BODY,
    }
}

/// Uploads [`STATIC_GLYPHS`] into slots 0 to 5.
pub fn upload_static_glyphs<D: CharDisplay>(display: &mut D) {
    for (id, glyph) in STATIC_GLYPHS.iter().enumerate() {
        display.define_glyph(id as u8, glyph);
    }
}

/// Draws the whole board.
///
/// Board rows `2k` and `2k + 1` share display row `k`. Glyph slots are handed
/// out afresh for every call, in the order distinct cell pairs are met, so the
/// static set from [`upload_static_glyphs`] is overwritten. Pairs that find no
/// free slot are printed as `#`.
///
/// # Returns
/// The number of glyph slots used.
pub fn render_board<D: CharDisplay>(display: &mut D, board: &Board) -> usize {
    let mut slots: Vec<Glyph, GLYPH_SLOTS> = Vec::new();

    for lcd_row in 0..ROWS.div_ceil(2) {
        for col in 0..COLS {
            let top = cell_or_empty(board, col, lcd_row * 2);
            let bottom = cell_or_empty(board, col, lcd_row * 2 + 1);

            display.set_cursor(col as u8, lcd_row as u8);

            if top.is_empty() && bottom.is_empty() {
                display.print_text(" ");
                continue;
            }

            let glyph = stack(sub_glyph(top), sub_glyph(bottom));
            match slot_for(display, &mut slots, glyph) {
                Some(id) => display.draw_custom_char(id),
                None => display.print_text(OVERFLOW_TEXT),
            }
        }
    }

    slots.len()
}

fn cell_or_empty(board: &Board, col: usize, row: usize) -> Cell {
    board.get(Coord::new(col as i8, row as i8)).unwrap_or(Cell::Empty)
}

fn slot_for<D: CharDisplay>(display: &mut D, slots: &mut Vec<Glyph, GLYPH_SLOTS>, glyph: Glyph) -> Option<u8> {
    if let Some(id) = slots.iter().position(|g| *g == glyph) {
        return Some(id as u8);
    }

    let id = slots.len() as u8;
    slots.push(glyph).ok()?;
    display.define_glyph(id, &glyph);
    Some(id)
}
