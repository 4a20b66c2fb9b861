//! Fixed 5x7 bitmap glyphs for the decimal digits used in cell labels.

/// Width of every glyph, in glyph cells.
pub const GLYPH_WIDTH: u32 = 5;
/// Height of every glyph, in glyph cells.
pub const GLYPH_HEIGHT: u32 = 7;

/// A 5x7 bitmap. Each row is stored as five bits, most significant bit on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph([u8; GLYPH_HEIGHT as usize]);

impl Glyph {
    /// Returns `true` if the glyph cell at (`column`, `row`) is lit.
    ///
    /// Coordinates outside the 5x7 bitmap are never lit.
    ///
    /// # Example
    /// ```
    /// use grid_overlay::glyph::digit_glyph;
    ///
    /// let one = digit_glyph('1').unwrap();
    /// assert!(one.is_lit(2, 0));
    /// assert!(!one.is_lit(0, 0));
    /// assert!(!one.is_lit(5, 0));
    /// ```
    pub fn is_lit(&self, column: u32, row: u32) -> bool {
        if column >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        (self.0[row as usize] >> (GLYPH_WIDTH - 1 - column)) & 1 == 1
    }

    /// Iterates over the lit cells as `(column, row)` pairs, row by row.
    pub fn lit_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..GLYPH_HEIGHT).flat_map(move |row| {
            (0..GLYPH_WIDTH)
                .filter(move |&column| self.is_lit(column, row))
                .map(move |column| (column, row))
        })
    }
}

#[rustfmt::skip]
static DIGIT_GLYPHS: [Glyph; 10] = [
    Glyph([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]), // 0
    Glyph([0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111]), // 1
    Glyph([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]), // 2
    Glyph([0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110]), // 3
    Glyph([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]), // 4
    Glyph([0b11111, 0b10000, 0b10000, 0b11110, 0b00001, 0b10001, 0b01110]), // 5
    Glyph([0b01110, 0b10001, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]), // 6
    Glyph([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]), // 7
    Glyph([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]), // 8
    Glyph([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b10001, 0b01110]), // 9
];

/// Returns the glyph for a decimal digit, or `None` for any other character.
///
/// # Example
/// ```
/// use grid_overlay::glyph::digit_glyph;
///
/// assert!(digit_glyph('7').is_some());
/// assert!(digit_glyph('-').is_none());
/// ```
pub fn digit_glyph(digit: char) -> Option<&'static Glyph> {
    digit
        .to_digit(10)
        .and_then(|value| DIGIT_GLYPHS.get(value as usize))
}
