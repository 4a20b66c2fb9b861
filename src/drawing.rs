//! Drawing of grid lines and numbered cell labels onto an RGBA canvas.
//!
//! Every write replaces the pixel (no alpha blending) and is clipped to the
//! canvas. Nothing here can fail.
//!
//! # Examples
//!
//! ```rust
//! use grid_overlay::{drawing::*, GridLayout, GridOverlayConfig};
//! use image::{Rgba, RgbaImage};
//!
//! let config = GridOverlayConfig::default();
//! let mut canvas = RgbaImage::from_pixel(300, 200, Rgba([255, 255, 255, 255]));
//!
//! let layout = GridLayout::new(canvas.width(), config.cell_size);
//! layout.draw(&mut canvas, &config);
//! for cell in layout.cells(canvas.height()) {
//!     cell.draw(&mut canvas, &config);
//! }
//!
//! assert_eq!(*canvas.get_pixel(100, 0), config.grid_color);
//! ```

use std::num::NonZeroU32;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use smallvec::SmallVec;
use tracing::*;

use crate::glyph::{digit_glyph, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::layout::{Cell, GridLayout};
use crate::GridOverlayConfig;

/// Glyphs of one label. A `u64` has at most 20 decimal digits.
type LabelGlyphs = SmallVec<[&'static Glyph; 20]>;

/// Trait for things that can be drawn onto the overlay canvas.
pub trait Drawable {
    /// Draws the object onto `canvas` using the colors and sizes in `config`.
    fn draw(&self, canvas: &mut RgbaImage, config: &GridOverlayConfig);
}

/// Draws the grid lines.
///
/// A vertical line sits at every positive multiple `x` of the cell size inside
/// the canvas, as a band `line_width` pixels wide covering `x - line_width + 1`
/// up to `x`. Horizontal lines extend upward the same way.
impl Drawable for GridLayout {
    fn draw(&self, canvas: &mut RgbaImage, config: &GridOverlayConfig) {
        let (width, height) = canvas.dimensions();
        let step = self.cell_size().get() as usize;
        let line_width = i64::from(config.line_width);
        if line_width == 0 {
            trace!("Line width is 0, skipping grid lines");
            return;
        }

        // Vertical lines
        for x in (step as u64..u64::from(width)).step_by(step) {
            let x = x as i64;
            trace!("Drawing vertical line at x={}", x);
            fill_clipped(
                canvas,
                x - line_width + 1,
                0,
                line_width,
                i64::from(height),
                config.grid_color,
            );
        }

        // Horizontal lines
        for y in (step as u64..u64::from(height)).step_by(step) {
            let y = y as i64;
            trace!("Drawing horizontal line at y={}", y);
            fill_clipped(
                canvas,
                0,
                y - line_width + 1,
                i64::from(width),
                line_width,
                config.grid_color,
            );
        }
    }
}

/// Draws the cell's number at its center, unless the center is off the canvas.
impl Drawable for Cell {
    fn draw(&self, canvas: &mut RgbaImage, config: &GridOverlayConfig) {
        let (width, height) = canvas.dimensions();
        if !(0..i64::from(width)).contains(&self.center_x)
            || !(0..i64::from(height)).contains(&self.center_y)
        {
            trace!(
                "Skipping label {} centered outside the canvas at ({}, {})",
                self.index,
                self.center_x,
                self.center_y
            );
            return;
        }
        Label::new(self.index, self.center_x, self.center_y).draw(canvas, config);
    }
}

/// A number drawn in the 5x7 digit font on a filled box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub number: u64,
    pub center_x: i64,
    pub center_y: i64,
}

/// Rectangle covered by a label, background included. May extend past the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelBounds {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl Label {
    pub fn new(number: u64, center_x: i64, center_y: i64) -> Self {
        Self {
            number,
            center_x,
            center_y,
        }
    }

    /// Computes the label box for the given glyph magnification.
    ///
    /// Digits are `5 * scale` wide and `7 * scale` tall, separated by
    /// `2 * scale` and surrounded by `2 * scale` of padding. The box is centered
    /// on the label's center, rounding toward the top-left.
    ///
    /// # Example
    /// ```
    /// use grid_overlay::drawing::{Label, LabelBounds};
    /// use std::num::NonZeroU32;
    ///
    /// let bounds = Label::new(12, 50, 50).bounds(NonZeroU32::new(3).unwrap());
    /// assert_eq!(
    ///     bounds,
    ///     LabelBounds { left: 26, top: 34, width: 48, height: 33 }
    /// );
    /// ```
    pub fn bounds(&self, scale: NonZeroU32) -> LabelBounds {
        let scale = i64::from(scale.get());
        let digits = digit_count(self.number);
        let (digit_width, digit_height) = glyph_size(scale);
        let spacing = 2 * scale;
        let padding = 2 * scale;

        let width = digits * digit_width + (digits - 1) * spacing + 2 * padding;
        let height = digit_height + 2 * padding;
        LabelBounds {
            left: self.center_x.saturating_sub(width / 2),
            top: self.center_y.saturating_sub(height / 2),
            width,
            height,
        }
    }

    fn glyphs(&self) -> LabelGlyphs {
        self.number.to_string().chars().filter_map(digit_glyph).collect()
    }
}

impl Drawable for Label {
    fn draw(&self, canvas: &mut RgbaImage, config: &GridOverlayConfig) {
        let bounds = self.bounds(config.number_scale);
        fill_clipped(
            canvas,
            bounds.left,
            bounds.top,
            bounds.width,
            bounds.height,
            config.number_background,
        );

        let scale = i64::from(config.number_scale.get());
        let (digit_width, _) = glyph_size(scale);
        let padding = 2 * scale;
        let advance = digit_width + 2 * scale;
        for (i, glyph) in self.glyphs().iter().enumerate() {
            let digit_left = bounds.left.saturating_add(padding + i as i64 * advance);
            let digit_top = bounds.top.saturating_add(padding);
            for (column, row) in glyph.lit_cells() {
                fill_clipped(
                    canvas,
                    digit_left.saturating_add(i64::from(column) * scale),
                    digit_top.saturating_add(i64::from(row) * scale),
                    scale,
                    scale,
                    config.number_color,
                );
            }
        }
    }
}

fn glyph_size(scale: i64) -> (i64, i64) {
    (i64::from(GLYPH_WIDTH) * scale, i64::from(GLYPH_HEIGHT) * scale)
}

fn digit_count(number: u64) -> i64 {
    number.checked_ilog10().map_or(1, |log| i64::from(log) + 1)
}

/// Fills a rectangle with `color`, skipping whatever part lies off the canvas.
fn fill_clipped(
    canvas: &mut RgbaImage,
    left: i64,
    top: i64,
    width: i64,
    height: i64,
    color: Rgba<u8>,
) {
    let (canvas_width, canvas_height) = canvas.dimensions();
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = left.saturating_add(width).min(i64::from(canvas_width));
    let y1 = top.saturating_add(height).min(i64::from(canvas_height));
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let (Ok(x), Ok(y), Ok(w), Ok(h)) = (
        i32::try_from(x0),
        i32::try_from(y0),
        u32::try_from(x1 - x0),
        u32::try_from(y1 - y0),
    ) else {
        return;
    };
    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w, h), color);
}
