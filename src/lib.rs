//! This crate overlays a numbered coordinate grid on raster images and converts
//! between cell numbers and pixel coordinates.
//! It uses the `image` and `imageproc` crates for pixel buffers, drawing and PNG encoding.
//!
//! Cells are square, `cell_size` pixels on a side, and numbered row-major from
//! the top-left starting at 0. Each cell gets its number drawn at its center in
//! a small bitmap font.
//!
//! # Example
//! ```
//! use grid_overlay::{cell_to_pixel, pixel_to_cell, render_grid, GridOverlayConfig};
//! use image::{Rgba, RgbaImage};
//!
//! let img = RgbaImage::from_pixel(600, 400, Rgba([40, 80, 120, 255]));
//! let config = GridOverlayConfig::default();
//! let png: Vec<u8> = render_grid(&img, &config).unwrap();
//! assert!(!png.is_empty());
//!
//! // Cell 7 is the second cell of the second row on a 600px wide image.
//! let (x, y) = cell_to_pixel(7, 600, config.cell_size).unwrap();
//! assert_eq!((x, y), (150, 150));
//! assert_eq!(pixel_to_cell(x, y, 600, config.cell_size), 7);
//! ```

mod config;
/// This module provides the `Drawable` trait and the drawing of grid lines and labels.
///
/// # Examples
///
/// ```rust
/// use grid_overlay::{drawing::*, GridOverlayConfig};
/// use image::{Rgba, RgbaImage};
///
/// let config = GridOverlayConfig::default();
/// let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
///
/// // Labels hanging off the canvas are clipped, never an error.
/// Label::new(42, 0, 0).draw(&mut canvas, &config);
/// ```
pub mod drawing;
pub mod glyph;
mod layout;
mod render;

pub use config::GridOverlayConfig;
pub use layout::{cell_to_pixel, pixel_to_cell, Cell, GridLayout};
pub use render::{draw_grid, encode_png, render_grid};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Failed to encode image with grid: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("Invalid {name}: {value}")]
    InvalidArgument { name: &'static str, value: i64 },
}
