use std::num::NonZeroU32;

use image::Rgba;

use crate::GridError;

const DEFAULT_CELL_SIZE: NonZeroU32 = match NonZeroU32::new(100) {
    Some(size) => size,
    None => unreachable!(),
};
const DEFAULT_NUMBER_SCALE: NonZeroU32 = match NonZeroU32::new(3) {
    Some(scale) => scale,
    None => unreachable!(),
};
const DEFAULT_LINE_WIDTH: u32 = 2;
const DEFAULT_GRID_COLOR: Rgba<u8> = Rgba([0, 255, 255, 100]); // Semi-transparent cyan
const DEFAULT_NUMBER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]); // White
const DEFAULT_NUMBER_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 200]); // Semi-transparent black

/// Configuration for the grid overlay.
///
/// Colors are written onto the canvas as-is, alpha included. Lines and labels
/// replace the pixels underneath instead of blending over them.
///
/// # Example
/// ```
/// use grid_overlay::GridOverlayConfig;
/// use image::Rgba;
///
/// let config = GridOverlayConfig::default();
/// assert_eq!(config.cell_size.get(), 100);
/// assert_eq!(config.grid_color, Rgba([0, 255, 255, 100]));
/// assert_eq!(config.line_width, 2);
/// assert_eq!(config.number_scale.get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOverlayConfig {
    /// Edge length of a grid cell in pixels (default: 100)
    pub cell_size: NonZeroU32,
    /// Color of the grid lines (default: semi-transparent cyan)
    #[cfg_attr(feature = "serde", serde(with = "rgba_array"))]
    pub grid_color: Rgba<u8>,
    /// Color of the label digits (default: white)
    #[cfg_attr(feature = "serde", serde(with = "rgba_array"))]
    pub number_color: Rgba<u8>,
    /// Color of the box behind each label (default: semi-transparent black)
    #[cfg_attr(feature = "serde", serde(with = "rgba_array"))]
    pub number_background: Rgba<u8>,
    /// Width of the grid lines in pixels, 0 disables them (default: 2)
    pub line_width: u32,
    /// Magnification of the 5x7 digit glyphs (default: 3)
    pub number_scale: NonZeroU32,
}

impl GridOverlayConfig {
    /// Creates a default configuration with the given cell size.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidArgument`] if `cell_size` is zero.
    ///
    /// # Example
    /// ```
    /// use grid_overlay::GridOverlayConfig;
    ///
    /// let config = GridOverlayConfig::with_cell_size(50).unwrap();
    /// assert_eq!(config.cell_size.get(), 50);
    /// assert!(GridOverlayConfig::with_cell_size(0).is_err());
    /// ```
    pub fn with_cell_size(cell_size: u32) -> Result<Self, GridError> {
        Ok(Self {
            cell_size: non_zero("cell size", cell_size)?,
            ..Self::default()
        })
    }

    /// Replaces the glyph magnification.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidArgument`] if `number_scale` is zero.
    pub fn with_number_scale(self, number_scale: u32) -> Result<Self, GridError> {
        Ok(Self {
            number_scale: non_zero("number scale", number_scale)?,
            ..self
        })
    }

    /// Replaces the grid line width.
    pub fn with_line_width(self, line_width: u32) -> Self {
        Self { line_width, ..self }
    }

    /// Replaces the grid line color.
    pub fn with_grid_color(self, grid_color: Rgba<u8>) -> Self {
        Self { grid_color, ..self }
    }

    /// Replaces the label digit color.
    pub fn with_number_color(self, number_color: Rgba<u8>) -> Self {
        Self {
            number_color,
            ..self
        }
    }

    /// Replaces the label background color.
    pub fn with_number_background(self, number_background: Rgba<u8>) -> Self {
        Self {
            number_background,
            ..self
        }
    }
}

impl Default for GridOverlayConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            grid_color: DEFAULT_GRID_COLOR,
            number_color: DEFAULT_NUMBER_COLOR,
            number_background: DEFAULT_NUMBER_BACKGROUND,
            line_width: DEFAULT_LINE_WIDTH,
            number_scale: DEFAULT_NUMBER_SCALE,
        }
    }
}

fn non_zero(name: &'static str, value: u32) -> Result<NonZeroU32, GridError> {
    NonZeroU32::new(value).ok_or(GridError::InvalidArgument {
        name,
        value: i64::from(value),
    })
}

/// Serializes `Rgba<u8>` as a plain `[r, g, b, a]` array.
#[cfg(feature = "serde")]
mod rgba_array {
    use image::Rgba;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(color: &Rgba<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        color.0.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba<u8>, D::Error> {
        <[u8; 4]>::deserialize(deserializer).map(Rgba)
    }
}
