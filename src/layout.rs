//! Row-major cell numbering shared by the renderer and the coordinate mapper.
//!
//! Cells are numbered left-to-right, top-to-bottom starting at 0. A row holds
//! `max(1, ceil(image_width / cell_size))` cells, which is exactly the number of
//! columns the renderer enumerates. The index a label shows and the index
//! [`pixel_to_cell`] returns for the same pixel therefore always agree.

use std::num::NonZeroU32;

use tracing::*;

use crate::GridError;

/// One enumerated grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    pub index: u64,
    pub row: u32,
    pub column: u32,
    pub center_x: i64,
    pub center_y: i64,
}

/// Geometry of a grid laid over an image of a given width.
///
/// # Example
/// ```
/// use grid_overlay::GridLayout;
/// use std::num::NonZeroU32;
///
/// let layout = GridLayout::new(600, NonZeroU32::new(100).unwrap());
/// assert_eq!(layout.columns_per_row(), 6);
/// assert_eq!(layout.cell_to_pixel(7).unwrap(), (150, 150));
/// assert_eq!(layout.pixel_to_cell(150, 150), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    image_width: u32,
    cell_size: NonZeroU32,
    columns_per_row: u32,
}

impl GridLayout {
    /// Creates the layout for an image `image_width` pixels wide.
    pub fn new(image_width: u32, cell_size: NonZeroU32) -> Self {
        let columns_per_row = image_width.div_ceil(cell_size.get()).max(1);
        Self {
            image_width,
            cell_size,
            columns_per_row,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn cell_size(&self) -> NonZeroU32 {
        self.cell_size
    }

    /// Number of cells per row used for linear indices. Never zero.
    pub fn columns_per_row(&self) -> u32 {
        self.columns_per_row
    }

    /// Number of columns actually covering the image, 0 for an empty image.
    pub fn column_count(&self) -> u32 {
        self.image_width.div_ceil(self.cell_size.get())
    }

    /// Number of rows covering an image `image_height` pixels tall.
    pub fn row_count(&self, image_height: u32) -> u32 {
        image_height.div_ceil(self.cell_size.get())
    }

    /// Total number of cells on an image `image_height` pixels tall.
    pub fn cell_count(&self, image_height: u32) -> u64 {
        u64::from(self.row_count(image_height)) * u64::from(self.column_count())
    }

    /// Enumerates every cell whose top-left corner lies inside the image, in
    /// index order. Centers may fall outside the image on the right and bottom
    /// edges.
    ///
    /// # Example
    /// ```
    /// use grid_overlay::GridLayout;
    /// use std::num::NonZeroU32;
    ///
    /// let layout = GridLayout::new(250, NonZeroU32::new(100).unwrap());
    /// let indices: Vec<u64> = layout.cells(150).map(|cell| cell.index).collect();
    /// assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn cells(&self, image_height: u32) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.column_count();
        (0..self.row_count(image_height)).flat_map(move |row| {
            (0..columns).map(move |column| {
                let (center_x, center_y) = self.center_of(i64::from(row), i64::from(column));
                Cell {
                    index: u64::from(row) * u64::from(self.columns_per_row) + u64::from(column),
                    row,
                    column,
                    center_x,
                    center_y,
                }
            })
        })
    }

    /// Converts a cell index to the pixel at the center of that cell.
    ///
    /// Rows wrap after [`columns_per_row`](Self::columns_per_row) cells, which
    /// includes a partial column on the right edge; see [`cell_to_pixel`].
    ///
    /// Indices past the last row of any real image are accepted; the result is
    /// plain coordinate arithmetic, saturating at the `i64` range.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidArgument`] if `cell_index` is negative.
    pub fn cell_to_pixel(&self, cell_index: i64) -> Result<(i64, i64), GridError> {
        if cell_index < 0 {
            warn!("Rejecting negative cell index {}", cell_index);
            return Err(GridError::InvalidArgument {
                name: "cell index",
                value: cell_index,
            });
        }
        let columns = i64::from(self.columns_per_row);
        Ok(self.center_of(cell_index / columns, cell_index % columns))
    }

    /// Converts a pixel to the index of the cell containing it.
    ///
    /// There is no bounds check. Coordinates left of, above, or right of the
    /// image produce whatever index the row-major formula gives, which may not
    /// name a real cell. Division truncates toward zero, so `x` in
    /// `-cell_size+1..cell_size` all land in column 0.
    pub fn pixel_to_cell(&self, x: i64, y: i64) -> i64 {
        let size = i64::from(self.cell_size.get());
        let column = x / size;
        let row = y / size;
        row.saturating_mul(i64::from(self.columns_per_row))
            .saturating_add(column)
    }

    fn center_of(&self, row: i64, column: i64) -> (i64, i64) {
        let size = i64::from(self.cell_size.get());
        let half = size / 2;
        (
            column.saturating_mul(size).saturating_add(half),
            row.saturating_mul(size).saturating_add(half),
        )
    }
}

/// Converts a cell number to the pixel coordinates of the cell center.
///
/// A row holds `max(1, ceil(image_width / cell_size))` cells, counting the
/// partial column on the right edge the same way the rendered labels do. Where
/// the width is not a multiple of `cell_size` this differs from a plain floor
/// division: on a 250px wide image with 100px cells, cell 2 is the partial
/// third column at (250, 50), not the start of the second row at (50, 150).
///
/// # Errors
/// Returns [`GridError::InvalidArgument`] if `cell_index` is negative.
///
/// # Example
/// ```
/// use grid_overlay::cell_to_pixel;
/// use std::num::NonZeroU32;
///
/// let cell_size = NonZeroU32::new(50).unwrap();
/// assert_eq!(cell_to_pixel(0, 100, cell_size).unwrap(), (25, 25));
/// assert_eq!(cell_to_pixel(1, 100, cell_size).unwrap(), (75, 25));
/// assert_eq!(cell_to_pixel(2, 100, cell_size).unwrap(), (25, 75));
/// assert!(cell_to_pixel(-1, 100, cell_size).is_err());
///
/// // Partial right-hand column.
/// let cell_size = NonZeroU32::new(100).unwrap();
/// assert_eq!(cell_to_pixel(2, 250, cell_size).unwrap(), (250, 50));
/// ```
pub fn cell_to_pixel(
    cell_index: i64,
    image_width: u32,
    cell_size: NonZeroU32,
) -> Result<(i64, i64), GridError> {
    GridLayout::new(image_width, cell_size).cell_to_pixel(cell_index)
}

/// Converts pixel coordinates to the number of the cell containing them.
///
/// # Example
/// ```
/// use grid_overlay::pixel_to_cell;
/// use std::num::NonZeroU32;
///
/// let cell_size = NonZeroU32::new(100).unwrap();
/// assert_eq!(pixel_to_cell(50, 50, 600, cell_size), 0);
/// assert_eq!(pixel_to_cell(250, 150, 600, cell_size), 8);
/// ```
pub fn pixel_to_cell(x: i64, y: i64, image_width: u32, cell_size: NonZeroU32) -> i64 {
    GridLayout::new(image_width, cell_size).pixel_to_cell(x, y)
}
