use std::io::Cursor;

use image::{GenericImageView, ImageFormat, Pixel, RgbaImage};
use tracing::*;

use crate::drawing::Drawable;
use crate::{GridError, GridLayout, GridOverlayConfig};

/// Composites the grid overlay onto a copy of `image`.
///
/// The source is copied into a fresh RGBA canvas first, then grid lines and
/// cell labels are drawn on top. `image` itself is left untouched.
///
/// # Example
/// ```
/// use grid_overlay::{draw_grid, GridOverlayConfig};
/// use image::{Rgba, RgbaImage};
///
/// let img = RgbaImage::from_pixel(600, 400, Rgba([10, 20, 30, 255]));
/// let canvas = draw_grid(&img, &GridOverlayConfig::default());
///
/// assert_eq!(canvas.dimensions(), (600, 400));
/// assert_eq!(*canvas.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
/// assert_eq!(*canvas.get_pixel(100, 0), Rgba([0, 255, 255, 100]));
/// ```
pub fn draw_grid<I>(image: &I, config: &GridOverlayConfig) -> RgbaImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    debug!(
        "Drawing grid on {}x{} image with config: {:?}",
        width, height, config
    );
    let mut canvas = RgbaImage::from_fn(width, height, |x, y| image.get_pixel(x, y).to_rgba());

    let layout = GridLayout::new(width, config.cell_size);
    layout.draw(&mut canvas, config);
    for cell in layout.cells(height) {
        cell.draw(&mut canvas, config);
    }
    trace!("Drew {} cells", layout.cell_count(height));
    canvas
}

/// Overlays a numbered grid on `image` and returns the result as PNG bytes.
///
/// # Errors
/// Returns [`GridError::Encoding`] if the PNG encoder fails.
///
/// # Example
/// ```
/// use grid_overlay::{render_grid, GridOverlayConfig};
/// use image::{GrayImage, Luma};
///
/// let img = GrayImage::from_pixel(300, 200, Luma([128]));
/// let png = render_grid(&img, &GridOverlayConfig::default()).unwrap();
///
/// let decoded = image::load_from_memory(&png).unwrap();
/// assert_eq!((decoded.width(), decoded.height()), (300, 200));
/// ```
pub fn render_grid<I>(image: &I, config: &GridOverlayConfig) -> Result<Vec<u8>, GridError>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let canvas = draw_grid(image, config);
    encode_png(&canvas)
}

/// Encodes a canvas as PNG.
///
/// # Errors
/// Returns [`GridError::Encoding`] wrapping the encoder's error.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, GridError> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| {
            error!("Failed to encode {:?} canvas: {}", canvas.dimensions(), e);
            GridError::Encoding(e)
        })?;
    debug!("Encoded grid image into {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_to_cell;
    use image::{DynamicImage, GrayImage, Luma, Rgba};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::error::Error;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
        })
    }

    fn decode(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    #[test]
    fn render_round_trips_through_png() {
        let img = gradient(600, 400);
        let config = GridOverlayConfig::default();
        let png = render_grid(&img, &config).unwrap();
        assert_eq!(decode(&png), draw_grid(&img, &config));
    }

    #[test]
    fn rendering_is_deterministic() {
        let img = DynamicImage::ImageRgba8(gradient(320, 240));
        let config = GridOverlayConfig::with_cell_size(50).unwrap();
        let first = render_grid(&img, &config).unwrap();
        let second = render_grid(&img, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn source_image_is_not_modified() {
        let img = gradient(200, 200);
        let copy = img.clone();
        let _ = draw_grid(&img, &GridOverlayConfig::with_cell_size(20).unwrap());
        assert_eq!(img, copy);
    }

    #[test]
    fn grayscale_input_is_expanded_to_rgba() {
        let img = GrayImage::from_pixel(50, 50, Luma([77]));
        let canvas = draw_grid(&img, &GridOverlayConfig::default());
        assert_eq!(*canvas.get_pixel(10, 10), Rgba([77, 77, 77, 255]));
    }

    #[test]
    fn draws_lines_and_labels_in_the_right_places() {
        let config = GridOverlayConfig::default();
        let canvas = draw_grid(&RgbaImage::from_pixel(300, 200, BLUE), &config);

        // Lines at x=100 and x=200, two pixels wide, extending left.
        for x in [99, 100, 199, 200] {
            assert_eq!(*canvas.get_pixel(x, 5), config.grid_color, "x={x}");
        }
        assert_eq!(*canvas.get_pixel(98, 5), BLUE);
        assert_eq!(*canvas.get_pixel(101, 5), BLUE);
        // Line at y=100.
        assert_eq!(*canvas.get_pixel(5, 99), config.grid_color);
        assert_eq!(*canvas.get_pixel(5, 101), BLUE);

        // Label backgrounds at the centers of the six cells.
        for (x, y) in [(50, 50), (150, 50), (250, 50), (50, 150), (150, 150), (250, 150)] {
            let pixel = *canvas.get_pixel(x, y);
            assert!(
                pixel == config.number_background || pixel == config.number_color,
                "no label at ({x}, {y})"
            );
        }
        // Corner of cell 0 stays untouched.
        assert_eq!(*canvas.get_pixel(5, 5), BLUE);
    }

    #[test]
    fn zero_sized_image_renders() {
        let img = RgbaImage::new(0, 0);
        let canvas = draw_grid(&img, &GridOverlayConfig::default());
        assert_eq!(canvas.dimensions(), (0, 0));
    }

    #[test]
    fn oversized_cell_with_center_outside_leaves_image_alone() {
        let img = gradient(50, 50);
        let canvas = draw_grid(&img, &GridOverlayConfig::default());
        assert_eq!(canvas, img);
    }

    #[test]
    fn oversized_cell_gets_a_single_label() {
        let img = RgbaImage::from_pixel(150, 150, BLUE);
        let config = GridOverlayConfig::with_cell_size(200).unwrap();
        let canvas = draw_grid(&img, &config);

        // Single "0" label centered on (100, 100); no grid lines.
        assert_eq!(*canvas.get_pixel(100, 100), config.number_background);
        assert_eq!(*canvas.get_pixel(149, 0), BLUE);
        assert_eq!(*canvas.get_pixel(0, 149), BLUE);
    }

    #[test]
    fn partial_cell_label_matches_pixel_to_cell() {
        // 260px wide: the third column is 60px wide, its center (250, 50) is drawn.
        let config = GridOverlayConfig::default().with_line_width(0);
        let img = RgbaImage::from_pixel(260, 200, BLUE);
        let canvas = draw_grid(&img, &config);
        let layout = GridLayout::new(260, config.cell_size);

        let labelled: Vec<u64> = layout
            .cells(200)
            .filter(|cell| *canvas.get_pixel(cell.center_x as u32, cell.center_y as u32) != BLUE)
            .map(|cell| cell.index)
            .collect();
        assert_eq!(labelled, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(pixel_to_cell(250, 50, 260, config.cell_size), 2);
        assert_eq!(pixel_to_cell(50, 150, 260, config.cell_size), 3);
    }

    #[test]
    fn encoding_error_keeps_its_source() {
        use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};

        let cause = image::ImageError::Unsupported(UnsupportedError::from_format_and_kind(
            ImageFormatHint::Exact(ImageFormat::Png),
            UnsupportedErrorKind::GenericFeature("test".to_string()),
        ));
        let err = GridError::from(cause);
        assert!(err.to_string().starts_with("Failed to encode image with grid"));
        assert!(err.source().is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn only_overlay_pixels_change(width in 1..160u32, height in 1..160u32, cell_size in 1..80u32, line_width in 0..4u32) {
            let config = GridOverlayConfig::with_cell_size(cell_size).unwrap().with_line_width(line_width);
            let img = RgbaImage::from_pixel(width, height, BLUE);
            let canvas = draw_grid(&img, &config);
            prop_assert_eq!(canvas.dimensions(), (width, height));
            for pixel in canvas.pixels() {
                prop_assert!(
                    *pixel == BLUE
                        || *pixel == config.grid_color
                        || *pixel == config.number_color
                        || *pixel == config.number_background
                );
            }
        }
    }
}
