//! Image inspection utilities for testing.
//!
//! This module provides helper functions for checking rendered maps.

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Check that the file at `path` is a PNG
pub fn assert_png_file(path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => Ok(()),
        Ok(other) => Err(format!("Expected PNG, found {:?}", other)),
        Err(e) => Err(format!("Could not detect image format: {}", e)),
    }
}

/// Check if an image has the expected dimensions
///
/// # Returns
///
/// * `Ok(())` if the image has the expected dimensions
/// * `Err(String)` with an error message if the dimensions differ
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Count the pixels exactly matching `color`
pub fn count_pixels(image: &DynamicImage, color: Rgba<u8>) -> usize {
    image.pixels().filter(|(_, _, p)| *p == color).count()
}

/// Write a solid-colour PNG, for logo fixtures
pub fn write_solid_png(path: &Path, width: u32, height: u32, color: Rgba<u8>) {
    RgbaImage::from_pixel(width, height, color)
        .save(path)
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_image_dimensions() {
        let img = DynamicImage::new_rgb8(10, 20);

        assert!(assert_image_dimensions(&img, 10, 20).is_ok());
        assert!(assert_image_dimensions(&img, 11, 20).is_err());
        assert!(assert_image_dimensions(&img, 10, 21).is_err());
    }

    #[test]
    fn test_count_pixels() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let img = DynamicImage::ImageRgba8(img);

        assert_eq!(count_pixels(&img, Rgba([255, 0, 0, 255])), 1);
        assert_eq!(count_pixels(&img, Rgba([0, 0, 0, 255])), 8);
    }
}
