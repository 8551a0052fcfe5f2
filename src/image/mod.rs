//! Pixel buffers as image files
//!
//! Only lossless formats are written: any lossy compression would scramble
//! the digit groups stored in G and B.

mod canvas;

pub use canvas::{PAD_PIXEL, fit_to_canvas, resolve_dimensions};

use crate::error::CodecError;
use crate::types::{Dimensions, Pixel};
use anyhow::{Context, Result, bail};
use image::{ImageBuffer, ImageFormat, RgbaImage};
use std::path::Path;

/// Lay a pixel buffer out row by row on a canvas
///
/// # Errors
///
/// Returns [`CodecError::DimensionMismatch`] unless the buffer fills the
/// canvas exactly.
pub fn pixels_to_image(pixels: &[Pixel], dims: Dimensions) -> Result<RgbaImage, CodecError> {
    let mismatch = CodecError::DimensionMismatch {
        expected: dims.pixel_count(),
        actual: pixels.len(),
    };

    if pixels.len() != dims.pixel_count() {
        return Err(mismatch);
    }

    let raw: Vec<u8> = pixels.iter().flat_map(|p| p.to_rgba()).collect();
    ImageBuffer::from_raw(dims.width, dims.height, raw).ok_or(mismatch)
}

/// Flatten an image into a pixel buffer, row by row
#[must_use]
pub fn image_to_pixels(image: &RgbaImage) -> Vec<Pixel> {
    image.pixels().map(|p| Pixel::from_rgba(p.0)).collect()
}

/// Image format for `path`, refusing anything lossy
///
/// # Errors
///
/// Returns an error if the extension is unknown or names a lossy format.
pub fn lossless_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Unknown image format: {}", path.display()))?;

    match format {
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff => Ok(format),
        other => bail!(
            "{other:?} output would lose pixel data, use png, bmp or tiff: {}",
            path.display()
        ),
    }
}

/// Write a pixel buffer as an image file
///
/// # Errors
///
/// Returns an error if the format is lossy, the buffer does not fit `dims`,
/// or the file cannot be written.
pub fn save_pixels(path: &Path, pixels: &[Pixel], dims: Dimensions) -> Result<()> {
    let format = lossless_format(path)?;
    let image = pixels_to_image(pixels, dims)?;

    image
        .save_with_format(path, format)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;

    log::debug!("wrote {dims} {format:?} image to {}", path.display());
    Ok(())
}

/// Read an image file into a pixel buffer
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read_pixels(path: &Path) -> Result<(Vec<Pixel>, Dimensions)> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .to_rgba8();

    let dims = Dimensions::new(image.width(), image.height());
    log::debug!("read {dims} image from {}", path.display());

    Ok((image_to_pixels(&image), dims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn gradient(dims: Dimensions) -> Vec<Pixel> {
        (0..dims.pixel_count())
            .map(|i| Pixel::opaque((i % 256) as u8, (i / 3 % 256) as u8, 7))
            .collect()
    }

    #[test]
    fn test_pixels_fill_rows_in_order() {
        let dims = Dimensions::new(3, 2);
        let pixels = gradient(dims);
        let image = pixels_to_image(&pixels, dims).unwrap();

        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.get_pixel(0, 1).0, pixels[3].to_rgba());
        assert_eq!(image_to_pixels(&image), pixels);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let pixels = gradient(Dimensions::new(2, 2));
        assert_matches!(
            pixels_to_image(&pixels, Dimensions::new(3, 3)),
            Err(CodecError::DimensionMismatch {
                expected: 9,
                actual: 4
            })
        );
    }

    #[test]
    fn test_lossy_formats_refused() {
        assert!(lossless_format(Path::new("out.png")).is_ok());
        assert!(lossless_format(Path::new("out.tiff")).is_ok());
        assert!(lossless_format(Path::new("out.bmp")).is_ok());
        assert!(lossless_format(Path::new("out.jpg")).is_err());
        assert!(lossless_format(Path::new("out")).is_err());
    }

    #[test]
    fn test_png_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixels.png");
        let dims = Dimensions::new(16, 9);
        let pixels = gradient(dims);

        save_pixels(&path, &pixels, dims).unwrap();
        let (read_back, read_dims) = read_pixels(&path).unwrap();

        assert_eq!(read_dims, dims);
        assert_eq!(read_back, pixels);
    }

    #[test]
    fn test_jpeg_output_refused_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixels.jpg");
        let dims = Dimensions::new(2, 2);

        assert!(save_pixels(&path, &gradient(dims), dims).is_err());
        assert!(!path.exists());
    }
}
