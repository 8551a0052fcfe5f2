use crate::types::{Dimensions, Pixel};

/// Fill for canvas cells past the end of the encoded buffer
pub const PAD_PIXEL: Pixel = Pixel::opaque(0, 0, 0);

/// Pick the canvas for `len` samples from optional user-supplied sides
///
/// A single side is completed so the canvas holds every sample.
#[must_use]
pub fn resolve_dimensions(width: Option<u32>, height: Option<u32>, len: usize) -> Dimensions {
    let other_side = |side: u32| len.div_ceil(side.max(1) as usize).max(1) as u32;

    match (width, height) {
        (Some(w), Some(h)) => Dimensions::new(w, h),
        (Some(w), None) => Dimensions::new(w, other_side(w)),
        (None, Some(h)) => Dimensions::new(other_side(h), h),
        (None, None) if len == 0 => Dimensions::default(),
        (None, None) => Dimensions::for_len(len),
    }
}

/// Truncate or black-pad encoded pixels to exactly fill `dims`
///
/// Runs after encoding, so normalization always sees the whole buffer.
#[must_use]
pub fn fit_to_canvas(mut pixels: Vec<Pixel>, dims: Dimensions) -> Vec<Pixel> {
    let count = dims.pixel_count();

    if pixels.len() > count {
        log::warn!(
            "dropping {} pixels that do not fit a {dims} canvas",
            pixels.len() - count
        );
    } else if pixels.len() < count {
        log::debug!("padding {} pixels with black", count - pixels.len());
    }

    pixels.resize(count, PAD_PIXEL);
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{self, CodecConfig, Scheme};

    fn grayscale() -> CodecConfig {
        CodecConfig {
            scheme: Scheme::Grayscale,
            ..CodecConfig::default()
        }
    }

    #[test]
    fn test_resolve_dimensions() {
        assert_eq!(resolve_dimensions(Some(4), Some(3), 100), Dimensions::new(4, 3));
        assert_eq!(resolve_dimensions(Some(10), None, 95), Dimensions::new(10, 10));
        assert_eq!(resolve_dimensions(None, Some(7), 14), Dimensions::new(2, 7));
        assert_eq!(resolve_dimensions(None, None, 9), Dimensions::new(3, 3));
        assert_eq!(resolve_dimensions(None, None, 0), Dimensions::new(500, 500));
    }

    #[test]
    fn test_fit_pads_with_black() {
        let pixels = vec![Pixel::opaque(1, 2, 3), Pixel::opaque(4, 5, 6)];
        let fitted = fit_to_canvas(pixels, Dimensions::new(2, 2));
        assert_eq!(fitted.len(), 4);
        assert_eq!(fitted[1], Pixel::opaque(4, 5, 6));
        assert_eq!(fitted[2], PAD_PIXEL);
        assert_eq!(fitted[3].to_string(), "rgba(0, 0, 0, 255)");
    }

    #[test]
    fn test_fit_truncates() {
        let pixels = vec![Pixel::opaque(9, 9, 9); 5];
        assert_eq!(fit_to_canvas(pixels, Dimensions::new(2, 1)).len(), 2);
    }

    #[test]
    fn test_grayscale_padding_is_black_not_mid_gray() {
        let pixels = codec::encode_with(&[-1.0, 1.0], &grayscale()).unwrap();
        let fitted = fit_to_canvas(pixels, Dimensions::new(2, 2));

        assert_eq!(fitted[0], Pixel::opaque(0, 0, 0));
        assert_eq!(fitted[1], Pixel::opaque(255, 255, 255));
        assert_eq!(&fitted[2..], &[PAD_PIXEL, PAD_PIXEL]);
    }

    #[test]
    fn test_grayscale_truncation_keeps_whole_buffer_range() {
        // -1 is dropped from the canvas but still anchors the range
        let pixels = codec::encode_with(&[0.5, 1.0, -1.0], &grayscale()).unwrap();
        let fitted = fit_to_canvas(pixels, Dimensions::new(2, 1));

        assert_eq!(fitted, vec![Pixel::opaque(191, 191, 191), Pixel::opaque(255, 255, 255)]);
    }

    #[test]
    fn test_digit_split_padding_matches_encoded_silence() {
        let config = CodecConfig::default();
        let padded = fit_to_canvas(
            codec::encode_with(&[0.5, -0.25, 0.75], &config).unwrap(),
            Dimensions::new(2, 2),
        );
        let encoded = codec::encode_with(&[0.5, -0.25, 0.75, 0.0], &config).unwrap();
        assert_eq!(padded, encoded);
    }
}
