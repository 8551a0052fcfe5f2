//! Grayscale scheme
//!
//! The whole sample buffer is rescaled into `[0, 255]` and written to R, G
//! and B alike. Decoding rescales R back into `[-1, 1]`. Only 8 bits of
//! precision survive.

use super::normalization::normalize;
use super::{CHANNEL_MAX, CHANNEL_MIN};
use crate::error::CodecError;
use crate::types::Pixel;

const SAMPLE_MIN: f64 = -1.0;
const SAMPLE_MAX: f64 = 1.0;

/// Encode samples as gray pixels
///
/// # Errors
///
/// Returns [`CodecError::DegenerateRange`] for a constant buffer and
/// [`CodecError::MalformedNumeral`] for a non-finite sample.
pub fn encode(samples: &[f32]) -> Result<Vec<Pixel>, CodecError> {
    let mut levels: Vec<f64> = samples.iter().map(|&s| f64::from(s)).collect();
    normalize(&mut levels, CHANNEL_MIN, CHANNEL_MAX)?;

    Ok(levels
        .into_iter()
        .map(|level| {
            // Saturating cast guards against rounding just outside the range
            let gray = level.round() as u8;
            Pixel::opaque(gray, gray, gray)
        })
        .collect())
}

/// Decode samples from the R channel
///
/// # Errors
///
/// Returns [`CodecError::DegenerateRange`] when every R value is the same.
pub fn decode(pixels: &[Pixel]) -> Result<Vec<f32>, CodecError> {
    let mut samples: Vec<f32> = pixels.iter().map(|p| f32::from(p.r)).collect();
    normalize(&mut samples, SAMPLE_MIN, SAMPLE_MAX)?;
    Ok(samples)
}
