//! Digit-split scheme
//!
//! Each sample becomes one pixel. R holds the integer part of `sample * 255`,
//! G and B hold the two fractional digit groups after they have been
//! rescaled over the whole buffer. The rescaling depends on the buffer's
//! range and is not stored, so decoding only approximates the input.

use super::digits::NumeralMode;
use super::normalization::{DegeneratePolicy, ensure_dynamic_range, normalize_with};
use super::{CHANNEL_MAX, DIGIT_GROUP_MAX, SAMPLE_SCALE};
use crate::error::CodecError;
use crate::types::{DigitTriple, Pixel};

/// Encode samples into one pixel each
///
/// # Errors
///
/// Returns [`CodecError::DegenerateRange`] for a constant (e.g. silent)
/// buffer and [`CodecError::MalformedNumeral`] for a sample that cannot be
/// split into digits.
pub fn encode(samples: &[f32], numeral: NumeralMode) -> Result<Vec<Pixel>, CodecError> {
    ensure_dynamic_range(samples)?;

    let mut firsts = Vec::with_capacity(samples.len());
    let mut groups = Vec::with_capacity(samples.len() * 2);

    for (index, &sample) in samples.iter().enumerate() {
        let triple = numeral.split(index, f64::from(sample) * SAMPLE_SCALE)?;
        firsts.push(triple.first_channel());
        groups.push(f64::from(triple.next));
        groups.push(f64::from(triple.last));
    }

    // An all-zero group buffer means every sample sat on an exact 1/255 step
    normalize_with(&mut groups, 0.0, CHANNEL_MAX, DegeneratePolicy::FillLower)?;

    Ok(firsts
        .into_iter()
        .zip(groups.chunks_exact(2))
        .map(|(r, gb)| Pixel::opaque(r, to_channel(gb[0]), to_channel(gb[1])))
        .collect())
}

/// Decode one sample per pixel, alpha is ignored
///
/// # Errors
///
/// Returns [`CodecError::SolidColor`] for a solid-colour buffer and
/// [`CodecError::MalformedNumeral`] if a pixel's digits do not form a number.
pub fn decode(pixels: &[Pixel], numeral: NumeralMode) -> Result<Vec<f32>, CodecError> {
    ensure_not_solid(pixels)?;

    let mut groups: Vec<f64> = pixels
        .iter()
        .flat_map(|p| [f64::from(p.g), f64::from(p.b)])
        .collect();

    normalize_with(&mut groups, 0.0, DIGIT_GROUP_MAX, DegeneratePolicy::FillLower)?;

    pixels
        .iter()
        .zip(groups.chunks_exact(2))
        .enumerate()
        .map(|(index, (pixel, gb))| -> Result<f32, CodecError> {
            let triple = DigitTriple::new(i32::from(pixel.r), to_group(gb[0]), to_group(gb[1]));
            let scaled = numeral.compose(index, triple)?;
            Ok((scaled / SAMPLE_SCALE) as f32)
        })
        .collect()
}

fn ensure_not_solid(pixels: &[Pixel]) -> Result<(), CodecError> {
    match pixels.split_first() {
        Some((head, tail)) if tail.iter().all(|p| p.same_color(head)) => {
            Err(CodecError::SolidColor {
                r: head.r,
                g: head.g,
                b: head.b,
            })
        }
        _ => Ok(()),
    }
}

#[inline]
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, CHANNEL_MAX) as u8
}

#[inline]
fn to_group(value: f64) -> u32 {
    value.round().clamp(0.0, DIGIT_GROUP_MAX) as u32
}
