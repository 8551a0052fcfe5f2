//! Sample buffer <-> pixel buffer codec
//!
//! Both directions are pure, stateless transforms over owned buffers.

mod digit_split;
mod digits;
mod grayscale;
mod normalization;

pub use digits::NumeralMode;
pub use normalization::{
    DegeneratePolicy, Normalizable, ensure_dynamic_range, find_min_max, normalize, normalize_with,
};

use crate::error::CodecError;
use crate::types::Pixel;

/// Multiplier from a nominal `[-1, 1]` sample to channel units
pub const SAMPLE_SCALE: f64 = 255.0;
pub const CHANNEL_MIN: f64 = 0.0;
pub const CHANNEL_MAX: f64 = 255.0;
/// Upper bound of a three-digit group
pub const DIGIT_GROUP_MAX: f64 = 999.0;

/// Pixel layout used for encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Scheme {
    /// Integer part in R, fractional digit groups in G and B
    #[default]
    DigitSplit,
    /// Whole buffer rescaled to one gray level per sample
    Grayscale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    pub scheme: Scheme,
    /// Only used by [`Scheme::DigitSplit`]
    pub numeral: NumeralMode,
}

impl CodecConfig {
    #[must_use]
    pub fn new(scheme: Scheme, numeral: NumeralMode) -> Self {
        Self { scheme, numeral }
    }
}

/// Encode samples with the default digit-split, fixed-point configuration
///
/// # Errors
///
/// See [`encode_with`].
pub fn encode(samples: &[f32]) -> Result<Vec<Pixel>, CodecError> {
    encode_with(samples, &CodecConfig::default())
}

/// Decode pixels with the default digit-split, fixed-point configuration
///
/// # Errors
///
/// See [`decode_with`].
pub fn decode(pixels: &[Pixel]) -> Result<Vec<f32>, CodecError> {
    decode_with(pixels, &CodecConfig::default())
}

/// Encode one pixel per sample
///
/// # Errors
///
/// Returns [`CodecError::DegenerateRange`] when the samples carry no dynamic
/// range (silence or DC), and [`CodecError::MalformedNumeral`] when a sample
/// is not a finite number.
pub fn encode_with(samples: &[f32], config: &CodecConfig) -> Result<Vec<Pixel>, CodecError> {
    log::debug!(
        "encoding {} samples ({:?}, {:?})",
        samples.len(),
        config.scheme,
        config.numeral
    );

    match config.scheme {
        Scheme::DigitSplit => digit_split::encode(samples, config.numeral),
        Scheme::Grayscale => grayscale::encode(samples),
    }
}

/// Decode one sample per pixel
///
/// # Errors
///
/// Returns [`CodecError::SolidColor`] for a solid-colour digit-split buffer,
/// [`CodecError::DegenerateRange`] for a grayscale buffer with one level, and
/// [`CodecError::MalformedNumeral`] when pixel digits do not form a number.
pub fn decode_with(pixels: &[Pixel], config: &CodecConfig) -> Result<Vec<f32>, CodecError> {
    log::debug!(
        "decoding {} pixels ({:?}, {:?})",
        pixels.len(),
        config.scheme,
        config.numeral
    );

    match config.scheme {
        Scheme::DigitSplit => digit_split::decode(pixels, config.numeral),
        Scheme::Grayscale => grayscale::decode(pixels),
    }
}
