//! Splitting a scaled sample into digit groups and joining them back

use crate::error::CodecError;
use crate::types::DigitTriple;

/// Width of one fractional digit group
const GROUP_SCALE: f64 = 1_000.0;
/// Both fractional groups together
const MICRO_SCALE: f64 = GROUP_SCALE * GROUP_SCALE;
const MAX_MICRO: u32 = 999_999;

/// How a scaled sample is turned into decimal digit groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NumeralMode {
    /// Positional fixed-point arithmetic, groups are zero-padded
    #[default]
    FixedPoint,
    /// Shortest decimal rendering, sliced as text
    ///
    /// Groups are not padded, so `5.61` may come from (61, 0) or (6, 1).
    Decimal,
}

impl NumeralMode {
    /// Split `scaled` (a sample multiplied by 255) into a digit triple
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedNumeral`] if `scaled` has no decimal
    /// rendering that fits the triple.
    pub fn split(self, index: usize, scaled: f64) -> Result<DigitTriple, CodecError> {
        if !scaled.is_finite() {
            return Err(CodecError::malformed(index, scaled.to_string()));
        }

        match self {
            Self::FixedPoint => split_fixed_point(index, scaled),
            Self::Decimal => split_decimal(index, scaled),
        }
    }

    /// Join a triple back into the scaled value it came from
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedNumeral`] if the joined numeral does
    /// not parse.
    pub fn compose(self, index: usize, triple: DigitTriple) -> Result<f64, CodecError> {
        match self {
            Self::FixedPoint => {
                let fraction = f64::from(triple.next.min(999)) / GROUP_SCALE
                    + f64::from(triple.last.min(999)) / MICRO_SCALE;
                let first = f64::from(triple.first);
                Ok(if triple.first < 0 {
                    first - fraction
                } else {
                    first + fraction
                })
            }
            Self::Decimal => {
                let numeral = format!("{}.{}{}", triple.first, triple.next, triple.last);
                numeral
                    .parse::<f64>()
                    .map_err(|_| CodecError::malformed(index, numeral))
            }
        }
    }
}

fn split_fixed_point(index: usize, scaled: f64) -> Result<DigitTriple, CodecError> {
    let whole = scaled.trunc();
    if whole < f64::from(i32::MIN) || whole > f64::from(i32::MAX) {
        return Err(CodecError::malformed(index, scaled.to_string()));
    }

    let micro = (((scaled - whole).abs() * MICRO_SCALE).floor() as u32).min(MAX_MICRO);
    let group = GROUP_SCALE as u32;

    Ok(DigitTriple::new(whole as i32, micro / group, micro % group))
}

fn split_decimal(index: usize, scaled: f64) -> Result<DigitTriple, CodecError> {
    let numeral = scaled.to_string();
    let (integer, fraction) = numeral.split_once('.').unwrap_or((numeral.as_str(), ""));

    let first = integer
        .parse::<i32>()
        .map_err(|_| CodecError::malformed(index, numeral.as_str()))?;
    let next = parse_group(fraction, 0, index, &numeral)?;
    let last = parse_group(fraction, 3, index, &numeral)?;

    Ok(DigitTriple::new(first, next, last))
}

/// Parse up to three characters starting at `start`, empty slices are 0
fn parse_group(fraction: &str, start: usize, index: usize, numeral: &str) -> Result<u32, CodecError> {
    let end = (start + 3).min(fraction.len());
    let digits = fraction.get(start.min(end)..end).unwrap_or("");

    if digits.is_empty() {
        return Ok(0);
    }

    digits
        .parse::<u32>()
        .map_err(|_| CodecError::malformed(index, numeral))
}
