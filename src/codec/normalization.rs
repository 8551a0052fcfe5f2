//! Linear range rescaling
//!
//! The observed range is always seeded with 0: an all-positive buffer is
//! rescaled from `[0, max]` and an all-negative one from `[min, 0]`.
//! Artifacts produced by the codec depend on this, so it must not change.

use crate::error::CodecError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point element types a buffer can be normalized in
pub trait Normalizable: Copy + sealed::Sealed {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Normalizable for f32 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Normalizable for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// What to do with a buffer that has no range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with [`CodecError::DegenerateRange`]
    #[default]
    Reject,
    /// Only the seeded span is checked: a buffer of zeros is set to the
    /// lower target bound, any other constant buffer goes through the
    /// formula and lands on the upper (or lower, if negative) bound
    FillLower,
}

/// Observed `(min, max)` of a buffer, ignoring the 0 seed
///
/// Returns `(+inf, -inf)` for an empty buffer.
#[inline]
#[must_use]
pub fn find_min_max<T: Normalizable>(values: &[T]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &val| {
            let val = val.to_f64();
            (min.min(val), max.max(val))
        })
}

/// Rescale `buffer` in place so its seeded min maps to `a` and its seeded
/// max maps to `b`
///
/// # Errors
///
/// Returns [`CodecError::DegenerateRange`] for a constant buffer and
/// [`CodecError::MalformedNumeral`] if any element is not finite. The
/// buffer is left untouched on error.
pub fn normalize<T: Normalizable>(buffer: &mut [T], a: f64, b: f64) -> Result<(), CodecError> {
    normalize_with(buffer, a, b, DegeneratePolicy::Reject)
}

/// [`normalize`] with an explicit policy for constant buffers
///
/// # Errors
///
/// See [`normalize`]. With [`DegeneratePolicy::FillLower`] only non-finite
/// input is an error; a constant non-zero buffer still has a seeded span
/// and is rescaled like any other.
pub fn normalize_with<T: Normalizable>(
    buffer: &mut [T],
    a: f64,
    b: f64,
    policy: DegeneratePolicy,
) -> Result<(), CodecError> {
    if buffer.is_empty() {
        return Ok(());
    }

    if let Some(index) = buffer.iter().position(|v| !v.to_f64().is_finite()) {
        return Err(CodecError::malformed(index, buffer[index].to_f64().to_string()));
    }

    let (observed_min, observed_max) = find_min_max(buffer);
    let min = observed_min.min(0.0);
    let max = observed_max.max(0.0);
    let span = max - min;

    match policy {
        DegeneratePolicy::Reject if observed_min == observed_max || span == 0.0 => {
            return Err(CodecError::DegenerateRange {
                min: observed_min,
                max: observed_max,
            });
        }
        DegeneratePolicy::FillLower if span == 0.0 => {
            log::debug!("all-zero buffer of {} values filled with {a}", buffer.len());
            buffer.fill(T::from_f64(a));
            return Ok(());
        }
        _ => {}
    }

    let scale = b - a;
    for value in buffer.iter_mut() {
        *value = T::from_f64(a + scale * (value.to_f64() - min) / span);
    }

    Ok(())
}

/// Fail when a non-empty buffer carries no dynamic range at all
///
/// # Errors
///
/// Returns [`CodecError::DegenerateRange`] when every element is equal.
pub fn ensure_dynamic_range<T: Normalizable>(values: &[T]) -> Result<(), CodecError> {
    if values.is_empty() {
        return Ok(());
    }

    let (min, max) = find_min_max(values);
    if min == max {
        return Err(CodecError::DegenerateRange { min, max });
    }

    Ok(())
}
