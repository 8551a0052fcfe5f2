use thiserror::Error;

/// Errors raised by the sample/pixel codec
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Every value in the buffer is the same, so there is no range to rescale
    #[error("degenerate range: min {min} equals max {max}")]
    DegenerateRange { min: f64, max: f64 },

    /// Every pixel of an image has the same RGB colour
    #[error("solid colour rgb({r}, {g}, {b}) carries no range")]
    SolidColor { r: u8, g: u8, b: u8 },

    /// A value could not be rendered as, or parsed from, a digit numeral
    #[error("malformed numeral at index {index}: {numeral:?}")]
    MalformedNumeral { index: usize, numeral: String },

    /// Pixel buffer does not fill the target canvas exactly
    #[error("pixel buffer holds {actual} pixels but the canvas needs {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl CodecError {
    #[must_use]
    pub fn malformed(index: usize, numeral: impl Into<String>) -> Self {
        Self::MalformedNumeral {
            index,
            numeral: numeral.into(),
        }
    }
}

/// Failure of one file in the CLI pipeline, by stage
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input could not be opened or decoded
    #[error("{0:#}")]
    ReadFailed(anyhow::Error),

    /// Input was read but the codec rejected it
    #[error(transparent)]
    CodecFailed(#[from] CodecError),

    /// Output could not be produced
    #[error("{0:#}")]
    WriteFailed(anyhow::Error),
}
