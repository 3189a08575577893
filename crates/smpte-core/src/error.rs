//! Error types for timecode parsing, conversion and arithmetic.

use thiserror::Error;

use crate::decimal::Decimal;
use crate::rate::SmpteFrameRate;

/// Errors produced by fallible timecode operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    #[error("the timecode provided is not in the correct format: {input:?}")]
    Format { input: String },

    #[error("the timecode provided is out of the expected range: {input:?}")]
    Range { input: String },

    #[error("timecode frame value {frames} is not in the expected range for SMPTE {rate}")]
    FrameOutOfRange { frames: u32, rate: SmpteFrameRate },

    #[error("the resulting timecode {value} is out of the expected range of max value {max}")]
    Overflow { value: Decimal, max: Decimal },

    #[error("the resulting timecode {value} is out of the expected range of min value 0")]
    Underflow { value: Decimal },

    #[error("unknown frame rate: {label:?}")]
    UnknownFrameRate { label: String },

    #[error("invalid number: {input:?}")]
    InvalidNumber { input: String },
}

impl TimecodeError {
    pub fn format(input: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
        }
    }

    pub fn range(input: impl Into<String>) -> Self {
        Self::Range {
            input: input.into(),
        }
    }

    pub fn unknown_frame_rate(label: impl Into<String>) -> Self {
        Self::UnknownFrameRate {
            label: label.into(),
        }
    }

    pub fn invalid_number(input: impl Into<String>) -> Self {
        Self::InvalidNumber {
            input: input.into(),
        }
    }
}

/// Result type alias for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;
