//! SMPTE 12M string grammar: `[DD:]HH:MM:SS<sep>FF`.
//!
//! `<sep>` is `:` for non-drop rates and `;` for drop-frame rates; the
//! parser accepts either and leaves the rate decision to the caller.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{Result, TimecodeError};

/// Frame ceiling enforced by the grammar independently of the active rate.
pub const GENERIC_FRAME_CEILING: u32 = 30;

const TIMECODE_PATTERN: &str = r"^(?:(\d{2,}):)?(\d{2}):(\d{2}):(\d{2})[:;](\d{2})$";

fn timecode_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TIMECODE_PATTERN).unwrap())
}

/// Display segments of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimecodeFields {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl TimecodeFields {
    pub fn new(days: u32, hours: u32, minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Whether every segment is inside its clock bound and `frames` is below
    /// `frame_ceiling`.
    pub fn in_range(&self, frame_ceiling: u32) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60 && self.frames < frame_ceiling
    }

    /// Total displayed hours, counting each day as 24.
    pub fn total_hours(&self) -> i64 {
        i64::from(self.hours) + 24 * i64::from(self.days)
    }
}

/// Parse a timecode string, enforcing the generic frame ceiling of 30.
pub fn parse(input: &str) -> Result<TimecodeFields> {
    parse_bounded(input, GENERIC_FRAME_CEILING)
}

/// Parse a timecode string with an explicit frame ceiling.
///
/// Rates above 30 fps lift the ceiling to their own frame count; the
/// rate's exact limit is enforced again by the conversion engine.
pub fn parse_bounded(input: &str, frame_ceiling: u32) -> Result<TimecodeFields> {
    let Some(captures) = timecode_regex().captures(input) else {
        debug!(input, "rejected malformed timecode");
        return Err(TimecodeError::format(input));
    };

    let segment = |index: usize| -> Result<u32> {
        captures.get(index).map_or(Ok(0), |m| {
            m.as_str()
                .parse()
                .map_err(|_| TimecodeError::range(input))
        })
    };
    let fields = TimecodeFields {
        days: segment(1)?,
        hours: segment(2)?,
        minutes: segment(3)?,
        seconds: segment(4)?,
        frames: segment(5)?,
    };

    if !fields.in_range(frame_ceiling) {
        debug!(input, frame_ceiling, "timecode segment out of range");
        return Err(TimecodeError::range(input));
    }
    Ok(fields)
}

/// Check integer segments against the same bounds `parse_bounded` applies.
pub fn check_range(fields: &TimecodeFields, frame_ceiling: u32) -> Result<()> {
    if fields.in_range(frame_ceiling) {
        Ok(())
    } else {
        Err(TimecodeError::range(format(fields, false)))
    }
}

/// Whether `input` parses under the generic grammar.
pub fn validate(input: &str) -> bool {
    parse(input).is_ok()
}

/// Canonical SMPTE 12M spelling. The day segment is omitted when zero.
pub fn format(fields: &TimecodeFields, drop_frame: bool) -> String {
    let separator = if drop_frame { ';' } else { ':' };
    let TimecodeFields {
        days,
        hours,
        minutes,
        seconds,
        frames,
    } = *fields;

    if days > 0 {
        format!("{days:02}:{hours:02}:{minutes:02}:{seconds:02}{separator}{frames:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}{separator}{frames:02}")
    }
}
