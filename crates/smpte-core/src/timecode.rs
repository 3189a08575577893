//! The `TimeCode` value type.
//!
//! A timecode is an exact absolute time in seconds tagged with the frame
//! rate used to display it. Arithmetic is checked against the rate's
//! 24 hour limit, and comparisons look only at the elapsed time, so
//! timecodes at different rates compare as real-world durations.
//!
//! Every constructor, including deserialization, goes through
//! [`TimeCode::from_time`], which bounds the elapsed time to
//! [`ABSOLUTE_TIME_LIMIT_SECONDS`] and snaps it onto a `1/TIME_GRID`
//! second grid. Frame indices, day counts and tick values derived from a
//! `TimeCode` therefore always fit their integer types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::convert::{self, FRAME_ROUNDING_PLACES};
use crate::decimal::Decimal;
use crate::error::{Result, TimecodeError};
use crate::grammar::{self, TimecodeFields};
use crate::rate::SmpteFrameRate;

/// Rate both operands are normalised to before comparing.
pub const REFERENCE_RATE: SmpteFrameRate = SmpteFrameRate::Smpte30;

/// Rate assumed by `FromStr` when the input has no `@rate` suffix.
pub const DEFAULT_RATE_LABEL: &str = "29.97";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Largest elapsed time, in seconds, a timecode can hold.
pub const ABSOLUTE_TIME_LIMIT_SECONDS: i64 = 1_000_000_000_000;

/// Frame durations, PCR ticks, nanoseconds and 18 place float inputs are
/// all whole multiples of `1/TIME_GRID` seconds.
const TIME_GRID: i128 = 9_000_000_000_000_000_000;

/// A SMPTE 12M timecode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "TimeCodeRepr", into = "TimeCodeRepr")]
pub struct TimeCode {
    /// Elapsed time in seconds.
    absolute_time: Decimal,
    frame_rate: SmpteFrameRate,
}

/// Wire form of [`TimeCode`]; decoding re-validates through `from_time`.
#[derive(Serialize, Deserialize)]
struct TimeCodeRepr {
    absolute_time: Decimal,
    frame_rate: SmpteFrameRate,
}

impl TryFrom<TimeCodeRepr> for TimeCode {
    type Error = TimecodeError;

    fn try_from(repr: TimeCodeRepr) -> Result<Self> {
        Self::from_time(repr.absolute_time, repr.frame_rate)
    }
}

impl From<TimeCode> for TimeCodeRepr {
    fn from(tc: TimeCode) -> Self {
        Self {
            absolute_time: tc.absolute_time,
            frame_rate: tc.frame_rate,
        }
    }
}

/// `value · factor` from a float, failing instead of overflowing.
fn scaled_seconds(value: f64, factor: i64) -> Result<Decimal> {
    Decimal::try_from(value)?
        .checked_mul(Decimal::from_integer(factor))
        .ok_or_else(|| TimecodeError::invalid_number(value.to_string()))
}

impl TimeCode {
    fn new_unchecked(absolute_time: Decimal, frame_rate: SmpteFrameRate) -> Self {
        Self {
            absolute_time,
            frame_rate,
        }
    }

    /// Timecode `00:00:00:00` at `rate`.
    pub fn zero(rate: SmpteFrameRate) -> Self {
        Self::new_unchecked(Decimal::ZERO, rate)
    }

    /// Largest value accepted by checked arithmetic at `rate`.
    pub fn max_value(rate: SmpteFrameRate) -> Self {
        Self::new_unchecked(rate.max_value(), rate)
    }

    /// Parse a SMPTE 12M string (`[DD:]HH:MM:SS:FF` or `...;FF`) at `rate`.
    pub fn from_timecode(input: &str, rate: SmpteFrameRate) -> Result<Self> {
        let time = convert::smpte12m_to_absolute_time(input, rate)?;
        Self::from_time(time, rate)
    }

    pub fn from_hours(
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u32,
        rate: SmpteFrameRate,
    ) -> Result<Self> {
        Self::from_days(0, hours, minutes, seconds, frames, rate)
    }

    pub fn from_days(
        days: u32,
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u32,
        rate: SmpteFrameRate,
    ) -> Result<Self> {
        Self::from_fields(
            &TimecodeFields::new(days, hours, minutes, seconds, frames),
            rate,
        )
    }

    /// Build from display segments, validating them against `rate`.
    pub fn from_fields(fields: &TimecodeFields, rate: SmpteFrameRate) -> Result<Self> {
        convert::check_fields(fields, rate)?;
        Self::from_time(convert::fields_to_absolute_time(fields, rate), rate)
    }

    /// Build from an exact elapsed time.
    ///
    /// Negative values fail with `Underflow` and values above
    /// [`ABSOLUTE_TIME_LIMIT_SECONDS`] with `Overflow`. The time is snapped
    /// to the nearest `1/TIME_GRID` second, which leaves frame boundaries,
    /// ticks and nanoseconds unchanged.
    pub fn from_time(absolute_time: Decimal, rate: SmpteFrameRate) -> Result<Self> {
        if absolute_time.is_negative() {
            debug!(%absolute_time, "rejected negative absolute time");
            return Err(TimecodeError::Underflow {
                value: absolute_time,
            });
        }
        let limit = Decimal::from_integer(ABSOLUTE_TIME_LIMIT_SECONDS);
        if absolute_time > limit {
            debug!(%absolute_time, %limit, "rejected absolute time past the limit");
            return Err(TimecodeError::Overflow {
                value: absolute_time,
                max: limit,
            });
        }
        let snapped = absolute_time
            .checked_quantize(TIME_GRID)
            .ok_or_else(|| TimecodeError::invalid_number(absolute_time.to_string()))?;
        Ok(Self::new_unchecked(snapped, rate))
    }

    /// Build from seconds given as a float. The float's shortest decimal
    /// spelling is used, so `10.5` is exactly ten and a half seconds.
    pub fn from_seconds(seconds: f64, rate: SmpteFrameRate) -> Result<Self> {
        Self::from_time(Decimal::try_from(seconds)?, rate)
    }

    pub fn from_total_minutes(minutes: f64, rate: SmpteFrameRate) -> Result<Self> {
        Self::from_time(scaled_seconds(minutes, SECONDS_PER_MINUTE)?, rate)
    }

    pub fn from_total_hours(hours: f64, rate: SmpteFrameRate) -> Result<Self> {
        Self::from_time(scaled_seconds(hours, SECONDS_PER_HOUR)?, rate)
    }

    pub fn from_total_days(days: f64, rate: SmpteFrameRate) -> Result<Self> {
        Self::from_time(scaled_seconds(days, SECONDS_PER_DAY)?, rate)
    }

    /// Start of frame `frames` at `rate`.
    pub fn from_frames(frames: i64, rate: SmpteFrameRate) -> Result<Self> {
        Self::from_time(convert::frames_to_absolute_time(frames, rate), rate)
    }

    /// Build from a 27 MHz system clock tick count.
    pub fn from_ticks_27mhz(ticks_27mhz: i64, rate: SmpteFrameRate) -> Result<Self> {
        Self::from_time(convert::ticks_27mhz_to_absolute_time(ticks_27mhz), rate)
    }

    /// Build from a wall-clock duration, keeping nanosecond precision.
    pub fn from_duration(duration: Duration, rate: SmpteFrameRate) -> Result<Self> {
        let nanos = i128::from(duration.as_secs()) * 1_000_000_000
            + i128::from(duration.subsec_nanos());
        Self::from_time(Decimal::new(nanos, 1_000_000_000), rate)
    }

    /// Same elapsed time displayed at another rate.
    pub fn with_rate(self, rate: SmpteFrameRate) -> Self {
        Self::new_unchecked(self.absolute_time, rate)
    }

    #[inline]
    pub fn absolute_time(&self) -> Decimal {
        self.absolute_time
    }

    #[inline]
    pub fn frame_rate(&self) -> SmpteFrameRate {
        self.frame_rate
    }

    /// Elapsed seconds rounded to 7 decimal places.
    pub fn total_seconds(&self) -> f64 {
        self.absolute_time.round(FRAME_ROUNDING_PLACES).to_f64()
    }

    /// Elapsed seconds at full precision.
    pub fn total_seconds_precise(&self) -> f64 {
        self.absolute_time.to_f64()
    }

    /// Number of whole frames elapsed.
    pub fn total_frames(&self) -> i64 {
        convert::absolute_time_to_frames(self.absolute_time, self.frame_rate)
    }

    /// Elapsed minutes counted in nominal frame minutes (`60 · fps` frames).
    pub fn total_minutes(&self) -> f64 {
        let frames_per_minute = SECONDS_PER_MINUTE * self.frame_rate.frames_per_second();
        self.total_frames() as f64 / frames_per_minute as f64
    }

    /// Elapsed hours counted in displayed hours of the rate.
    pub fn total_hours(&self) -> f64 {
        self.total_frames() as f64 / self.frame_rate.spec().frames_per_hour as f64
    }

    pub fn total_days(&self) -> f64 {
        self.total_frames() as f64 / self.frame_rate.spec().frames_per_day() as f64
    }

    /// Display segments of the current frame.
    pub fn fields(&self) -> TimecodeFields {
        convert::absolute_time_to_fields(self.absolute_time, self.frame_rate)
    }

    pub fn days(&self) -> u32 {
        self.fields().days
    }

    pub fn hours(&self) -> u32 {
        self.fields().hours
    }

    pub fn minutes(&self) -> u32 {
        self.fields().minutes
    }

    pub fn seconds(&self) -> u32 {
        self.fields().seconds
    }

    pub fn frames(&self) -> u32 {
        self.fields().frames
    }

    /// 90 kHz PCR base value, wrapped at 33 bits.
    pub fn to_ticks_pcr(&self) -> i64 {
        convert::absolute_time_to_pcr(self.absolute_time)
    }

    /// 27 MHz system clock value.
    pub fn to_ticks_27mhz(&self) -> i64 {
        convert::absolute_time_to_ticks_27mhz(self.absolute_time)
    }

    /// Sum at `self`'s rate.
    ///
    /// Fails only when both the exact sum and its 7 place rounding exceed
    /// the rate's maximum value. Operands are bounded by `from_time`, so the
    /// exact sum always fits.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        let value = self.absolute_time + rhs.absolute_time;
        let max = self.frame_rate.max_value();
        if value > max && value.round(FRAME_ROUNDING_PLACES) > max {
            debug!(%value, %max, rate = %self.frame_rate, "timecode addition overflowed");
            return Err(TimecodeError::Overflow { value, max });
        }
        Ok(Self::new_unchecked(value, self.frame_rate))
    }

    /// Difference at `self`'s rate. Fails when the rounded result is negative.
    /// A difference that is negative only below the rounding precision
    /// becomes zero.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        let value = self.absolute_time - rhs.absolute_time;
        if value.round(FRAME_ROUNDING_PLACES).is_negative() {
            debug!(%value, rate = %self.frame_rate, "timecode subtraction underflowed");
            return Err(TimecodeError::Underflow { value });
        }
        let value = if value.is_negative() { Decimal::ZERO } else { value };
        Ok(Self::new_unchecked(value, self.frame_rate))
    }

    /// Apply `op` in place, leaving `self` untouched on failure.
    fn apply(&mut self, op: impl FnOnce(&Self) -> Result<Self>) -> Result<()> {
        *self = op(self)?;
        Ok(())
    }

    pub fn add_seconds(&mut self, seconds: f64) -> Result<()> {
        let delta = Self::from_seconds(seconds, self.frame_rate)?;
        self.apply(|tc| tc.checked_add(&delta))
    }

    pub fn add_frames(&mut self, frames: i64) -> Result<()> {
        let delta = Self::from_frames(frames, self.frame_rate)?;
        self.apply(|tc| tc.checked_add(&delta))
    }

    /// Add a timecode string parsed at `self`'s rate.
    pub fn add_timecode(&mut self, input: &str) -> Result<()> {
        let delta = Self::from_timecode(input, self.frame_rate)?;
        self.apply(|tc| tc.checked_add(&delta))
    }

    pub fn sub_seconds(&mut self, seconds: f64) -> Result<()> {
        let delta = Self::from_seconds(seconds, self.frame_rate)?;
        self.apply(|tc| tc.checked_sub(&delta))
    }

    pub fn sub_frames(&mut self, frames: i64) -> Result<()> {
        let delta = Self::from_frames(frames, self.frame_rate)?;
        self.apply(|tc| tc.checked_sub(&delta))
    }

    pub fn sub_timecode(&mut self, input: &str) -> Result<()> {
        let delta = Self::from_timecode(input, self.frame_rate)?;
        self.apply(|tc| tc.checked_sub(&delta))
    }

    fn comparison_key(&self) -> Decimal {
        self.with_rate(REFERENCE_RATE)
            .absolute_time
            .round(FRAME_ROUNDING_PLACES)
    }
}

impl Add for TimeCode {
    type Output = Result<TimeCode>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs)
    }
}

impl Sub for TimeCode {
    type Output = Result<TimeCode>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs)
    }
}

impl PartialEq for TimeCode {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for TimeCode {}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparison_key().cmp(&other.comparison_key())
    }
}

impl Hash for TimeCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&grammar::format(
            &self.fields(),
            self.frame_rate.is_drop_frame(),
        ))
    }
}

/// Parses `HH:MM:SS:FF@<rate>`. The rate suffix defaults to 29.97 and the
/// `;` separator selects the drop-frame variant.
impl FromStr for TimeCode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let (timecode, label) = s.rsplit_once('@').unwrap_or((s, DEFAULT_RATE_LABEL));
        let rate = SmpteFrameRate::from_label(label, timecode.contains(';'))?;
        Self::from_timecode(timecode, rate)
    }
}
