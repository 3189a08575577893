//! Conversions between absolute time, frame counts, display segments and
//! 27 MHz clock ticks.
//!
//! One rate-parameterised implementation serves every entry in the rate
//! table. Drop-frame rates skip `dropped_frames` frame numbers at the start
//! of every minute not divisible by ten; the compensation is applied when
//! building a frame index from segments and inverted when decomposing a
//! frame count back into segments.

use tracing::trace;

use crate::decimal::Decimal;
use crate::error::{Result, TimecodeError};
use crate::grammar::{self, TimecodeFields, GENERIC_FRAME_CEILING};
use crate::rate::{SmpteFrameRate, PCR_TICKS_PER_SECOND};

/// 27 MHz system clock ticks per 90 kHz PCR base tick.
pub const TICKS_27MHZ_PER_PCR: i64 = 300;

/// Decimal places kept when turning a time into a frame count.
pub const FRAME_ROUNDING_PLACES: u32 = 7;

/// PCR base values wrap at 33 bits.
const PCR_WRAP: i64 = 1 << 33;

/// Parse `input` with the frame ceiling appropriate for `rate`.
pub fn parse_for_rate(input: &str, rate: SmpteFrameRate) -> Result<TimecodeFields> {
    let fields = grammar::parse_bounded(input, frame_ceiling(rate))?;
    check_frames(&fields, rate)?;
    Ok(fields)
}

/// Validate integer segments for `rate`.
pub fn check_fields(fields: &TimecodeFields, rate: SmpteFrameRate) -> Result<()> {
    grammar::check_range(fields, frame_ceiling(rate))?;
    check_frames(fields, rate)
}

fn frame_ceiling(rate: SmpteFrameRate) -> u32 {
    (rate.frames_per_second() as u32).max(GENERIC_FRAME_CEILING)
}

fn check_frames(fields: &TimecodeFields, rate: SmpteFrameRate) -> Result<()> {
    if i64::from(fields.frames) >= rate.frames_per_second() {
        return Err(TimecodeError::FrameOutOfRange {
            frames: fields.frames,
            rate,
        });
    }
    Ok(())
}

/// Frame index addressed by `fields`, including drop-frame compensation.
pub fn fields_to_frames(fields: &TimecodeFields, rate: SmpteFrameRate) -> i64 {
    let spec = rate.spec();
    let minutes = i64::from(fields.minutes);

    i64::from(fields.frames)
        + spec.frames_per_second * i64::from(fields.seconds)
        + spec.frames_per_minute * minutes
        + spec.dropped_frames * (minutes / 10)
        + spec.frames_per_hour * fields.total_hours()
}

/// Absolute time in seconds of the first instant of `fields`.
pub fn fields_to_absolute_time(fields: &TimecodeFields, rate: SmpteFrameRate) -> Decimal {
    frames_to_absolute_time(fields_to_frames(fields, rate), rate)
}

/// Parse a SMPTE 12M string and convert it to absolute time.
pub fn smpte12m_to_absolute_time(input: &str, rate: SmpteFrameRate) -> Result<Decimal> {
    let fields = parse_for_rate(input, rate)?;
    Ok(fields_to_absolute_time(&fields, rate))
}

/// Absolute time of frame `frames`.
pub fn frames_to_absolute_time(frames: i64, rate: SmpteFrameRate) -> Decimal {
    Decimal::from_integer(frames) * rate.spec().frame_duration()
}

/// Frame containing the instant `time`. Saturates at the `i64` range;
/// times held by a `TimeCode` are well inside it.
pub fn absolute_time_to_frames(time: Decimal, rate: SmpteFrameRate) -> i64 {
    (time * rate.spec().frames_per_wall_second())
        .round(FRAME_ROUNDING_PLACES)
        .floor()
        .to_i64()
}

/// Decompose a non-negative frame count into display segments.
///
/// Day counts past `u32::MAX` saturate. Frame counts of a `TimeCode` stay
/// below that.
pub fn frames_to_fields(frame_count: i64, rate: SmpteFrameRate) -> TimecodeFields {
    debug_assert!(frame_count >= 0, "negative frame count {frame_count}");
    let spec = rate.spec();
    let fps = spec.frames_per_second;

    let total_hours = frame_count / spec.frames_per_hour;
    let residual = frame_count - total_hours * spec.frames_per_hour;

    let (minutes, within_minute) = if spec.drop_frame {
        let nominal_minute = 60 * fps;
        let dropped = spec.dropped_frames;
        let minutes = (residual + dropped * (residual / nominal_minute)
            - dropped * (residual / (10 * nominal_minute)))
            / nominal_minute;
        let start = spec.frames_per_minute * minutes + dropped * (minutes / 10);
        (minutes, residual - start)
    } else {
        (
            residual / spec.frames_per_minute,
            residual % spec.frames_per_minute,
        )
    };

    TimecodeFields {
        days: u32::try_from(total_hours / 24).unwrap_or(u32::MAX),
        hours: (total_hours % 24) as u32,
        minutes: (minutes % 60) as u32,
        seconds: (within_minute / fps) as u32,
        frames: (within_minute % fps) as u32,
    }
}

/// Display segments of the frame containing `time`.
pub fn absolute_time_to_fields(time: Decimal, rate: SmpteFrameRate) -> TimecodeFields {
    frames_to_fields(absolute_time_to_frames(time, rate), rate)
}

/// Canonical SMPTE 12M string for `time`.
pub fn absolute_time_to_smpte12m(time: Decimal, rate: SmpteFrameRate) -> String {
    grammar::format(&absolute_time_to_fields(time, rate), rate.is_drop_frame())
}

#[inline]
pub fn ticks_27mhz_to_pcr(ticks_27mhz: i64) -> i64 {
    ticks_27mhz / TICKS_27MHZ_PER_PCR
}

pub fn pcr_to_absolute_time(ticks_pcr: i64) -> Decimal {
    Decimal::from_integer(ticks_pcr) / PCR_TICKS_PER_SECOND
}

pub fn ticks_27mhz_to_absolute_time(ticks_27mhz: i64) -> Decimal {
    pcr_to_absolute_time(ticks_27mhz_to_pcr(ticks_27mhz))
}

/// 90 kHz PCR base value for `time`, wrapped at 33 bits.
pub fn absolute_time_to_pcr(time: Decimal) -> i64 {
    (time * PCR_TICKS_PER_SECOND).floor().to_i64().rem_euclid(PCR_WRAP)
}

pub fn absolute_time_to_ticks_27mhz(time: Decimal) -> i64 {
    absolute_time_to_pcr(time) * TICKS_27MHZ_PER_PCR
}

/// SMPTE 12M string for a 27 MHz tick count.
///
/// Divides the PCR base directly by the rate's PCR ticks per frame instead
/// of going through absolute time; both paths address the same frame.
pub fn ticks_27mhz_to_smpte12m(ticks_27mhz: i64, rate: SmpteFrameRate) -> String {
    let spec = rate.spec();
    let ticks_pcr = ticks_27mhz_to_pcr(ticks_27mhz);
    let frames = (Decimal::from_integer(ticks_pcr) / spec.pcr_ticks_per_frame())
        .floor()
        .to_i64();
    trace!(ticks_27mhz, ticks_pcr, frames, %rate, "converted 27 MHz ticks");
    grammar::format(&frames_to_fields(frames, rate), spec.drop_frame)
}

/// 27 MHz tick count at the start of the frame addressed by `input`.
pub fn smpte12m_to_ticks_27mhz(input: &str, rate: SmpteFrameRate) -> Result<i64> {
    let fields = parse_for_rate(input, rate)?;
    let frames = fields_to_frames(&fields, rate);
    let ticks_pcr = (Decimal::from_integer(frames) * rate.spec().pcr_ticks_per_frame())
        .ceil()
        .to_i64();
    Ok(ticks_pcr * TICKS_27MHZ_PER_PCR)
}
