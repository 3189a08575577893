//! Frame rate registry.
//!
//! Every rate-dependent constant used by parsing, formatting and arithmetic
//! is read from one static table, so the three paths can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Decimal;
use crate::error::{Result, TimecodeError};

/// PCR base clock ticks per second (90 kHz).
pub const PCR_TICKS_PER_SECOND: i64 = 90_000;

/// SMPTE frame rates supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SmpteFrameRate {
    /// 23.98 fps, also known as Film Sync.
    Smpte2398,
    /// 24 fps film.
    Smpte24,
    /// 25 fps PAL.
    Smpte25,
    /// 29.97 fps drop-frame, used by NTSC television.
    Smpte2997Drop,
    /// 29.97 fps non-drop-frame.
    Smpte2997NonDrop,
    /// 30 fps.
    #[default]
    Smpte30,
    /// 50 fps PAL high frame rate.
    Smpte50,
    /// 59.94 fps drop-frame.
    Smpte5994Drop,
    /// 59.94 fps non-drop-frame.
    Smpte5994NonDrop,
    /// 60 fps.
    Smpte60,
}

/// Static per-rate parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRateSpec {
    /// Nominal rate as written after `@` in a timecode string.
    pub label: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// Integer frames per displayed second.
    pub frames_per_second: i64,
    /// Frames per displayed minute, drop-adjusted.
    pub frames_per_minute: i64,
    /// Frames per displayed hour, drop-adjusted.
    pub frames_per_hour: i64,
    /// Frame numbers skipped at each minute not divisible by ten.
    pub dropped_frames: i64,
    pub drop_frame: bool,
    /// Runs at `1000/1001` of the nominal rate.
    pub pull_down: bool,
    pcr_ticks_per_frame: (i64, i64),
    max_value: (i64, i64),
}

impl FrameRateSpec {
    const fn new(
        label: &'static str,
        name: &'static str,
        frames_per_second: i64,
        dropped_frames: i64,
        pull_down: bool,
    ) -> Self {
        let frames_per_minute = 60 * frames_per_second - dropped_frames;
        let frames_per_hour = 60 * frames_per_minute + 6 * dropped_frames;
        let scale = if pull_down { 1001 } else { 1000 };
        Self {
            label,
            name,
            frames_per_second,
            frames_per_minute,
            frames_per_hour,
            dropped_frames,
            drop_frame: dropped_frames > 0,
            pull_down,
            pcr_ticks_per_frame: (PCR_TICKS_PER_SECOND * scale, frames_per_second * 1000),
            max_value: (
                (24 * frames_per_hour - 1) * scale,
                frames_per_second * 1000,
            ),
        }
    }

    /// Wall-clock duration of a single frame in seconds.
    pub fn frame_duration(&self) -> Decimal {
        let scale = if self.pull_down { 1001 } else { 1000 };
        Decimal::new(scale, i128::from(self.frames_per_second) * 1000)
    }

    /// Frames per wall-clock second (`fps · 1000/1001` for pull-down rates).
    pub fn frames_per_wall_second(&self) -> Decimal {
        Decimal::ONE / self.frame_duration()
    }

    /// 90 kHz PCR ticks per frame, e.g. 3003 at 29.97 or 3753.75 at 23.98.
    pub fn pcr_ticks_per_frame(&self) -> Decimal {
        let (numerator, denominator) = self.pcr_ticks_per_frame;
        Decimal::new(i128::from(numerator), i128::from(denominator))
    }

    /// Last representable instant before the 24 hour rollover.
    pub fn max_value(&self) -> Decimal {
        let (numerator, denominator) = self.max_value;
        Decimal::new(i128::from(numerator), i128::from(denominator))
    }

    /// Frames in a 24 hour day.
    pub fn frames_per_day(&self) -> i64 {
        24 * self.frames_per_hour
    }
}

static RATE_TABLE: [FrameRateSpec; 10] = [
    FrameRateSpec::new("23.98", "23.98 fps", 24, 0, true),
    FrameRateSpec::new("24", "24 fps", 24, 0, false),
    FrameRateSpec::new("25", "25 fps", 25, 0, false),
    FrameRateSpec::new("29.97", "29.97 fps drop-frame", 30, 2, true),
    FrameRateSpec::new("29.97", "29.97 fps non-drop", 30, 0, true),
    FrameRateSpec::new("30", "30 fps", 30, 0, false),
    FrameRateSpec::new("50", "50 fps", 50, 0, false),
    FrameRateSpec::new("59.94", "59.94 fps drop-frame", 60, 4, true),
    FrameRateSpec::new("59.94", "59.94 fps non-drop", 60, 0, true),
    FrameRateSpec::new("60", "60 fps", 60, 0, false),
];

impl SmpteFrameRate {
    /// All supported rates, in table order.
    pub const ALL: [Self; 10] = [
        Self::Smpte2398,
        Self::Smpte24,
        Self::Smpte25,
        Self::Smpte2997Drop,
        Self::Smpte2997NonDrop,
        Self::Smpte30,
        Self::Smpte50,
        Self::Smpte5994Drop,
        Self::Smpte5994NonDrop,
        Self::Smpte60,
    ];

    /// Look up the static parameters for this rate.
    #[inline]
    pub fn spec(self) -> &'static FrameRateSpec {
        &RATE_TABLE[self as usize]
    }

    #[inline]
    pub fn is_drop_frame(self) -> bool {
        self.spec().drop_frame
    }

    #[inline]
    pub fn frames_per_second(self) -> i64 {
        self.spec().frames_per_second
    }

    #[inline]
    pub fn max_value(self) -> Decimal {
        self.spec().max_value()
    }

    /// Resolve a nominal label such as `"29.97"` together with the
    /// drop-frame flag implied by the timecode separator.
    ///
    /// The flag only picks between variants sharing a label (29.97 and
    /// 59.94). A label with a single variant resolves to it either way.
    pub fn from_label(label: &str, drop_frame: bool) -> Result<Self> {
        let label = label.trim();
        let mut fallback = None;
        for rate in Self::ALL.into_iter().filter(|rate| rate.spec().label == label) {
            if rate.is_drop_frame() == drop_frame {
                return Ok(rate);
            }
            fallback = Some(rate);
        }
        fallback.ok_or_else(|| TimecodeError::unknown_frame_rate(label))
    }

    /// Map a floating rate onto the closest non-drop member by its integer
    /// part, e.g. `29.97 -> Smpte2997NonDrop`, `50.0 -> Smpte50`.
    pub fn from_fps(rate: f64) -> Option<Self> {
        match rate.floor() as i64 {
            23 => Some(Self::Smpte2398),
            24 => Some(Self::Smpte24),
            25 => Some(Self::Smpte25),
            29 => Some(Self::Smpte2997NonDrop),
            30 => Some(Self::Smpte30),
            50 => Some(Self::Smpte50),
            59 => Some(Self::Smpte5994NonDrop),
            60 => Some(Self::Smpte60),
            _ => None,
        }
    }
}

impl fmt::Display for SmpteFrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}
