//! SMPTE Core - broadcast timecode conversion and arithmetic
//!
//! This crate converts between three views of the same instant:
//! - SMPTE 12M strings (`HH:MM:SS:FF`, `HH:MM:SS;FF` for drop-frame)
//! - Exact absolute time in seconds
//! - Integer frame counts and 27 MHz / 90 kHz clock ticks
//!
//! All rate-dependent constants come from one static table, and all time
//! values are exact rationals, so hours of per-frame arithmetic never drift.

pub mod convert;
pub mod decimal;
pub mod error;
pub mod grammar;
pub mod rate;
pub mod timecode;

pub use convert::{smpte12m_to_ticks_27mhz, ticks_27mhz_to_smpte12m};
pub use decimal::Decimal;
pub use error::{Result, TimecodeError};
pub use grammar::TimecodeFields;
pub use rate::{FrameRateSpec, SmpteFrameRate};
pub use timecode::TimeCode;
