//! Exact decimal arithmetic for absolute time values.
//!
//! Uses rational numbers to avoid floating-point accumulation errors:
//! every value is a reduced `i128` fraction, so thousands of per-frame
//! additions over a full day of media land exactly on frame boundaries.
//! All operations return new values; operands are never mutated.
//!
//! Like the integer operators, `+ - * /` panic when a result does not fit
//! the 128-bit representation; the `checked_*` methods return `None`.

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::{Result, TimecodeError};

/// Fractional digits printed for values without a terminating expansion.
const DISPLAY_PLACES: usize = 20;

/// Rounding precision is capped here; `10^38` is the largest power of ten
/// an `i128` holds.
pub const MAX_ROUND_PLACES: u32 = 38;

/// Fractional digits kept when converting from `f64`.
pub const FLOAT_PLACES: u32 = 18;

/// An exact decimal value backed by a 128-bit rational.
///
/// Serialized as a `[numerator, denominator]` pair; deserialization
/// reduces the pair and rejects a zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Ratio<i128>", into = "Ratio<i128>")]
pub struct Decimal {
    value: Ratio<i128>,
}

impl Decimal {
    /// Zero constant.
    pub const ZERO: Self = Self {
        value: Ratio::new_raw(0, 1),
    };

    /// One constant.
    pub const ONE: Self = Self {
        value: Ratio::new_raw(1, 1),
    };

    /// Create a value equal to `numerator / denominator`.
    ///
    /// Panics if `denominator` is zero.
    #[inline]
    pub fn new(numerator: i128, denominator: i128) -> Self {
        Self {
            value: Ratio::new(numerator, denominator),
        }
    }

    #[inline]
    pub fn from_integer(value: i64) -> Self {
        Self {
            value: Ratio::from_integer(i128::from(value)),
        }
    }

    #[inline]
    pub fn numerator(self) -> i128 {
        *self.value.numer()
    }

    #[inline]
    pub fn denominator(self) -> i128 {
        *self.value.denom()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        *self.value.numer() == 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        *self.value.numer() < 0
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Round half away from zero at `places` decimal places, capped at
    /// [`MAX_ROUND_PLACES`]. Only the fractional part is scaled, so large
    /// whole values round without overflow.
    pub fn round(self, places: u32) -> Self {
        if self.value.is_integer() {
            return self;
        }
        let scale = 10i128.pow(places.min(MAX_ROUND_PLACES));
        let fraction = (self.value.fract() * scale).round() / scale;
        Self {
            value: self.value.trunc() + fraction,
        }
    }

    /// [`Decimal::round`] returning `None` instead of overflowing.
    pub fn checked_round(self, places: u32) -> Option<Self> {
        if self.value.is_integer() {
            return Some(self);
        }
        let scale = Ratio::from_integer(10i128.pow(places.min(MAX_ROUND_PLACES)));
        let fraction = self.value.fract().checked_mul(&scale)?.round() / scale;
        Some(Self {
            value: self.value.trunc().checked_add(&fraction)?,
        })
    }

    /// Nearest multiple of `1 / denominator`, rounding half away from zero.
    /// Values already on that grid are returned unchanged.
    pub fn checked_quantize(self, denominator: i128) -> Option<Self> {
        if denominator <= 0 {
            return None;
        }
        if denominator % self.denominator() == 0 {
            return Some(self);
        }
        let scaled = self.value.checked_mul(&Ratio::from_integer(denominator))?;
        Some(Self::new(scaled.round().to_integer(), denominator))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            value: self.value.checked_add(&rhs.value)?,
        })
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Some(Self {
            value: self.value.checked_sub(&rhs.value)?,
        })
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Some(Self {
            value: self.value.checked_mul(&rhs.value)?,
        })
    }

    /// `None` on overflow or division by zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        Some(Self {
            value: self.value.checked_div(&rhs.value)?,
        })
    }

    /// Largest integer value not greater than `self`.
    #[inline]
    pub fn floor(self) -> Self {
        Self {
            value: self.value.floor(),
        }
    }

    /// Smallest integer value not less than `self`.
    #[inline]
    pub fn ceil(self) -> Self {
        Self {
            value: self.value.ceil(),
        }
    }

    /// Drop the fractional part.
    #[inline]
    pub fn trunc(self) -> Self {
        Self {
            value: self.value.trunc(),
        }
    }

    /// Integer part as `i64`, saturating at the bounds of the type.
    pub fn to_i64(self) -> i64 {
        let whole = self.value.to_integer();
        i64::try_from(whole).unwrap_or(if whole < 0 { i64::MIN } else { i64::MAX })
    }

    /// Integer part as `i32`, saturating at the bounds of the type.
    pub fn to_i32(self) -> i32 {
        let whole = self.value.to_integer();
        i32::try_from(whole).unwrap_or(if whole < 0 { i32::MIN } else { i32::MAX })
    }

    /// Convert to f64. May lose precision.
    #[inline]
    pub fn to_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from_integer(i64::from(value))
    }
}

/// Floats convert through their shortest round-trip spelling, so `0.1`
/// becomes exactly `1/10` rather than the nearest binary fraction. The
/// result is rounded to [`FLOAT_PLACES`] fractional digits.
impl TryFrom<f64> for Decimal {
    type Error = TimecodeError;

    fn try_from(value: f64) -> Result<Self> {
        let invalid = || TimecodeError::invalid_number(value.to_string());
        if !value.is_finite() {
            return Err(invalid());
        }
        // Rounds to zero at FLOAT_PLACES.
        if value.abs() < 1e-21 {
            return Ok(Self::ZERO);
        }
        let parsed: Self = value.to_string().parse()?;
        parsed.checked_round(FLOAT_PLACES).ok_or_else(invalid)
    }
}

impl TryFrom<Ratio<i128>> for Decimal {
    type Error = TimecodeError;

    fn try_from(value: Ratio<i128>) -> Result<Self> {
        let (numerator, denominator) = value.into_raw();
        if denominator == 0 {
            return Err(TimecodeError::invalid_number(format!(
                "{numerator}/{denominator}"
            )));
        }
        Ok(Self::new(numerator, denominator))
    }
}

impl From<Decimal> for Ratio<i128> {
    fn from(value: Decimal) -> Self {
        value.value
    }
}

impl FromStr for Decimal {
    type Err = TimecodeError;

    /// Parse a decimal literal such as `86399.9666`, `-1.5` or `2.5e3`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimecodeError::invalid_number(s);
        let literal = s.trim();

        let (negative, body) = match literal.as_bytes().first() {
            Some(b'-') => (true, &literal[1..]),
            Some(b'+') => (false, &literal[1..]),
            _ => (false, literal),
        };
        let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent: i32 = body[pos + 1..].parse().map_err(|_| invalid())?;
                (&body[..pos], exponent)
            }
            None => (body, 0),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let mut numerator: i128 = 0;
        for byte in whole.bytes().chain(fraction.bytes()) {
            if !byte.is_ascii_digit() {
                return Err(invalid());
            }
            numerator = numerator
                .checked_mul(10)
                .and_then(|n| n.checked_add(i128::from(byte - b'0')))
                .ok_or_else(invalid)?;
        }

        let fraction_digits = i32::try_from(fraction.len()).map_err(|_| invalid())?;
        let scale = exponent.checked_sub(fraction_digits).ok_or_else(invalid)?;
        let power = 10i128
            .checked_pow(scale.unsigned_abs())
            .ok_or_else(invalid)?;
        let value = if scale >= 0 {
            Ratio::from_integer(numerator.checked_mul(power).ok_or_else(invalid)?)
        } else {
            Ratio::new(numerator, power)
        };

        Ok(Self {
            value: if negative { -value } else { value },
        })
    }
}

impl Add for Decimal {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl Sub for Decimal {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
        }
    }
}

impl Mul for Decimal {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
        }
    }
}

impl Div for Decimal {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self {
            value: self.value / rhs.value,
        }
    }
}

impl Mul<i64> for Decimal {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self {
            value: self.value * i128::from(rhs),
        }
    }
}

impl Div<i64> for Decimal {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        Self {
            value: self.value / i128::from(rhs),
        }
    }
}

impl Neg for Decimal {
    type Output = Self;
    fn neg(self) -> Self {
        Self { value: -self.value }
    }
}

/// Canonical decimal spelling. Terminating values print exactly; others
/// are cut at 20 fractional digits.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numerator = *self.value.numer();
        let denominator = self.value.denom().unsigned_abs();
        let magnitude = numerator.unsigned_abs();

        let mut digits = String::new();
        let mut remainder = magnitude % denominator;
        while remainder != 0 && digits.len() < DISPLAY_PLACES {
            let Some(scaled) = remainder.checked_mul(10) else {
                break;
            };
            digits.push(char::from(b'0' + (scaled / denominator) as u8));
            remainder = scaled % denominator;
        }
        let digits = digits.trim_end_matches('0');

        if numerator < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", magnitude / denominator)?;
        if !digits.is_empty() {
            write!(f, ".{digits}")?;
        }
        Ok(())
    }
}
