use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::fmt;

use super::promotion::{digit_count, rational_to_real, ten_pow};
use super::NumericValue;

/// Significant digits used by `Display` for rationals and reals.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

impl NumericValue {
    /// Renders the value for output. Integers are written verbatim; rationals
    /// and reals are rounded half-up to `significant_digits` significant digits
    /// and written in plain (non-scientific) notation.
    pub fn format(&self, significant_digits: usize) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Rational(v) => format_decimal(&rational_to_real(v), significant_digits),
            Self::Real(v) => format_decimal(v, significant_digits),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_SIGNIFICANT_DIGITS))
    }
}

fn format_decimal(value: &BigDecimal, significant_digits: usize) -> String {
    let digits = significant_digits.max(1) as u64;
    let (mantissa, mut scale) = value.as_bigint_and_exponent();

    if mantissa.is_zero() {
        return render_plain(false, &"0".repeat(digits as usize), digits as i64 - 1);
    }

    let negative = mantissa.is_negative();
    let mut magnitude = mantissa.abs();
    let width = digit_count(&magnitude);

    if width > digits {
        let dropped = width - digits;
        magnitude = round_half_up(&magnitude, dropped);
        scale -= dropped as i64;
        // 9.99.. can round up to 10.0.., one digit wider than requested
        if digit_count(&magnitude) > digits {
            magnitude /= BigInt::from(10);
            scale -= 1;
        }
    } else if width < digits {
        let padding = digits - width;
        magnitude *= ten_pow(padding);
        scale += padding as i64;
    }

    render_plain(negative, &magnitude.to_string(), scale)
}

fn round_half_up(magnitude: &BigInt, dropped_digits: u64) -> BigInt {
    let divisor = ten_pow(dropped_digits);
    let quotient = magnitude / &divisor;
    let remainder = magnitude % &divisor;
    if remainder * BigInt::from(2) >= divisor {
        quotient + BigInt::from(1)
    } else {
        quotient
    }
}

/// Writes `digits * 10^-scale` without an exponent.
fn render_plain(negative: bool, digits: &str, scale: i64) -> String {
    let body = if scale <= 0 {
        format!("{}{}", digits, "0".repeat(scale.unsigned_abs() as usize))
    } else {
        let scale = scale as usize;
        if digits.len() > scale {
            let (whole, fraction) = digits.split_at(digits.len() - scale);
            format!("{whole}.{fraction}")
        } else {
            format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}
