use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use thiserror::Error;

use super::promotion::{digit_count, rational_to_real, ten_pow, unify, Operands, Precision};

/// Reals within `10^-REAL_TOLERANCE_EXPONENT` of each other, relative to the
/// larger magnitude, are equal.
pub const REAL_TOLERANCE_EXPONENT: i64 = 12;

/// Fractional digits produced by real division beyond the divisor's width.
const REAL_DIVISION_DIGITS: u64 = 50;

/// Largest exponent magnitude accepted by [`NumericValue::pow`].
const MAX_EXPONENT: i64 = 4096;

/// Conditions raised by numeric operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("exponent {0} is outside the supported range")]
    ExponentOutOfRange(String),

    #[error("result is not a finite real number")]
    NotRepresentable,
}

/// A metric magnitude. See the [module documentation](super) for the
/// promotion and equality rules.
#[derive(Debug, Clone)]
pub enum NumericValue {
    Integer(BigInt),
    Rational(BigRational),
    Real(BigDecimal),
}

impl NumericValue {
    /// Integer value.
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    /// Exact fraction `numer / denom`, reduced to lowest terms. The result stays
    /// rational even when `denom` divides `numer`.
    pub fn rational(
        numer: impl Into<BigInt>,
        denom: impl Into<BigInt>,
    ) -> Result<Self, NumericError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::Rational(BigRational::new(numer.into(), denom)))
    }

    /// Real value from a finite `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is NaN or infinite. Use [`NumericValue::try_of`] for
    /// untrusted input.
    pub fn of(value: f64) -> Self {
        match Self::try_of(value) {
            Ok(real) => real,
            Err(_) => panic!("NumericValue::of called with non-finite value {value}"),
        }
    }

    /// Real value from an `f64`, rejecting NaN and infinities.
    pub fn try_of(value: f64) -> Result<Self, NumericError> {
        if !value.is_finite() {
            return Err(NumericError::NotRepresentable);
        }
        BigDecimal::from_f64(value)
            .map(Self::Real)
            .ok_or(NumericError::NotRepresentable)
    }

    pub fn zero() -> Self {
        Self::Integer(BigInt::zero())
    }

    pub fn precision(&self) -> Precision {
        match self {
            Self::Integer(_) => Precision::Integer,
            Self::Rational(_) => Precision::Rational,
            Self::Real(_) => Precision::Real,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(v) => v.is_zero(),
            Self::Rational(v) => v.is_zero(),
            Self::Real(v) => v.is_zero(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(v) => v.is_negative(),
            Self::Rational(v) => v.is_negative(),
            Self::Real(v) => v.is_negative(),
        }
    }

    pub fn plus(&self, other: &Self) -> Self {
        match unify(self, other) {
            Operands::Integers(a, b) => Self::Integer(a + b),
            Operands::Rationals(a, b) => Self::Rational(a + b),
            Operands::Reals(a, b) => Self::Real(a + b),
        }
    }

    pub fn minus(&self, other: &Self) -> Self {
        match unify(self, other) {
            Operands::Integers(a, b) => Self::Integer(a - b),
            Operands::Rationals(a, b) => Self::Rational(a - b),
            Operands::Reals(a, b) => Self::Real(a - b),
        }
    }

    pub fn times(&self, other: &Self) -> Self {
        match unify(self, other) {
            Operands::Integers(a, b) => Self::Integer(a * b),
            Operands::Rationals(a, b) => Self::Rational(a * b),
            Operands::Reals(a, b) => Self::Real(a * b),
        }
    }

    /// Division. Two integers always divide into a rational; a zero divisor in
    /// any representation is [`NumericError::DivisionByZero`].
    pub fn divide(&self, other: &Self) -> Result<Self, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(match unify(self, other) {
            Operands::Integers(a, b) => Self::Rational(BigRational::new(a, b)),
            Operands::Rationals(a, b) => Self::Rational(a / b),
            Operands::Reals(a, b) => Self::Real(real_divide(&a, &b)),
        })
    }

    /// Raises `self` to `exponent`.
    ///
    /// Integer exponents are exact: a non-negative power of an integer stays an
    /// integer, a negative one becomes a rational. Rational or real exponents
    /// go through `f64`, the only case where precision is given up.
    pub fn pow(&self, exponent: &Self) -> Result<Self, NumericError> {
        let Self::Integer(exponent) = exponent else {
            return self.approximate_pow(exponent);
        };
        let power = exponent
            .to_i64()
            .filter(|e| e.abs() <= MAX_EXPONENT)
            .ok_or_else(|| NumericError::ExponentOutOfRange(exponent.to_string()))?;
        let magnitude = power.unsigned_abs() as u32;

        if power < 0 && self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        Ok(match self {
            Self::Integer(base) if power >= 0 => Self::Integer(base.pow(magnitude)),
            Self::Integer(base) => {
                Self::Rational(BigRational::new(BigInt::one(), base.pow(magnitude)))
            }
            Self::Rational(base) => {
                let numer = base.numer().pow(magnitude);
                let denom = base.denom().pow(magnitude);
                if power >= 0 {
                    Self::Rational(BigRational::new(numer, denom))
                } else {
                    Self::Rational(BigRational::new(denom, numer))
                }
            }
            Self::Real(base) => {
                let (mantissa, scale) = base.as_bigint_and_exponent();
                let raised = BigDecimal::new(mantissa.pow(magnitude), scale * i64::from(magnitude));
                if power >= 0 {
                    Self::Real(raised)
                } else {
                    Self::Real(real_divide(&BigDecimal::one(), &raised))
                }
            }
        })
    }

    fn approximate_pow(&self, exponent: &Self) -> Result<Self, NumericError> {
        let result = self.to_f64()?.powf(exponent.to_f64()?);
        Self::try_of(result)
    }

    pub fn abs(&self) -> Self {
        match self {
            Self::Integer(v) => Self::Integer(v.abs()),
            Self::Rational(v) => Self::Rational(v.abs()),
            Self::Real(v) => Self::Real(v.abs()),
        }
    }

    pub fn negate(&self) -> Self {
        match self {
            Self::Integer(v) => Self::Integer(-v.clone()),
            Self::Rational(v) => Self::Rational(-v.clone()),
            Self::Real(v) => Self::Real(-v.clone()),
        }
    }

    /// Total comparison after promotion. Reals within tolerance are `Equal`.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        match unify(self, other) {
            Operands::Integers(a, b) => a.cmp(&b),
            Operands::Rationals(a, b) => a.cmp(&b),
            Operands::Reals(a, b) => {
                if approx_eq(&a, &b) {
                    Ordering::Equal
                } else {
                    a.cmp(&b)
                }
            }
        }
    }

    /// Smaller operand, promoted to the common precision.
    pub fn min(&self, other: &Self) -> Self {
        self.select(other, Ordering::Greater)
    }

    /// Larger operand, promoted to the common precision.
    pub fn max(&self, other: &Self) -> Self {
        self.select(other, Ordering::Less)
    }

    /// Returns `other` when `self` compares as `take_other_when`.
    fn select(&self, other: &Self, take_other_when: Ordering) -> Self {
        let take_other = self.compare_to(other) == take_other_when;
        match unify(self, other) {
            Operands::Integers(a, b) => Self::Integer(if take_other { b } else { a }),
            Operands::Rationals(a, b) => Self::Rational(if take_other { b } else { a }),
            Operands::Reals(a, b) => Self::Real(if take_other { b } else { a }),
        }
    }

    pub fn to_f64(&self) -> Result<f64, NumericError> {
        let value = match self {
            Self::Integer(v) => v.to_f64(),
            Self::Rational(v) => rational_to_real(v).to_f64(),
            Self::Real(v) => v.to_f64(),
        };
        value
            .filter(|v| v.is_finite())
            .ok_or(NumericError::NotRepresentable)
    }

    /// Integer value, if this is an integer representation.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }
}

/// `a / b` for a non-zero `b`, truncated past [`REAL_DIVISION_DIGITS`].
fn real_divide(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    let (numer, numer_scale) = a.as_bigint_and_exponent();
    let (denom, denom_scale) = b.as_bigint_and_exponent();
    let extra = REAL_DIVISION_DIGITS + digit_count(&denom);
    let quotient = (numer * ten_pow(extra)) / denom;
    BigDecimal::new(quotient, numer_scale - denom_scale + extra as i64)
}

fn approx_eq(a: &BigDecimal, b: &BigDecimal) -> bool {
    let difference = (a.clone() - b.clone()).abs();
    if difference.is_zero() {
        return true;
    }
    let magnitude = a.abs().max(b.abs());
    let tolerance = BigDecimal::new(BigInt::one(), REAL_TOLERANCE_EXPONENT);
    difference <= magnitude * tolerance
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl PartialOrd for NumericValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl Default for NumericValue {
    fn default() -> Self {
        Self::zero()
    }
}

macro_rules! impl_from_primitive_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NumericValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_primitive_integer!(i32, i64, u32, u64, usize);

impl From<BigInt> for NumericValue {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<BigRational> for NumericValue {
    fn from(value: BigRational) -> Self {
        Self::Rational(value)
    }
}

impl From<BigDecimal> for NumericValue {
    fn from(value: BigDecimal) -> Self {
        Self::Real(value)
    }
}
