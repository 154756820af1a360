use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::NumericValue;

/// Fractional digits kept beyond the denominator's width when a rational is
/// expanded into a real.
const RATIONAL_EXPANSION_DIGITS: u64 = 50;

/// Representation rank. A binary operation computes in the maximum rank of its
/// operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    Integer,
    Rational,
    Real,
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Rational => write!(f, "rational"),
            Self::Real => write!(f, "real"),
        }
    }
}

/// Both operands of a binary operation, promoted to a common representation.
pub(crate) enum Operands {
    Integers(BigInt, BigInt),
    Rationals(BigRational, BigRational),
    Reals(BigDecimal, BigDecimal),
}

/// Promotion table. Every pairing is listed so the compiler checks totality.
pub(crate) fn unify(lhs: &NumericValue, rhs: &NumericValue) -> Operands {
    use NumericValue::{Integer, Rational, Real};

    match (lhs, rhs) {
        (Integer(a), Integer(b)) => Operands::Integers(a.clone(), b.clone()),

        (Integer(a), Rational(b)) => Operands::Rationals(integer_to_rational(a), b.clone()),
        (Rational(a), Integer(b)) => Operands::Rationals(a.clone(), integer_to_rational(b)),
        (Rational(a), Rational(b)) => Operands::Rationals(a.clone(), b.clone()),

        (Integer(a), Real(b)) => Operands::Reals(integer_to_real(a), b.clone()),
        (Real(a), Integer(b)) => Operands::Reals(a.clone(), integer_to_real(b)),
        (Rational(a), Real(b)) => Operands::Reals(rational_to_real(a), b.clone()),
        (Real(a), Rational(b)) => Operands::Reals(a.clone(), rational_to_real(b)),
        (Real(a), Real(b)) => Operands::Reals(a.clone(), b.clone()),
    }
}

pub(crate) fn integer_to_rational(value: &BigInt) -> BigRational {
    BigRational::from_integer(value.clone())
}

pub(crate) fn integer_to_real(value: &BigInt) -> BigDecimal {
    BigDecimal::new(value.clone(), 0)
}

/// Expands a rational into a decimal, truncated well past the precision any
/// formatter asks for.
pub(crate) fn rational_to_real(value: &BigRational) -> BigDecimal {
    let scale = RATIONAL_EXPANSION_DIGITS + digit_count(value.denom());
    let scaled = value.numer() * ten_pow(scale);
    BigDecimal::new(scaled / value.denom(), scale as i64)
}

pub(crate) fn ten_pow(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

/// Number of decimal digits in the magnitude of `value` (zero has one digit).
pub(crate) fn digit_count(value: &BigInt) -> u64 {
    value.abs().to_string().len() as u64
}
