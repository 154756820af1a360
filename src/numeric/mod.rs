//! Exact-precision numeric tower used for every metric value.
//!
//! Values live in one of three representations, ordered by [`Precision`]:
//!
//! - **Integer**: arbitrary-precision integers (`num_bigint::BigInt`)
//! - **Rational**: exact fractions in lowest terms (`num_rational::BigRational`)
//! - **Real**: arbitrary-precision approximate decimals (`bigdecimal::BigDecimal`)
//!
//! Binary operations promote both operands to the higher of their two
//! precisions before computing, so a result never carries less precision than
//! its inputs. Dividing two integers always yields a rational.
//!
//! ## Equality
//!
//! Integers and rationals compare structurally after promotion. Reals compare
//! within a fixed relative tolerance ([`REAL_TOLERANCE_EXPONENT`]), so two
//! reals may be equal while having distinct digits. Tolerance-based equality is
//! not transitive, which is why [`NumericValue`] implements neither `Eq` nor
//! `Hash`.
//!
//! ```rust
//! use codemetrics::numeric::{NumericValue, Precision};
//!
//! let third = NumericValue::from(1).divide(&NumericValue::from(3)).unwrap();
//! assert_eq!(third.precision(), Precision::Rational);
//!
//! let sum = NumericValue::of(0.1).plus(&NumericValue::of(0.2));
//! assert_eq!(sum, NumericValue::of(0.3));
//! ```

mod format;
mod promotion;
mod value;

pub use format::DEFAULT_SIGNIFICANT_DIGITS;
pub use promotion::Precision;
pub use value::{NumericError, NumericValue, REAL_TOLERANCE_EXPONENT};
