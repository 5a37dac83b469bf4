//! Truncated Maclaurin series over the integer kernel.
//!
//! All evaluators here take a plain whole-radian input and return the series
//! sum with six implied fractional decimal digits — the scale produced by
//! [`arith::div`] — so `sine(2)` is `909_297`, meaning 0.909297. Callers that
//! thread results onward should wrap them in a
//! [`ScaledValue`](crate::ScaledValue) with [`SCALE_EXPONENT`].

use crate::arith;
use crate::error::Error;

/// The implied exponent of every evaluator result in this module.
pub const SCALE_EXPONENT: i32 = -6;

const SIN_COS_TERMS: u32 = 8;
const EXP_TERMS: u32 = 17;

/// Maclaurin sine: the alternating sum of `x^(2i+1) / (2i+1)!` for
/// `i = 0..8`.
///
/// Odd, so the sign of `x` is applied to the magnitude sum. Whole-radian
/// inputs beyond ±18 overflow the `x^15` term and error out; inputs past
/// roughly ±9 still fit but the truncated series has stopped converging and
/// the sums drift far from the true sine. Reduce large angles with
/// [`coterminal`](crate::coterminal) first.
pub fn sine(x: i64) -> Result<i64, Error> {
    let magnitude = arith::abs(x)?;
    let mut sum: i64 = 0;
    for i in 0..SIN_COS_TERMS {
        let order = 2 * i + 1;
        let power = arith::pow(magnitude, order)?;
        let term = arith::div(power, arith::factorial(order)?)?;
        sum = if arith::modulo(i64::from(i), 2) == 0 {
            sum.checked_add(term)
        } else {
            sum.checked_sub(term)
        }
        .ok_or(Error::ArithmeticOverflow)?;
    }
    Ok(if x < 0 { -sum } else { sum })
}

/// Maclaurin cosine: the alternating sum of `x^(2i) / (2i)!` for `i = 0..8`.
///
/// Even powers make the sign of `x` irrelevant.
pub fn cosine(x: i64) -> Result<i64, Error> {
    let mut sum: i64 = 0;
    for i in 0..SIN_COS_TERMS {
        let order = 2 * i;
        let power = arith::pow(x, order)?;
        let term = arith::div(power, arith::factorial(order)?)?;
        sum = if arith::modulo(i64::from(i), 2) == 0 {
            sum.checked_add(term)
        } else {
            sum.checked_sub(term)
        }
        .ok_or(Error::ArithmeticOverflow)?;
    }
    Ok(sum)
}

/// Maclaurin exponential: the sum of `x^i / i!` for `i = 0..17`.
pub fn exp(x: i64) -> Result<i64, Error> {
    let mut sum: i64 = 0;
    for i in 0..EXP_TERMS {
        let power = arith::pow(x, i)?;
        let term = arith::div(power, arith::factorial(i)?)?;
        sum = sum.checked_add(term).ok_or(Error::ArithmeticOverflow)?;
    }
    Ok(sum)
}

/// Sine-shaped series centered on the reference point 22, with the
/// alternation mirrored relative to [`sine`] and the sign flipped below the
/// reference.
///
/// Unlike its siblings this evaluator mixes scale conventions: the offset
/// `x - 22` is meant to be read in hundredths of a radian while the
/// factorials divide it as whole radians, so its output is only structurally
/// meaningful (zero at the reference point, antisymmetric around it). It is
/// not used by [`sin`](crate::sin) and is kept as a standalone curiosity of
/// the kernel.
pub fn sine_about_22(x: i64) -> Result<i64, Error> {
    const REFERENCE: i64 = 22;
    let offset = arith::abs(x.checked_sub(REFERENCE).ok_or(Error::ArithmeticOverflow)?)?;
    let mut sum: i64 = 0;
    for i in 0..SIN_COS_TERMS {
        let order = 2 * i + 1;
        let power = arith::pow(offset, order)?;
        let term = arith::div(power, arith::factorial(order)?)?;
        sum = if arith::modulo(i64::from(i), 2) == 1 {
            sum.checked_add(term)
        } else {
            sum.checked_sub(term)
        }
        .ok_or(Error::ArithmeticOverflow)?;
    }
    Ok(if x < REFERENCE { -sum } else { sum })
}
