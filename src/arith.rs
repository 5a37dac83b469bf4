//! The plain-integer kernel: every operation here is built from integer
//! addition, subtraction, and comparison only.
//!
//! Multiplication is repeated addition, division is repeated subtraction, and
//! exponentiation and factorials are built on top of those. This makes the
//! cost of [`multiply`] linear in the smaller operand's magnitude and the
//! cost of [`digits`] linear in the value itself; the kernel is written for
//! auditability, not speed.
//!
//! All fallible operations detect overflow explicitly and report
//! [`Error::ArithmeticOverflow`] instead of wrapping.

use crate::error::Error;

/// Magnitude of `x`.
///
/// `i64::MIN` has no representable magnitude and is reported as an overflow
/// rather than wrapping back to itself.
pub fn abs(x: i64) -> Result<i64, Error> {
    x.checked_abs().ok_or(Error::ArithmeticOverflow)
}

/// Remainder of `a` divided by `b`, computed by repeated subtraction.
///
/// Defined for `a >= 0` and `b > 0`. For `a < 0` the subtraction loop never
/// runs and `a` comes back unchanged; the same holds for `b <= 0`. Callers
/// that need a true signed remainder must normalize their operands first.
#[must_use]
pub fn modulo(a: i64, b: i64) -> i64 {
    if b <= 0 {
        return a;
    }
    let mut a = a;
    while a >= b {
        a -= b;
    }
    a
}

/// Number of decimal digits in `|n|`.
///
/// Zero has zero digits.
#[must_use]
pub fn digits(n: i64) -> u32 {
    let mut n = n.unsigned_abs();
    let mut digits = 0;
    while n != 0 {
        // truncating divide by ten, by repeated subtraction
        let mut tens = 0;
        while n >= 10 {
            n -= 10;
            tens += 1;
        }
        n = tens;
        digits += 1;
    }
    digits
}

/// Rounds `|x|` to `to` significant decimal digits and reapplies the sign.
///
/// If `to` is at least the current digit count, the value is padded with
/// zeros (scaled up) instead. Otherwise the excess digits are dropped and the
/// first dropped digit decides a round-half-up on the kept part.
pub fn round_to_digits(x: i64, to: u32) -> Result<i64, Error> {
    let magnitude = abs(x)?;
    let width = digits(magnitude);
    if to >= width {
        let padded = multiply(magnitude, pow(10, to - width)?)?;
        return Ok(if x < 0 { -padded } else { padded });
    }
    let dropped = pow(10, width - to)?;
    let mut kept = div_trunc(magnitude, dropped)?;
    let half = multiply(5, pow(10, width - to - 1)?)?;
    if modulo(magnitude, dropped) >= half {
        kept += 1;
    }
    Ok(if x < 0 { -kept } else { kept })
}

/// Product of `a` and `b`, computed by adding the larger magnitude to an
/// accumulator once per unit of the smaller magnitude.
///
/// The sign of the result is the XOR of the operand signs; a zero operand
/// short-circuits to zero.
pub fn multiply(a: i64, b: i64) -> Result<i64, Error> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    let (least, most) = if abs(a)? <= abs(b)? {
        (abs(a)?, abs(b)?)
    } else {
        (abs(b)?, abs(a)?)
    };
    let mut sum: i64 = 0;
    for _ in 0..least {
        sum = sum.checked_add(most).ok_or(Error::ArithmeticOverflow)?;
    }
    Ok(if (a < 0) == (b < 0) { sum } else { -sum })
}

/// `x` raised to `n`, as `n - 1` rounds of repeated-addition multiplication.
///
/// `pow(x, 0)` is 1 for every `x`, including zero. The result is negative
/// exactly when `x` is negative and `n` is odd.
pub fn pow(x: i64, n: u32) -> Result<i64, Error> {
    if n == 0 {
        return Ok(1);
    }
    let base = abs(x)?;
    let mut acc = base;
    for _ in 1..n {
        acc = multiply(acc, base)?;
    }
    Ok(if x < 0 && modulo(i64::from(n), 2) == 1 {
        -acc
    } else {
        acc
    })
}

/// Quotient of `a` and `b` carrying six implied fractional decimal digits.
///
/// Seven rounds of digit-by-digit long division: each round subtracts the
/// divisor from the remainder as often as it fits, records that count at the
/// current digit position, and rescales the remainder by ten. The loop exits
/// early once the remainder reaches zero, so exact quotients cost little.
///
/// The first round records the whole-number part of the quotient, which may
/// span several digits; the remaining six rounds each contribute one
/// fractional digit. `div(1, 3)` is therefore `333_333` and `div(2, 1)` is
/// `2_000_000`.
///
/// Signs follow the XOR rule; a zero divisor is an error.
pub fn div(a: i64, b: i64) -> Result<i64, Error> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    let divisor = abs(b)?;
    let mut remainder = abs(a)?;
    let mut sum: i64 = 0;
    for position in (1..=7u32).rev() {
        let mut count: i64 = 0;
        while remainder >= divisor {
            remainder -= divisor;
            count += 1;
        }
        sum = sum
            .checked_add(multiply(count, pow(10, position - 1)?)?)
            .ok_or(Error::ArithmeticOverflow)?;
        if remainder == 0 {
            break;
        }
        remainder = multiply(remainder, 10)?;
    }
    Ok(if (a < 0) == (b < 0) { sum } else { -sum })
}

/// Truncating division by repeated subtraction.
///
/// Counts how often `|b|` fits into `|a|`; signs follow the XOR rule, so the
/// result truncates toward zero. A zero divisor is an error.
pub fn div_trunc(a: i64, b: i64) -> Result<i64, Error> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    let divisor = abs(b)?;
    let mut remainder = abs(a)?;
    let mut count: i64 = 0;
    while remainder >= divisor {
        remainder -= divisor;
        count += 1;
    }
    Ok(if (a < 0) == (b < 0) { count } else { -count })
}

/// `n!`, accumulated iteratively over [`multiply`].
///
/// Exact while the product fits `i64`; `factorial(21)` and beyond report
/// [`Error::ArithmeticOverflow`].
pub fn factorial(n: u32) -> Result<i64, Error> {
    let mut acc: i64 = 1;
    for i in 2..=i64::from(n) {
        acc = multiply(acc, i)?;
    }
    Ok(acc)
}
