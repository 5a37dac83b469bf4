//! Coterminal reduction: folding an angle into one full turn while
//! preserving its trigonometric value.

use crate::arith;
use crate::error::Error;
use crate::scaled::ScaledValue;

/// One full turn (2π) at the reduction's working scale of 10^-4.
pub const FULL_TURN_E4: i64 = 62_832;

/// The exponent every reduced angle is expressed at.
const WORKING_EXPONENT: i32 = -4;

/// How many turns we are willing to unwind before giving up.
const MAX_ITERATIONS: u32 = 100_000;

/// Reduces `angle` to the coterminal angle in `[0, 2π)`, expressed at
/// exponent −4.
///
/// The mantissa is first brought to the 10^-4 working scale (padding with
/// zeros, or truncating digits finer than 10^-4), then one full turn —
/// [`FULL_TURN_E4`] — is repeatedly subtracted (or added, for negative
/// angles) until the value lands inside a single turn. Accuracy is bounded
/// by the constant's own truncation: one unit in the 10^-4 place per turn
/// unwound.
///
/// The iteration budget grows with the input's magnitude; inputs beyond
/// roughly 100 000 turns are reported as
/// [`Error::ReductionLimitExceeded`] instead of looping unboundedly.
///
/// ```
/// use anzan::{coterminal, ScaledValue};
///
/// // 2.27 + 2π comes back as 2.27
/// let wound = ScaledValue::new(85_532, -4);
/// assert_eq!(coterminal(wound)?, ScaledValue::new(22_700, -4));
/// # Ok::<(), anzan::Error>(())
/// ```
pub fn coterminal(angle: ScaledValue) -> Result<ScaledValue, Error> {
    let shift = angle
        .exponent()
        .checked_sub(WORKING_EXPONENT)
        .ok_or(Error::ArithmeticOverflow)?;
    let mut working = if shift >= 0 {
        arith::multiply(angle.mantissa(), arith::pow(10, shift.unsigned_abs())?)?
    } else {
        arith::div_trunc(angle.mantissa(), arith::pow(10, shift.unsigned_abs())?)?
    };
    for _ in 0..MAX_ITERATIONS {
        if (0..FULL_TURN_E4).contains(&working) {
            return Ok(ScaledValue::new(working, WORKING_EXPONENT));
        }
        if working < 0 {
            working += FULL_TURN_E4;
        } else {
            working -= FULL_TURN_E4;
        }
    }
    Err(Error::ReductionLimitExceeded {
        limit: MAX_ITERATIONS,
    })
}
