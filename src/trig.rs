//! Small-angle reducers and the top-level sine dispatcher.
//!
//! The dispatcher composes two regimes: truncated Maclaurin series for the
//! whole-radian part of an angle (which converges well at small whole
//! radians) and small-angle identities for the fractional part (which are
//! exact enough below a few tenths of a radian). The two halves meet in the
//! angle-sum identity `sin(a + b) = sin a · cos b + cos a · sin b`.

use crate::arith;
use crate::error::Error;
use crate::scaled::ScaledValue;
use crate::series;

/// Mantissas wider than this are outside the small-angle regime.
const SMALL_ANGLE_DIGITS: u32 = 3;

/// Significant digits the four identity inputs are rounded to before
/// recombination.
const IDENTITY_DIGITS: u32 = 4;

/// Drops trailing mantissa digits until the value fits the small-angle
/// width, bumping the exponent once per dropped digit.
fn trim_to_small(value: ScaledValue) -> Result<ScaledValue, Error> {
    let mut value = value;
    while arith::digits(value.mantissa()) > SMALL_ANGLE_DIGITS {
        value = ScaledValue::new(
            arith::div_trunc(value.mantissa(), 10)?,
            value
                .exponent()
                .checked_add(1)
                .ok_or(Error::ArithmeticOverflow)?,
        );
    }
    Ok(value)
}

/// Small-angle sine: `sin x ≈ x`.
///
/// Returns the angle unchanged while its mantissa has at most three digits,
/// and [`Error::RangeExceeded`] beyond that — the identity's error grows
/// with the cube of the angle, so wider mantissas are refused rather than
/// silently mis-approximated.
pub fn sin_small(angle: ScaledValue) -> Result<ScaledValue, Error> {
    if arith::digits(angle.mantissa()) > SMALL_ANGLE_DIGITS {
        return Err(Error::RangeExceeded);
    }
    Ok(angle)
}

/// Small-angle cosine via the half-angle identity `cos x ≈ 1 − x²/2`.
///
/// The angle is squared as a scaled value, the square's mantissa is trimmed
/// back to at most three digits (bumping its exponent to match), halved by
/// scaled division, normalized, and subtracted from an exact 1 expressed at
/// the same scale. The same three-digit bound as [`sin_small`] applies.
///
/// ```
/// use anzan::{cos_small, ScaledValue};
///
/// // cos(0.27) ≈ 1 − 0.27²/2 = 0.96355
/// assert_eq!(
///     cos_small(ScaledValue::new(27, -2))?,
///     ScaledValue::new(96_355, -5),
/// );
/// # Ok::<(), anzan::Error>(())
/// ```
pub fn cos_small(angle: ScaledValue) -> Result<ScaledValue, Error> {
    if arith::digits(angle.mantissa()) > SMALL_ANGLE_DIGITS {
        return Err(Error::RangeExceeded);
    }
    let square = trim_to_small(angle.pow(2)?)?;
    let half = square.divide(ScaledValue::new(2, 0))?.normalize();
    // an exact 1 at the same scale as the halved square; a positive exponent
    // here would mean the angle was never small to begin with
    let unit_mantissa = arith::pow(
        10,
        u32::try_from(half.exponent().checked_neg().ok_or(Error::ArithmeticOverflow)?)
            .map_err(|_| Error::RangeExceeded)?,
    )?;
    let mantissa = unit_mantissa
        .checked_sub(half.mantissa())
        .ok_or(Error::ArithmeticOverflow)?;
    Ok(ScaledValue::new(mantissa, half.exponent()))
}

/// Sine of `angle`, radians encoded as mantissa × 10^exponent.
///
/// The angle's exponent is read as a count of fractional decimal digits, so
/// it is expected to be non-positive, with a non-negative mantissa. If the
/// mantissa is narrower than that count the angle is already small and goes
/// straight to [`sin_small`]. Otherwise the mantissa is split into a
/// whole-radian part and a fractional remainder; the whole part goes through
/// the Maclaurin evaluators, the remainder is normalized and trimmed to the
/// small-angle width before the small-angle reducers, all four intermediates
/// are rounded to four significant digits, and the angle-sum identity
/// recombines them. The trim means angles at any fractional scale are
/// accepted, including the 10⁻⁴ working scale that
/// [`coterminal`](crate::coterminal) reduces into.
///
/// The result carries its true exponent — no implied scale to keep in your
/// head:
///
/// ```
/// use anzan::{sin, ScaledValue};
///
/// let result = sin(ScaledValue::new(227, -2))?; // 2.27 rad
/// assert_eq!(result, ScaledValue::new(76_385_448, -8));
/// assert!((result.to_f64() - 2.27_f64.sin()).abs() < 2e-3);
/// # Ok::<(), anzan::Error>(())
/// ```
///
/// Angles with many whole radians overflow the series term powers; fold
/// them into one turn with [`coterminal`](crate::coterminal) first.
pub fn sin(angle: ScaledValue) -> Result<ScaledValue, Error> {
    let fractional_digits = angle.exponent().unsigned_abs();
    if arith::digits(angle.mantissa()) < fractional_digits {
        return sin_small(angle);
    }
    let scale = arith::pow(10, fractional_digits)?;
    let whole = arith::div_trunc(angle.mantissa(), scale)?;
    // the remainder carries as many digits as the angle has fractional
    // digits; strip trailing zeros, then trim whatever is left over the
    // small-angle width
    let fraction = trim_to_small(
        ScaledValue::new(arith::modulo(angle.mantissa(), scale), angle.exponent()).normalize(),
    )?;

    let sin_whole = ScaledValue::new(series::sine(whole)?, series::SCALE_EXPONENT)
        .round_to_digits(IDENTITY_DIGITS)?;
    let cos_whole = ScaledValue::new(series::cosine(whole)?, series::SCALE_EXPONENT)
        .round_to_digits(IDENTITY_DIGITS)?;
    let sin_fraction = sin_small(fraction)?.round_to_digits(IDENTITY_DIGITS)?;
    let cos_fraction = cos_small(fraction)?.round_to_digits(IDENTITY_DIGITS)?;

    sin_whole
        .multiply(cos_fraction)?
        .add(cos_whole.multiply(sin_fraction)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sv(mantissa: i64, exponent: i32) -> ScaledValue {
        ScaledValue::new(mantissa, exponent)
    }

    #[rstest]
    #[case(sv(27, -2))]
    #[case(sv(999, -3))]
    #[case(sv(0, 0))]
    fn sin_small_is_the_identity_in_range(#[case] angle: ScaledValue) {
        assert_eq!(sin_small(angle), Ok(angle));
    }

    #[rstest]
    #[case(sv(1_000, -4))]
    #[case(sv(9_999, -4))]
    fn sin_small_refuses_wide_mantissas(#[case] angle: ScaledValue) {
        assert_eq!(sin_small(angle), Err(Error::RangeExceeded));
        assert_eq!(cos_small(angle), Err(Error::RangeExceeded));
    }

    #[rstest]
    #[case(sv(27, -2), sv(96_355, -5))]
    #[case(sv(5, -1), sv(875, -3))]
    #[case(sv(999, -3), sv(501, -3))]
    // leading-zero fractions keep their true scale: 0.05 squares to 0.00125
    #[case(sv(5, -2), sv(99_875, -5))]
    #[case(sv(0, -2), sv(1, 0))]
    fn cos_small_half_angle_exact(#[case] angle: ScaledValue, #[case] expected: ScaledValue) {
        assert_eq!(cos_small(angle), Ok(expected));
    }

    #[rstest]
    #[case(sv(27, -2))]
    #[case(sv(5, -2))]
    #[case(sv(15, -2))]
    fn cos_small_tracks_ground_truth_for_small_angles(#[case] angle: ScaledValue) {
        let truth = angle.to_f64().cos();
        assert!((cos_small(angle).unwrap().to_f64() - truth).abs() < 1e-3);
    }

    #[test]
    fn sin_of_two_point_two_seven_exactly() {
        assert_eq!(sin(sv(227, -2)), Ok(sv(76_385_448, -8)));
    }

    #[rstest]
    #[case(sv(227, -2), 2e-3)]
    #[case(sv(205, -2), 1e-3)]
    #[case(sv(100, -2), 1e-3)]
    #[case(sv(305, -2), 1e-3)]
    #[case(sv(0, 0), 1e-9)]
    fn sin_tracks_ground_truth(#[case] angle: ScaledValue, #[case] tolerance: f64) {
        let truth = angle.to_f64().sin();
        let result = sin(angle).unwrap();
        assert!(
            (result.to_f64() - truth).abs() < tolerance,
            "sin({angle}) = {result}, want {truth}"
        );
    }

    #[test]
    fn sin_delegates_small_angles_unchanged() {
        // one digit of mantissa against three fractional digits
        assert_eq!(sin(sv(5, -3)), Ok(sv(5, -3)));
    }

    #[test]
    fn sin_refuses_wide_small_angles() {
        // small-angle path, but the mantissa itself is too wide
        assert_eq!(sin(sv(12_345, -9)), Err(Error::RangeExceeded));
    }

    #[test]
    fn sin_accepts_trailing_zero_remainders() {
        // 2.2700: the remainder 0.2700 normalizes down to 0.27, so the
        // result matches the coarser 2.27 encoding exactly
        assert_eq!(sin(sv(22_700, -4)), sin(sv(227, -2)));
    }

    #[test]
    fn sin_trims_wide_fractional_parts() {
        // the remainder 0.9999 is truncated to 0.999 rather than refused
        assert_eq!(sin(sv(29_999, -4)), Ok(sv(3_987_540, -8)));
    }

    #[test]
    fn sin_composes_with_angle_reduction() {
        // 2.27 rad wound forward by one and two full turns reduces back to
        // the same representative and evaluates identically
        for turns in 1..=2 {
            let wound = sv(22_700 + turns * crate::FULL_TURN_E4, -4);
            let reduced = crate::coterminal(wound).unwrap();
            assert_eq!(reduced, sv(22_700, -4));
            assert_eq!(sin(reduced), Ok(sv(76_385_448, -8)));
            assert!((sin(reduced).unwrap().to_f64() - 2.27_f64.sin()).abs() < 2e-3);
        }
    }
}
