use crate::arith;
use crate::error::Error;
use std::fmt::{Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decimal quantity `mantissa × 10^exponent` backed by nothing but native
/// integers.
///
/// This is the one value type the whole kernel is threaded through: angles
/// go in as scaled values, every intermediate (squares, halves, rounded
/// series terms) stays a scaled value, and results come back out as scaled
/// values carrying their true exponent. That makes scale mismatches a type
/// error in spirit: there is no informal "the caller knows the implied
/// exponent" convention anywhere.
///
/// No normalization invariant is enforced globally; `227e-2` and `2270e-3`
/// denote the same quantity but compare unequal. Call [`normalize`] first if
/// you need a canonical representation.
///
/// ```
/// use anzan::ScaledValue;
///
/// let angle = ScaledValue::new(227, -2); // 2.27
/// assert_eq!(angle.to_f64(), 2.27);
/// assert_eq!(angle.to_string(), "227e-2");
///
/// assert_eq!(
///     ScaledValue::new(2_270, -3).normalize(),
///     ScaledValue::new(227, -2),
/// );
/// ```
///
/// [`normalize`]: ScaledValue::normalize
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaledValue {
    mantissa: i64,
    exponent: i32,
}

impl ScaledValue {
    /// Constructs the value `mantissa × 10^exponent`.
    #[must_use]
    pub const fn new(mantissa: i64, exponent: i32) -> Self {
        Self { mantissa, exponent }
    }

    /// Returns the integer digit sequence of this value.
    #[must_use]
    pub const fn mantissa(&self) -> i64 {
        self.mantissa
    }

    /// Returns the decimal exponent of this value.
    #[must_use]
    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Strips trailing zeros from the mantissa, bumping the exponent once per
    /// stripped zero. A zero mantissa canonicalizes to exponent 0.
    ///
    /// The denoted quantity is unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        if self.mantissa == 0 {
            return Self::new(0, 0);
        }
        let negative = self.mantissa < 0;
        let Ok(mut mantissa) = arith::abs(self.mantissa) else {
            // i64::MIN: no representable magnitude, and no trailing zero either
            return self;
        };
        let mut exponent = self.exponent;
        while arith::modulo(mantissa, 10) == 0 {
            let Some(bumped) = exponent.checked_add(1) else {
                break;
            };
            // divide by ten by repeated subtraction
            let mut tens = 0;
            while mantissa >= 10 {
                mantissa -= 10;
                tens += 1;
            }
            mantissa = tens;
            exponent = bumped;
        }
        Self::new(if negative { -mantissa } else { mantissa }, exponent)
    }

    /// Product of two scaled values: mantissas via repeated-addition
    /// multiplication, exponents summed with plain integer addition.
    ///
    /// No renormalization happens; see [`normalize`](ScaledValue::normalize).
    pub fn multiply(self, other: Self) -> Result<Self, Error> {
        Ok(Self::new(
            arith::multiply(self.mantissa, other.mantissa)?,
            self.exponent
                .checked_add(other.exponent)
                .ok_or(Error::ArithmeticOverflow)?,
        ))
    }

    /// `self` raised to `n`: the mantissa via repeated-addition
    /// exponentiation, the exponent multiplied by `n` with plain integer
    /// multiplication.
    ///
    /// `pow(0)` is exactly 1 (mantissa 1, exponent 0) for every value.
    pub fn pow(self, n: u32) -> Result<Self, Error> {
        if n == 0 {
            return Ok(Self::new(1, 0));
        }
        let n_signed = i32::try_from(n).map_err(|_| Error::ArithmeticOverflow)?;
        Ok(Self::new(
            arith::pow(self.mantissa, n)?,
            self.exponent
                .checked_mul(n_signed)
                .ok_or(Error::ArithmeticOverflow)?,
        ))
    }

    /// Quotient of two scaled values by seven fixed rounds of digit-by-digit
    /// long division on the mantissas.
    ///
    /// Each round contributes one decimal digit, so the result exponent is
    /// `self.exponent − other.exponent − 7 + 1`. Unlike [`arith::div`] there
    /// is no early exit: exact quotients simply come back with trailing
    /// zeros, which [`normalize`](ScaledValue::normalize) will strip.
    pub fn divide(self, other: Self) -> Result<Self, Error> {
        const ROUNDS: u32 = 7;
        if other.mantissa == 0 {
            return Err(Error::DivisionByZero);
        }
        let divisor = arith::abs(other.mantissa)?;
        let mut remainder = arith::abs(self.mantissa)?;
        let mut sum: i64 = 0;
        for position in (1..=ROUNDS).rev() {
            let mut count: i64 = 0;
            while remainder >= divisor {
                remainder -= divisor;
                count += 1;
            }
            sum = sum
                .checked_add(arith::multiply(count, arith::pow(10, position - 1)?)?)
                .ok_or(Error::ArithmeticOverflow)?;
            if position > 1 {
                remainder = arith::multiply(remainder, 10)?;
            }
        }
        let exponent = self
            .exponent
            .checked_sub(other.exponent)
            .and_then(|e| e.checked_sub(ROUNDS as i32 - 1))
            .ok_or(Error::ArithmeticOverflow)?;
        let negative = (self.mantissa < 0) != (other.mantissa < 0);
        Ok(Self::new(if negative { -sum } else { sum }, exponent))
    }

    /// Sum of two scaled values.
    ///
    /// The operand with the larger exponent is rescaled down to the other's
    /// exponent (padding its mantissa by repeated-addition powers of ten)
    /// before the mantissas are added, so operands of different scales
    /// combine exactly.
    pub fn add(self, other: Self) -> Result<Self, Error> {
        let (fine, coarse) = if self.exponent <= other.exponent {
            (self, other)
        } else {
            (other, self)
        };
        let shift = coarse
            .exponent
            .checked_sub(fine.exponent)
            .ok_or(Error::ArithmeticOverflow)?;
        let aligned = arith::multiply(coarse.mantissa, arith::pow(10, shift.unsigned_abs())?)?;
        Ok(Self::new(
            aligned
                .checked_add(fine.mantissa)
                .ok_or(Error::ArithmeticOverflow)?,
            fine.exponent,
        ))
    }

    /// Rounds the mantissa to `to` significant decimal digits and adjusts the
    /// exponent by the digits gained or lost, so the denoted quantity is
    /// preserved up to the rounding itself.
    ///
    /// ```
    /// use anzan::ScaledValue;
    ///
    /// assert_eq!(
    ///     ScaledValue::new(909_297, -6).round_to_digits(4),
    ///     Ok(ScaledValue::new(9_093, -4)),
    /// );
    /// assert_eq!(
    ///     ScaledValue::new(27, -2).round_to_digits(4),
    ///     Ok(ScaledValue::new(2_700, -4)),
    /// );
    /// ```
    pub fn round_to_digits(self, to: u32) -> Result<Self, Error> {
        let width = arith::digits(self.mantissa) as i32;
        let to_signed = i32::try_from(to).map_err(|_| Error::ArithmeticOverflow)?;
        let shift = width
            .checked_sub(to_signed)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(Self::new(
            arith::round_to_digits(self.mantissa, to)?,
            self.exponent
                .checked_add(shift)
                .ok_or(Error::ArithmeticOverflow)?,
        ))
    }

    /// Decodes the denoted quantity as an `f64`.
    ///
    /// Convenience for display and testing; the kernel itself never does
    /// this.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 * 10f64.powi(self.exponent)
    }

    /// Encodes `angle` as a scaled value with the given exponent, rounding
    /// the mantissa to the nearest integer.
    ///
    /// Returns `None` if the mantissa would not fit `i64`. Like
    /// [`to_f64`](ScaledValue::to_f64), this is boundary convenience; the
    /// evaluation path stays integer-only.
    #[must_use]
    pub fn from_angle(angle: Angle, exponent: i32) -> Option<Self> {
        let mantissa = (angle.get::<radian>() * 10f64.powi(-exponent)).round();
        if !mantissa.is_finite() || mantissa < i64::MIN as f64 || mantissa > i64::MAX as f64 {
            return None;
        }
        Some(Self::new(mantissa as i64, exponent))
    }

    /// Decodes the denoted quantity as an [`Angle`] in radians.
    #[must_use]
    pub fn to_angle(&self) -> Angle {
        Angle::new::<radian>(self.to_f64())
    }
}

impl Display for ScaledValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}e{}", self.mantissa, self.exponent)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for ScaledValue {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        // generous for f64, but tight against the kernel's 4-digit rounding
        0.000_000_001
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.to_f64(), &other.to_f64(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for ScaledValue {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        f64::relative_eq(&self.to_f64(), &other.to_f64(), epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::ScaledValue;
    use crate::error::Error;
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::angle::radian;
    use uom::si::f64::Angle;

    fn sv(mantissa: i64, exponent: i32) -> ScaledValue {
        ScaledValue::new(mantissa, exponent)
    }

    #[rstest]
    #[case(sv(2_270, -3), sv(227, -2))]
    #[case(sv(227, -2), sv(227, -2))]
    #[case(sv(-100, 0), sv(-1, 2))]
    #[case(sv(364_500_000, -10), sv(3_645, -5))]
    #[case(sv(0, -5), sv(0, 0))]
    // i64::MIN has no representable magnitude and passes through untouched
    #[case(sv(i64::MIN, -3), sv(i64::MIN, -3))]
    fn normalize_strips_trailing_zeros(#[case] input: ScaledValue, #[case] expected: ScaledValue) {
        assert_eq!(input.normalize(), expected);
    }

    #[rstest]
    #[case(sv(3, -1), sv(4, 2), sv(12, 1))]
    #[case(sv(-3, 0), sv(4, 0), sv(-12, 0))]
    #[case(sv(0, -2), sv(4, 3), sv(0, 1))]
    #[case(sv(9_093, -4), sv(9_636, -4), sv(87_620_148, -8))]
    fn multiply_combines_mantissas_and_exponents(
        #[case] a: ScaledValue,
        #[case] b: ScaledValue,
        #[case] expected: ScaledValue,
    ) {
        assert_eq!(a.multiply(b), Ok(expected));
    }

    #[rstest]
    #[case(sv(27, -2), 2, sv(729, -4))]
    #[case(sv(27, -2), 0, sv(1, 0))]
    #[case(sv(-3, -1), 3, sv(-27, -3))]
    fn pow_squares_cubes_and_units(
        #[case] x: ScaledValue,
        #[case] n: u32,
        #[case] expected: ScaledValue,
    ) {
        assert_eq!(x.pow(n), Ok(expected));
    }

    #[rstest]
    #[case(sv(729, -4), sv(2, 0), sv(364_500_000, -10))]
    #[case(sv(1, 0), sv(3, 0), sv(333_333, -6))]
    #[case(sv(-1, 0), sv(3, 0), sv(-333_333, -6))]
    fn divide_tracks_exponents(
        #[case] a: ScaledValue,
        #[case] b: ScaledValue,
        #[case] expected: ScaledValue,
    ) {
        assert_eq!(a.divide(b), Ok(expected));
    }

    #[test]
    fn divide_rejects_zero_divisor() {
        assert_eq!(sv(1, 0).divide(sv(0, 3)), Err(Error::DivisionByZero));
    }

    #[rstest]
    #[case(sv(1, -1), sv(5, -2), sv(15, -2))]
    #[case(sv(5, -2), sv(1, -1), sv(15, -2))]
    #[case(sv(87_620_148, -8), sv(-11_234_700, -8), sv(76_385_448, -8))]
    #[case(sv(8_415_000, -7), sv(0, -10), sv(8_415_000_000, -10))]
    fn add_aligns_exponents(
        #[case] a: ScaledValue,
        #[case] b: ScaledValue,
        #[case] expected: ScaledValue,
    ) {
        assert_eq!(a.add(b), Ok(expected));
    }

    #[rstest]
    #[case(sv(909_297, -6), sv(9_093, -4))]
    #[case(sv(-416_147, -6), sv(-4_161, -4))]
    #[case(sv(96_355, -5), sv(9_636, -4))]
    #[case(sv(27, -2), sv(2_700, -4))]
    #[case(sv(1, 0), sv(1_000, -3))]
    #[case(sv(0, -2), sv(0, -6))]
    fn round_to_four_digits(#[case] input: ScaledValue, #[case] expected: ScaledValue) {
        assert_eq!(input.round_to_digits(4), Ok(expected));
    }

    #[test]
    fn angle_round_trip() {
        let angle = Angle::new::<radian>(2.27);
        let scaled = ScaledValue::from_angle(angle, -2).expect("2.27 fits easily");
        assert_eq!(scaled, sv(227, -2));
        assert_relative_eq!(scaled.to_angle().get::<radian>(), 2.27);
    }

    #[test]
    fn displays_in_scientific_shorthand() {
        assert_eq!(sv(227, -2).to_string(), "227e-2");
        assert_eq!(sv(-1, 0).to_string(), "-1e0");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn scaled_value_serde() {
        let value = sv(227, -2);
        let ser = serde_yaml::to_string(&value).unwrap();
        let de = serde_yaml::from_str::<ScaledValue>(&ser).unwrap();
        assert_eq!(value, de);
    }

    impl quickcheck::Arbitrary for ScaledValue {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            // keep mantissas small enough that repeated addition stays cheap
            // and exponents in the range the kernel actually works at
            ScaledValue::new(
                i64::from(i16::arbitrary(g)),
                -i32::from(u8::arbitrary(g) % 7),
            )
        }
    }

    quickcheck! {
        fn normalize_preserves_value(value: ScaledValue) -> bool {
            approx::relative_eq!(
                value.normalize().to_f64(),
                value.to_f64(),
                max_relative = 1e-12
            )
        }

        fn add_commutes(a: ScaledValue, b: ScaledValue) -> bool {
            a.add(b).unwrap() == b.add(a).unwrap()
        }

        fn multiply_commutes(a: ScaledValue, b: ScaledValue) -> bool {
            a.multiply(b).unwrap() == b.multiply(a).unwrap()
        }

        fn multiply_matches_decoded_product(a: ScaledValue, b: ScaledValue) -> bool {
            approx::relative_eq!(
                a.multiply(b).unwrap().to_f64(),
                a.to_f64() * b.to_f64(),
                max_relative = 1e-9
            )
        }
    }
}
