use thiserror::Error;

/// Things that can go wrong inside the fixed-point kernel.
///
/// The kernel has no silent failure modes: running out of integer range,
/// dividing by zero, and leaving the small-angle regime all surface here
/// rather than as wrapped or sentinel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// An intermediate value left the range representable by `i64`
    /// (or an exponent left the range representable by `i32`).
    #[error("intermediate value exceeded the representable integer range")]
    ArithmeticOverflow,

    /// A quotient was requested with a zero divisor.
    #[error("attempted to divide by zero")]
    DivisionByZero,

    /// An angle was passed to a small-angle reducer whose mantissa has more
    /// than three decimal digits, which is outside the regime where the
    /// small-angle identities hold.
    #[error("angle is outside the small-angle regime (mantissa wider than three digits)")]
    RangeExceeded,

    /// Coterminal reduction did not land inside one turn within the
    /// iteration budget.
    #[error("angle reduction did not converge within {limit} iterations")]
    ReductionLimitExceeded {
        /// The iteration budget that was exhausted.
        limit: u32,
    },
}
