//! This library approximates sine using nothing but integer addition,
//! subtraction, and comparison — no native multiplication, no division, and
//! not a single floating-point operation anywhere on the evaluation path.
//!
//! Everything is built up from scratch: multiplication is repeated addition,
//! division is repeated subtraction, exponentiation and factorials sit on top
//! of those, and trigonometric values come out of truncated Maclaurin series
//! stitched together with the angle-sum identity. Quantities are carried as
//! [`ScaledValue`]s — `mantissa × 10^exponent` over plain `i64`/`i32` — so
//! every intermediate knows its own scale instead of relying on an implied
//! exponent the caller has to keep in their head.
//!
//! This is a teaching-grade kernel, not a numerics library: [`multiply`]
//! costs time linear in the smaller operand, accuracy is a few parts in ten
//! thousand in the sweet spot (fractional parts of a few tenths of a
//! radian), and the small-angle identities degrade well before a full
//! radian. What it offers in exchange is that every last arithmetic step is
//! auditable down to individual additions, and that nothing fails silently:
//! overflow, zero divisors, and out-of-range angles all surface as
//! [`Error`]s.
//!
//! # Examples
//!
//! The classic exercise — sin(2.27) — end to end:
//!
//! ```
//! use anzan::{sin, ScaledValue};
//!
//! // 2.27 radians, encoded as 227 × 10^-2
//! let angle = ScaledValue::new(227, -2);
//!
//! let result = sin(angle)?;
//!
//! // the result carries its true scale: 76385448 × 10^-8
//! assert_eq!(result, ScaledValue::new(76_385_448, -8));
//! assert!((result.to_f64() - 2.27_f64.sin()).abs() < 2e-3);
//! # Ok::<(), anzan::Error>(())
//! ```
//!
//! Angles beyond one turn get folded back first:
//!
//! ```
//! use anzan::{coterminal, sin, ScaledValue};
//!
//! // 8.5532 rad, one full turn past 2.27 rad
//! let wound = ScaledValue::new(85_532, -4);
//!
//! let reduced = coterminal(wound)?;
//! assert_eq!(reduced, ScaledValue::new(22_700, -4));
//!
//! let result = sin(reduced)?;
//! assert_eq!(result, ScaledValue::new(76_385_448, -8));
//! assert!((result.to_f64() - 2.27_f64.sin()).abs() < 2e-3);
//! # Ok::<(), anzan::Error>(())
//! ```
//!
//! The pieces are also usable on their own: the [`arith`] module is the
//! plain-integer kernel, [`series`] has the raw Maclaurin evaluators
//! (including an exponential), and [`sin_small`]/[`cos_small`] are the
//! small-angle reducers the dispatcher composes.
//!
//! [`multiply`]: arith::multiply

pub mod arith;
pub mod series;

mod angle;
mod error;
mod scaled;
mod trig;

pub use angle::{coterminal, FULL_TURN_E4};
pub use error::Error;
pub use scaled::ScaledValue;
pub use trig::{cos_small, sin, sin_small};
