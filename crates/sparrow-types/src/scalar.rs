//! Scalar type alias and the exact zero test.
//!
//! The engine stores and solves in `f64` throughout. The zero test is
//! exact, not epsilon based: it decides which assignments are dropped and
//! which pivots are rejected, so changing it changes observable behavior.

/// The floating-point type used for stored values and vectors.
pub type Scalar = f64;

/// Returns true only for `0.0` and `-0.0`.
///
/// NaN is not zero, and neither is any subnormal value.
#[inline]
pub fn is_zero(x: Scalar) -> bool {
    x == 0.0
}
