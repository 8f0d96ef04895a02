use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{AddAssign, MulAssign, SubAssign};

use num_traits::{Float, FromPrimitive, ToPrimitive};

/// Floating point element type accepted by the distance and mapping routines.
///
/// Implemented for `f32` and `f64`.
pub trait FloatOps:
    Float
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + Sum
    + Debug
    + Display
    + ndarray::ScalarOperand
    + Send
    + Sync
    + 'static
{
    /// Converts an `f64` literal into `Self`. Values that cannot be represented become NaN.
    fn cast(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::nan)
    }
}

impl FloatOps for f32 {}
impl FloatOps for f64 {}
