use std::ops::Div;

use crate::float::Float;

use super::{has_nan::HasNan, length::Length};

pub trait Normalize: HasNan + Length
where
    Self: Sized + Div<Float, Output = Self>,
{
    fn normalize(self) -> Self {
        let len = self.length();
        debug_assert!(!self.has_nan());
        self / len
    }

    /// True if the length is within a small tolerance of one.
    fn is_normalized(&self) -> bool {
        Float::abs(self.length_squared() - 1.0) < 1e-4
    }
}
