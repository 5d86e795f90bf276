use std::ops::{Add, Mul};

use crate::float::Float;

pub fn lerp<'a, T>(t: Float, a: &'a T, b: &'a T) -> T
where
    T: Add<T, Output = T>,
    &'a T: Mul<Float, Output = T>,
{
    a * (1.0 - t) + b * t
}

/// Computes a * b - c * d using an error-free transformation (EFT) method.
/// See PBRT B.2.9.
pub fn difference_of_products(a: Float, b: Float, c: Float, d: Float) -> Float {
    let cd = c * d;
    let difference = Float::mul_add(a, b, -cd);
    let error = Float::mul_add(-c, d, cd);
    difference + error
}

/// sqrt, clamping slightly negative inputs (from rounding error) to zero.
pub fn safe_sqrt(x: Float) -> Float {
    debug_assert!(x > -1e-3);
    Float::sqrt(Float::max(0.0, x))
}

#[cfg(test)]
mod tests {
    #[test]
    fn lerp() {
        let a = 0.0;
        let b = 10.0;
        let x = 0.45;
        assert_eq!(4.5, super::lerp(x, &a, &b));
    }

    #[test]
    fn test_difference_of_products() {
        // General correctness only; the accuracy gain is taken from the literature.
        let a = 10.0;
        let b = 10.0;
        let c = 5.0;
        let d = 5.0;
        assert_eq!(75.0, super::difference_of_products(a, b, c, d));
    }

    #[test]
    fn safe_sqrt_clamps() {
        assert_eq!(0.0, super::safe_sqrt(-1e-6));
    }
}
