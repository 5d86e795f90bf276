use auto_ops::{impl_op_ex, impl_op_ex_commutative};

use super::has_nan::{has_nan3, HasNan};
use super::length::{length_squared3, Length};
use super::normalize::Normalize;
use super::tuple::{cross, dot3, Tuple3};
use super::{Normal3f, Point3f};
use crate::float::Float;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3f {
    /// All zeroes.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// A unit-length vector pointing along the positive X axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// A unit-length vector pointing along the positive Y axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// A unit-length vector pointing along the positive Z axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Compute the dot product.
    pub fn dot(&self, v: &Self) -> Float {
        dot3(self, v)
    }

    /// Take the cross product of this and a vector v.
    /// Uses an EFT method for calculating the value with minimal error without
    /// casting to f64. See PBRTv4 3.3.2.
    pub fn cross(&self, v: &Self) -> Self {
        cross(self, v)
    }

    /// Returns a unit vector orthogonal to this one, which must be normalized.
    ///
    /// Deterministic and branch-free apart from the sign of z; see Duff et al.,
    /// "Building an Orthonormal Basis, Revisited" (2017).
    pub fn orthogonal(&self) -> Self {
        debug_assert!(self.is_normalized());
        let sign = Float::copysign(1.0, self.z);
        let a = -1.0 / (sign + self.z);
        let b = self.x * self.y * a;
        Vector3f::new(1.0 + sign * self.x * self.x * a, sign * b, -sign * self.x)
    }
}

impl Tuple3 for Vector3f {
    fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    fn x(&self) -> Float {
        self.x
    }

    fn y(&self) -> Float {
        self.y
    }

    fn z(&self) -> Float {
        self.z
    }
}

impl HasNan for Vector3f {
    fn has_nan(&self) -> bool {
        has_nan3(self)
    }
}

impl Length for Vector3f {
    fn length_squared(&self) -> Float {
        length_squared3(self)
    }
}

impl Normalize for Vector3f {}

impl Default for Vector3f {
    fn default() -> Self {
        Self::ZERO
    }
}

impl_op_ex!(-|v: &Vector3f| -> Vector3f {
    Vector3f {
        x: -v.x,
        y: -v.y,
        z: -v.z,
    }
});

impl_op_ex!(+|v1: &Vector3f, v2: &Vector3f| -> Vector3f {
    Vector3f {
        x: v1.x + v2.x,
        y: v1.y + v2.y,
        z: v1.z + v2.z,
    }
});

impl_op_ex!(-|v1: &Vector3f, v2: &Vector3f| -> Vector3f {
    Vector3f {
        x: v1.x - v2.x,
        y: v1.y - v2.y,
        z: v1.z - v2.z,
    }
});

impl_op_ex_commutative!(*|v: &Vector3f, s: Float| -> Vector3f {
    Vector3f {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
});

impl_op_ex!(/|v: &Vector3f, s: Float| -> Vector3f {
    Vector3f {
        x: v.x / s,
        y: v.y / s,
        z: v.z / s,
    }
});

impl_op_ex!(+=|v1: &mut Vector3f, v2: &Vector3f| {
    v1.x += v2.x;
    v1.y += v2.y;
    v1.z += v2.z;
});

impl_op_ex!(*=|v: &mut Vector3f, s: Float| {
    v.x *= s;
    v.y *= s;
    v.z *= s;
});

impl From<Normal3f> for Vector3f {
    fn from(n: Normal3f) -> Self {
        Vector3f::new(n.x, n.y, n.z)
    }
}

impl From<Point3f> for Vector3f {
    fn from(p: Point3f) -> Self {
        Vector3f::new(p.x, p.y, p.z)
    }
}

impl From<[Float; 3]> for Vector3f {
    fn from(value: [Float; 3]) -> Self {
        Vector3f::new(value[0], value[1], value[2])
    }
}
