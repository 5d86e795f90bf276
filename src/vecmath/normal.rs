use auto_ops::{impl_op_ex, impl_op_ex_commutative};

use super::has_nan::{has_nan3, HasNan};
use super::length::{length_squared3, Length};
use super::normalize::Normalize;
use super::tuple::{cross, dot3, Tuple3};
use super::Vector3f;
use crate::float::Float;

/// A surface normal. Kept distinct from Vector3f since normals transform by
/// the inverse transpose of a transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normal3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Normal3f {
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Compute the dot product of two normals.
    pub fn dot(&self, n: &Self) -> Float {
        dot3(self, n)
    }

    /// Compute the dot product with a vector.
    pub fn dot_vector(&self, v: &Vector3f) -> Float {
        dot3(self, v)
    }

    /// Cross this normal with a vector.
    /// Note that you cannot take the cross product of two normals.
    pub fn cross(&self, v: &Vector3f) -> Vector3f {
        cross(self, v)
    }
}

impl Tuple3 for Normal3f {
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

impl HasNan for Normal3f {
    fn has_nan(&self) -> bool {
        has_nan3(self)
    }
}

impl Length for Normal3f {
    fn length_squared(&self) -> Float {
        length_squared3(self)
    }
}

impl Normalize for Normal3f {}

impl_op_ex!(-|n: &Normal3f| -> Normal3f {
    Normal3f {
        x: -n.x,
        y: -n.y,
        z: -n.z,
    }
});

impl_op_ex_commutative!(*|n: &Normal3f, s: Float| -> Normal3f {
    Normal3f {
        x: n.x * s,
        y: n.y * s,
        z: n.z * s,
    }
});

impl_op_ex!(/|n: &Normal3f, s: Float| -> Normal3f {
    Normal3f {
        x: n.x / s,
        y: n.y / s,
        z: n.z / s,
    }
});

impl From<Vector3f> for Normal3f {
    fn from(v: Vector3f) -> Self {
        Normal3f::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::{Normal3f, Vector3f};

    #[test]
    fn normal_dot_vector() {
        let n = Normal3f::new(0.0, 0.0, 2.0);
        assert_eq!(1.0, n.dot_vector(&Vector3f::new(0.1, 0.0, 0.5)));
        assert_eq!(Normal3f::new(0.0, 0.0, -1.0), -n / 2.0);
    }

    #[test]
    fn normal_cross_vector() {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        assert_eq!(Vector3f::Y, n.cross(&Vector3f::X));
    }
}
