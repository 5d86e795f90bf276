use std::ops::Index;

use auto_ops::impl_op_ex;

use super::has_nan::{has_nan3, HasNan};
use super::length::Length;
use super::tuple::Tuple3;
use super::Vector3f;
use crate::float::Float;

// ---------------------------------------------------------------------------
//        Point2f
// ---------------------------------------------------------------------------

/// A pair of values, typically a 2D uniform sample in [0, 1)^2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: Float,
    pub y: Float,
}

impl Point2f {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }
}

impl Index<usize> for Point2f {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index <= 1);
        if index == 0 {
            &self.x
        } else {
            &self.y
        }
    }
}

// ---------------------------------------------------------------------------
//        Point3f
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Point3f {
    /// All zeroes.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, p: &Self) -> Float {
        (self - p).length()
    }

    pub fn distance_squared(&self, p: &Self) -> Float {
        (self - p).length_squared()
    }
}

impl Tuple3 for Point3f {
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

impl HasNan for Point3f {
    fn has_nan(&self) -> bool {
        has_nan3(self)
    }
}

// Point - Point is a Vector
impl_op_ex!(-|p1: &Point3f, p2: &Point3f| -> Vector3f {
    Vector3f {
        x: p1.x - p2.x,
        y: p1.y - p2.y,
        z: p1.z - p2.z,
    }
});

impl_op_ex!(+|p: &Point3f, v: &Vector3f| -> Point3f {
    Point3f {
        x: p.x + v.x,
        y: p.y + v.y,
        z: p.z + v.z,
    }
});

impl_op_ex!(-|p: &Point3f, v: &Vector3f| -> Point3f {
    Point3f {
        x: p.x - v.x,
        y: p.y - v.y,
        z: p.z - v.z,
    }
});

impl From<Vector3f> for Point3f {
    fn from(v: Vector3f) -> Self {
        Point3f::new(v.x, v.y, v.z)
    }
}

impl From<[Float; 3]> for Point3f {
    fn from(value: [Float; 3]) -> Self {
        Point3f::new(value[0], value[1], value[2])
    }
}

#[cfg(test)]
mod tests {
    use super::{Point3f, Vector3f};

    #[test]
    fn point_vector_arithmetic() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        let q = Point3f::new(4.0, 6.0, 3.0);
        assert_eq!(Vector3f::new(3.0, 4.0, 0.0), q - p);
        assert_eq!(q, p + Vector3f::new(3.0, 4.0, 0.0));
        assert_eq!(5.0, p.distance(&q));
        assert_eq!(25.0, q.distance_squared(&p));
    }
}
