use crate::{float::Float, math::difference_of_products};

use super::has_nan::HasNan;

/// A tuple with 3 elements.
/// Used for sharing logic across e.g. Vector3f and Normal3f and Point3f.
pub trait Tuple3 {
    fn new(x: Float, y: Float, z: Float) -> Self;

    fn x(&self) -> Float;
    fn y(&self) -> Float;
    fn z(&self) -> Float;
}

/// Computes the cross product of two vectors. Generic because we want to be able
/// to use this for Vector and Normal types alike, and combinations of them.
///
/// NOTE: The cross product of two Normals is not valid, so don't do that.
/// The public vecmath interface doesn't allow e.g. Normal3f.cross(Normal3f).
pub(super) fn cross<V1, V2, V3>(v1: &V1, v2: &V2) -> V3
where
    V1: Tuple3,
    V2: Tuple3,
    V3: Tuple3,
{
    V3::new(
        difference_of_products(v1.y(), v2.z(), v1.z(), v2.y()),
        difference_of_products(v1.z(), v2.x(), v1.x(), v2.z()),
        difference_of_products(v1.x(), v2.y(), v1.y(), v2.x()),
    )
}

/// Take the dot product of two vectors.
pub(super) fn dot3<V1, V2>(v: &V1, w: &V2) -> Float
where
    V1: Tuple3 + HasNan,
    V2: Tuple3 + HasNan,
{
    debug_assert!(!v.has_nan());
    debug_assert!(!w.has_nan());
    v.x() * w.x() + v.y() * w.y() + v.z() * w.z()
}
