//! Functions on directions expressed in a local shading space, where the
//! surface normal is the +z axis.

use crate::float::Float;

use super::Vector3f;

pub fn cos_theta(w: Vector3f) -> Float {
    w.z
}

pub fn abs_cos_theta(w: Vector3f) -> Float {
    w.z.abs()
}

/// True if both directions lie on the same side of the shading plane.
pub fn same_hemisphere(w: Vector3f, wp: Vector3f) -> bool {
    w.z * wp.z > 0.0
}
