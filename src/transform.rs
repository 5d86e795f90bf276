use auto_ops::impl_op_ex;

use crate::{
    frame::Frame,
    vecmath::{Normal3f, Point3f, Vector3f},
    Float,
};

#[cfg(feature = "use_f64")]
type Mat4 = glam::DMat4;
#[cfg(feature = "use_f64")]
type Vec3 = glam::DVec3;
#[cfg(feature = "use_f64")]
type Vec4 = glam::DVec4;

#[cfg(not(feature = "use_f64"))]
type Mat4 = glam::Mat4;
#[cfg(not(feature = "use_f64"))]
type Vec3 = glam::Vec3;
#[cfg(not(feature = "use_f64"))]
type Vec4 = glam::Vec4;

/// An affine transformation together with its inverse.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Transform {
    m: Mat4,
    // Inverse of m
    m_inv: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: Mat4::IDENTITY,
        m_inv: Mat4::IDENTITY,
    };

    /// The rotation whose rows are the frame axes, taking frame-relative
    /// coordinates to local ones. The inverse is the transpose.
    pub fn from_frame(frame: &Frame) -> Transform {
        let m_inv = Mat4::from_cols(
            Vec4::new(frame.x.x, frame.x.y, frame.x.z, 0.0),
            Vec4::new(frame.y.x, frame.y.y, frame.y.z, 0.0),
            Vec4::new(frame.z.x, frame.z.y, frame.z.z, 0.0),
            Vec4::W,
        );
        Transform {
            m: m_inv.transpose(),
            m_inv,
        }
    }

    pub fn translate(delta: Vector3f) -> Transform {
        let d = to_glam(&delta);
        Transform {
            m: Mat4::from_translation(d),
            m_inv: Mat4::from_translation(-d),
        }
    }

    pub fn scale(x: Float, y: Float, z: Float) -> Transform {
        Transform {
            m: Mat4::from_scale(Vec3::new(x, y, z)),
            m_inv: Mat4::from_scale(Vec3::new(1.0 / x, 1.0 / y, 1.0 / z)),
        }
    }

    pub fn inverse(&self) -> Transform {
        Transform {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    pub fn apply<T: Transformable>(&self, val: &T) -> T {
        val.apply(self)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Allow composition of transformations; t2 is applied first.
impl_op_ex!(*|t1: &Transform, t2: &Transform| -> Transform {
    Transform {
        m: t1.m * t2.m,
        m_inv: t2.m_inv * t1.m_inv,
    }
});

pub trait Transformable {
    fn apply(&self, transform: &Transform) -> Self;
}

impl Transformable for Point3f {
    fn apply(&self, transform: &Transform) -> Self {
        let p = transform.m.project_point3(Vec3::new(self.x, self.y, self.z));
        Point3f::new(p.x, p.y, p.z)
    }
}

impl Transformable for Vector3f {
    fn apply(&self, transform: &Transform) -> Self {
        from_glam(transform.m.transform_vector3(to_glam(self)))
    }
}

impl Transformable for Normal3f {
    fn apply(&self, transform: &Transform) -> Self {
        // Normals are transformed by the inverse transpose.
        let n = transform
            .m_inv
            .transpose()
            .transform_vector3(Vec3::new(self.x, self.y, self.z));
        Normal3f::new(n.x, n.y, n.z)
    }
}

fn to_glam(v: &Vector3f) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn from_glam(v: Vec3) -> Vector3f {
    Vector3f::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::{
        frame::Frame,
        vecmath::{Normal3f, Normalize, Point3f, Vector3f},
        Float,
    };

    use super::Transform;

    fn assert_vec_eq(a: Vector3f, b: Vector3f) {
        assert_approx_eq!(Float, a.x, b.x, epsilon = 1e-5);
        assert_approx_eq!(Float, a.y, b.y, epsilon = 1e-5);
        assert_approx_eq!(Float, a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn translate_points_not_vectors() {
        let t = Transform::translate(Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(Point3f::new(1.0, 2.0, 3.0), t.apply(&Point3f::ZERO));
        assert_eq!(Vector3f::X, t.apply(&Vector3f::X));
        assert_eq!(Point3f::ZERO, t.inverse().apply(&Point3f::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn composition_applies_right_first() {
        let t = Transform::translate(Vector3f::new(1.0, 0.0, 0.0)) * Transform::scale(2.0, 2.0, 2.0);
        assert_eq!(Point3f::new(3.0, 2.0, 2.0), t.apply(&Point3f::new(1.0, 1.0, 1.0)));
        let back = t.inverse().apply(&Point3f::new(3.0, 2.0, 2.0));
        assert_approx_eq!(Float, 1.0, back.x, epsilon = 1e-6);
    }

    #[test]
    fn normals_use_inverse_transpose() {
        let t = Transform::scale(1.0, 4.0, 1.0);
        let n = t.apply(&Normal3f::new(0.0, 1.0, 0.0));
        assert_approx_eq!(Float, 0.25, n.y);
        // Perpendicularity to a transformed tangent is preserved.
        let tangent = Vector3f::new(1.0, 1.0, 0.0);
        let n = Normal3f::new(1.0, -1.0, 0.0);
        let tt = t.apply(&tangent);
        let tn = t.apply(&n);
        assert_approx_eq!(Float, 0.0, tn.dot_vector(&tt), epsilon = 1e-6);
    }

    #[test]
    fn frame_transform_maps_normal_to_z() {
        let n = Vector3f::new(0.2, 0.9, -0.3).normalize();
        let frame = Frame::from_z(n);
        let (to_surface, to_primitive) = frame.transforms();
        assert_vec_eq(Vector3f::Z, to_surface.apply(&n));
        assert_vec_eq(frame.x, to_primitive.apply(&Vector3f::X));
        assert!((to_surface * to_primitive).m.abs_diff_eq(super::Mat4::IDENTITY, 1e-5));
    }
}
