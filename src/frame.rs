use crate::{
    transform::Transform,
    vecmath::{Normal3f, Normalize, Vector3f},
};

/// An orthonormal basis. In a surface frame, `z` is the surface normal and
/// `x`/`y` are the tangent and bitangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f,
}

impl Frame {
    pub fn new(x: Vector3f, y: Vector3f, z: Vector3f) -> Frame {
        Frame { x, y, z }
    }

    pub fn from_xz(x: Vector3f, z: Vector3f) -> Frame {
        let y = z.cross(&x);
        Frame::new(x, y, z)
    }

    /// Builds a frame around z. The same z always yields the same frame.
    pub fn from_z(z: Vector3f) -> Frame {
        let z = z.normalize();
        Frame::from_xz(z.orthogonal(), z)
    }

    /// Surface frame at a hit point: tangent, bitangent = normal x tangent, normal.
    pub fn from_normal(normal: &Normal3f) -> Frame {
        Frame::from_z(Vector3f::from(*normal))
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }

    /// Returns (primitive_to_surface, surface_to_primitive).
    pub fn transforms(&self) -> (Transform, Transform) {
        let to_surface = Transform::from_frame(self);
        let to_primitive = to_surface.inverse();
        (to_surface, to_primitive)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            x: Vector3f::X,
            y: Vector3f::Y,
            z: Vector3f::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::{
        vecmath::{Length, Normal3f, Normalize, Vector3f},
        Float,
    };

    use super::Frame;

    #[test]
    fn frame_is_orthonormal_and_deterministic() {
        let normals = [
            Normal3f::new(0.0, 0.0, 1.0),
            Normal3f::new(0.0, 0.0, -1.0),
            Normal3f::new(0.3, -0.4, 0.2).normalize(),
            Normal3f::new(-1.0, 0.0, 0.0),
        ];
        for n in normals {
            let frame = Frame::from_normal(&n);
            assert_eq!(frame, Frame::from_normal(&n));
            assert_approx_eq!(Float, 1.0, frame.x.length(), epsilon = 1e-5);
            assert_approx_eq!(Float, 1.0, frame.y.length(), epsilon = 1e-5);
            assert_approx_eq!(Float, 0.0, frame.x.dot(&frame.y), epsilon = 1e-5);
            assert_approx_eq!(Float, 0.0, frame.x.dot(&frame.z), epsilon = 1e-5);
            let y = frame.z.cross(&frame.x);
            assert_approx_eq!(Float, 1.0, y.dot(&frame.y), epsilon = 1e-5);
        }
    }

    #[test]
    fn local_round_trip() {
        let frame = Frame::from_normal(&Normal3f::new(0.0, 1.0, 0.0));
        let v = Vector3f::new(0.2, 0.5, -0.7);
        let local = frame.to_local(&v);
        let back = frame.from_local(&local);
        assert_approx_eq!(Float, v.x, back.x, epsilon = 1e-6);
        assert_approx_eq!(Float, v.y, back.y, epsilon = 1e-6);
        assert_approx_eq!(Float, v.z, back.z, epsilon = 1e-6);
        // The normal maps onto +z.
        let n_local = frame.to_local(&Vector3f::Y);
        assert_approx_eq!(Float, 1.0, n_local.z, epsilon = 1e-6);
    }
}
