use crate::float::Float;

use super::{has_nan::HasNan, tuple::Tuple3};

pub trait Length: HasNan {
    fn length_squared(&self) -> Float;

    fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
}

pub(super) fn length_squared3<V: Tuple3 + HasNan>(v: &V) -> Float {
    debug_assert!(!v.has_nan());
    v.x() * v.x() + v.y() * v.y() + v.z() * v.z()
}
