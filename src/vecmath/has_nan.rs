use super::tuple::Tuple3;

pub trait HasNan {
    fn has_nan(&self) -> bool;
}

pub(super) fn has_nan3<V: Tuple3>(v: &V) -> bool {
    v.x().is_nan() || v.y().is_nan() || v.z().is_nan()
}

impl HasNan for [crate::Float] {
    fn has_nan(&self) -> bool {
        self.iter().any(|v| v.is_nan())
    }
}
