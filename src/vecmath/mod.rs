//! Why are there distinct types for **Vector** and **Point** and
//! **Normal**? Why not just use a unified vector class? Because they
//! are not the same, so let's capture that with our ~type system~.
//!
//! All **vectors** v in an affine space can be expressed as a linear
//! combination of the basis vectors, while **points** are additionally
//! expressed relative to an origin. A **surface normal** is perpendicular
//! to a surface at a particular position; it transforms differently from
//! a vector, which matters when moving between primitive space and
//! world space.

pub mod has_nan;
pub mod length;
pub mod normal;
pub mod normalize;
pub mod point;
pub mod spherical;
pub mod tuple;
pub mod vector;

pub use has_nan::HasNan;
pub use length::Length;
pub use normal::Normal3f;
pub use normalize::Normalize;
pub use point::{Point2f, Point3f};
pub use tuple::Tuple3;
pub use vector::Vector3f;
