use crate::{
    transform::Transform,
    vecmath::{Normal3f, Point3f},
};

/// Geometry of a ray-surface hit, in the primitive's local space.
#[derive(Debug, Clone)]
pub struct SurfaceInteraction {
    pub hit_point: Point3f,
    /// Hit point nudged just inside the surface, for launching rays without
    /// re-hitting it.
    pub inside_point: Point3f,
    /// Hit point nudged just outside the surface.
    pub outside_point: Point3f,
    /// Outward-facing unit normal.
    pub normal: Normal3f,
    /// True if the ray is leaving the primitive (hit the back face).
    pub exiting: bool,
    pub world_to_primitive: Transform,
    pub primitive_to_world: Transform,
}

/// A straight path through the interior of a primitive, in local space.
#[derive(Debug, Clone)]
pub struct VolumeSegment {
    pub start_point: Point3f,
    pub end_point: Point3f,
    pub world_to_primitive: Transform,
    pub primitive_to_world: Transform,
}
