use crate::vec3::{Float, Point3, Vec3};

/// Outcome of a successful ray-vs-primitive query. A miss is `None` at the
/// call site, so there is no partially-initialized state to misread.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    pub point: Point3,
    /// Unit-length surface normal at `point`.
    pub normal: Vec3,
    /// Parametric distance from the ray origin along its direction.
    pub distance: Float,
}

impl Intersection {
    pub fn new(point: Point3, normal: Vec3, distance: Float) -> Self {
        Intersection {
            point,
            normal,
            distance,
        }
    }
}
