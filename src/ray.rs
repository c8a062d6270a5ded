use crate::vec3::{Float, Point3, Vec3};

/// Origin plus caller-normalized direction. The engine assumes unit length
/// wherever hit distances are compared against world-space lengths.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }

    pub fn at(&self, t: Float) -> Point3 {
        self.origin + self.direction * t
    }
}
