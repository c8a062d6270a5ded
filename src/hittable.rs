use crate::intersection::Intersection;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Float, Point3, Vec3};
use enum_dispatch::enum_dispatch;

/// Absolute tolerance used to match a cube hit point against its face planes.
const FACE_EPSILON: Float = 1e-4;

#[enum_dispatch]
pub trait Hittable {
    /// Tests the ray against this primitive, returning the nearest accepted
    /// intersection or `None` on a miss.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;

    fn material(&self) -> &Material;
}

/// The closed set of primitives the tracer knows how to intersect.
#[enum_dispatch(Hittable)]
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere,
    Cube,
}

/// Ordered primitive list. Insertion order is semantically relevant to the
/// shadow tester's first-occluder scan, so builders must not reorder it.
pub type Scene = Vec<Primitive>;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point3,
    pub radius: Float,
    material: Material,
}

impl Sphere {
    pub fn new(center: Point3, radius: Float, material: Material) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Only the near root is considered. A ray starting inside the sphere
        // therefore never hits it; see the intentional-quirks notes in
        // DESIGN.md before changing this.
        let distance = (-b - discriminant.sqrt()) / (2.0 * a);
        if distance < 0.0 {
            return None;
        }

        let point = ray.at(distance);
        let normal = (point - self.center).normalize();
        Some(Intersection::new(point, normal, distance))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// Axis-aligned box spanning `min`..`max`.
#[derive(Clone, Debug)]
pub struct Cube {
    pub min: Point3,
    pub max: Point3,
    material: Material,
}

impl Cube {
    pub fn new(min: Point3, max: Point3, material: Material) -> Self {
        Cube { min, max, material }
    }

    /// Face normal for a point lying on the cube surface. Faces are tested in
    /// a fixed x-min, x-max, y-min, y-max, z-min, z-max order and the first
    /// match wins, which keeps edge and corner hits deterministic.
    fn face_normal(&self, point: &Point3) -> Vec3 {
        if (point.x - self.min.x).abs() < FACE_EPSILON {
            Vec3::new(-1.0, 0.0, 0.0)
        } else if (point.x - self.max.x).abs() < FACE_EPSILON {
            Vec3::new(1.0, 0.0, 0.0)
        } else if (point.y - self.min.y).abs() < FACE_EPSILON {
            Vec3::new(0.0, -1.0, 0.0)
        } else if (point.y - self.max.y).abs() < FACE_EPSILON {
            Vec3::new(0.0, 1.0, 0.0)
        } else if (point.z - self.min.z).abs() < FACE_EPSILON {
            Vec3::new(0.0, 0.0, -1.0)
        } else if (point.z - self.max.z).abs() < FACE_EPSILON {
            Vec3::new(0.0, 0.0, 1.0)
        } else {
            Vec3::zeros()
        }
    }
}

impl Hittable for Cube {
    /// Slab method. Division by a zero direction component yields a signed
    /// infinity, which the min/max folding below relies on.
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let inv_dir = ray.direction.map(|c| 1.0 / c);
        let t0 = (self.min - ray.origin).component_mul(&inv_dir);
        let t1 = (self.max - ray.origin).component_mul(&inv_dir);

        let t_min = t0.inf(&t1);
        let t_max = t0.sup(&t1);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near > t_far || t_far < 0.0 {
            return None;
        }

        let point = ray.at(t_near);
        Some(Intersection::new(point, self.face_normal(&point), t_near))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
