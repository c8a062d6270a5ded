use nalgebra::Vector3;

pub type Float = f32;
pub type Vec3 = Vector3<Float>;
pub type Point3 = Vector3<Float>;

/// Vector helpers the shading engine needs on top of what nalgebra provides.
pub trait Vec3Ext {
    /// Reflects `self` about `normal`. Expects `normal` to be unit length.
    fn reflect(&self, normal: &Vec3) -> Vec3;

    /// Refracts `self` through a surface with unit `normal` and refraction
    /// ratio `eta`. Returns the zero vector on total internal reflection,
    /// which then propagates through the caster as a degenerate ray.
    fn refract(&self, normal: &Vec3, eta: Float) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn reflect(&self, normal: &Vec3) -> Vec3 {
        self - normal * (2.0 * normal.dot(self))
    }

    fn refract(&self, normal: &Vec3, eta: Float) -> Vec3 {
        let cos_incident = normal.dot(self);
        let k = 1.0 - eta * eta * (1.0 - cos_incident * cos_incident);
        if k < 0.0 {
            return Vec3::zeros();
        }
        self * eta - normal * (eta * cos_incident + k.sqrt())
    }
}
