use crate::ray::Ray;
use crate::vec3::{Float, Point3, Vec3};
use nalgebra::UnitQuaternion;

/// Horizontal field of view in degrees.
pub const FOV_DEGREES: Float = 90.0;

/// Orbit camera: `position` circles `target` under keyboard control.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub position: Point3,
    pub target: Point3,
    rotation_speed: Float,
}

impl Camera {
    pub fn new(position: Point3, target: Point3, rotation_speed: Float) -> Self {
        Camera {
            position,
            target,
            rotation_speed,
        }
    }

    /// Orbits the camera position around its target, yaw about the world Y
    /// axis first, then pitch about the world X axis. Deltas are in steps of
    /// `rotation_speed` degrees.
    pub fn rotate(&mut self, delta_x: Float, delta_y: Float) {
        let yaw = UnitQuaternion::from_axis_angle(
            &Vec3::y_axis(),
            (delta_x * self.rotation_speed).to_radians(),
        );
        let pitch = UnitQuaternion::from_axis_angle(
            &Vec3::x_axis(),
            (delta_y * self.rotation_speed).to_radians(),
        );

        self.position = self.target + yaw * (self.position - self.target);
        self.position = self.target + pitch * (self.position - self.target);
    }

    /// Translates the camera along its view direction.
    pub fn dolly(&mut self, delta: Float) {
        let dir = (self.target - self.position).normalize();
        self.position += dir * delta;
    }

    /// Snapshot of the ray-generation basis for one frame of the given
    /// resolution.
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&Vec3::new(0.0, 1.0, 0.0)).normalize();
        let up = right.cross(&forward);

        Viewport {
            origin: self.position,
            forward,
            right,
            up,
            aspect_ratio: width as Float / height as Float,
            fov_scale: (FOV_DEGREES.to_radians() / 2.0).tan(),
            width_inv: 1.0 / width as Float,
            height_inv: 1.0 / height as Float,
        }
    }
}

/// Per-frame ray generator. Immutable once built, so camera motion between
/// frames cannot skew a frame that is mid-render.
pub struct Viewport {
    origin: Point3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    aspect_ratio: Float,
    fov_scale: Float,
    width_inv: Float,
    height_inv: Float,
}

impl Viewport {
    /// Primary ray through the center of pixel `(x, y)`.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let ndc_x = (2 * x + 1) as Float * self.width_inv - 1.0;
        let ndc_y = 1.0 - (2 * y + 1) as Float * self.height_inv;

        let direction = (self.forward
            + self.right * (ndc_x * self.aspect_ratio * self.fov_scale)
            + self.up * (ndc_y * self.fov_scale))
            .normalize();
        Ray::new(self.origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, -10.0), Point3::zeros(), 10.0);
        camera.rotate(3.0, 2.0);
        assert_abs_diff_eq!((camera.position - camera.target).norm(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn quarter_yaw_orbit_lands_on_the_side() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, -10.0), Point3::zeros(), 10.0);
        camera.rotate(9.0, 0.0); // 9 steps of 10 degrees
        assert_abs_diff_eq!(camera.position.x, -10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.position.y, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.position.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn dolly_moves_along_view_direction() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, -10.0), Point3::zeros(), 10.0);
        camera.dolly(2.0);
        assert_abs_diff_eq!(camera.position.z, -8.0, epsilon = 1e-5);
        camera.dolly(-2.0);
        assert_abs_diff_eq!(camera.position.z, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn center_pixel_ray_points_at_target() {
        let camera = Camera::new(Point3::new(0.0, 0.0, -10.0), Point3::zeros(), 10.0);
        let viewport = camera.viewport(601, 401);
        // Odd resolution puts the middle pixel center exactly on the axis
        let ray = viewport.primary_ray(300, 200);
        assert_abs_diff_eq!(ray.direction.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(ray.direction.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(ray.direction.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn primary_rays_are_unit_length() {
        let camera = Camera::new(Point3::new(-2.0, 14.0, -30.0), Point3::zeros(), 10.0);
        let viewport = camera.viewport(600, 400);
        for (x, y) in [(0, 0), (599, 0), (0, 399), (599, 399), (300, 200)] {
            assert_abs_diff_eq!(viewport.primary_ray(x, y).direction.norm(), 1.0, epsilon = 1e-5);
        }
    }
}
