use crate::color::Color;
use crate::vec3::{Float, Point3};

/// The scene's single point light. Built once before rendering starts and
/// read-only for the lifetime of the render loop.
#[derive(Copy, Clone, Debug)]
pub struct Light {
    pub position: Point3,
    pub intensity: Float,
    pub color: Color,
}

impl Light {
    pub fn new(position: Point3, intensity: Float, color: Color) -> Self {
        Light {
            position,
            intensity,
            color,
        }
    }
}
