use crate::color::Color;
use crate::vec3::{Float, Vec3};
use image::RgbImage;
use std::f32::consts::PI;
use std::path::Path;

/// Radiance source for rays that leave the scene. Pure function of the ray
/// direction; always produces a color.
pub trait Background {
    fn sample(&self, direction: &Vec3) -> Color;
}

/// Equirectangular panorama sampled by ray direction.
pub struct Skybox {
    image: RgbImage,
}

impl Skybox {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let image = image::open(path)?.to_rgb8();
        Ok(Skybox::from_image(image))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Skybox { image }
    }
}

impl Background for Skybox {
    fn sample(&self, direction: &Vec3) -> Color {
        // Spherical coordinates of the direction vector
        let phi = direction.z.atan2(direction.x);
        let theta = direction.y.acos();

        // Texture coordinates, then nearest texel with wrap-then-clamp
        let u = 0.5 + phi / (2.0 * PI);
        let v = theta / PI;

        let width = self.image.width() as i32;
        let height = self.image.height() as i32;
        let x = ((u * width as Float) as i32 % width).clamp(0, width - 1);
        let y = ((v * height as Float) as i32 % height).clamp(0, height - 1);

        let pixel = self.image.get_pixel(x as u32, y as u32);
        Color::new(pixel[0], pixel[1], pixel[2])
    }
}

/// Fallback sky for when no panorama texture is available: vertical lerp
/// from white at the horizon to light blue overhead.
pub struct GradientSky;

impl Background for GradientSky {
    fn sample(&self, direction: &Vec3) -> Color {
        let unit = direction.normalize();
        let a = (unit.y + 1.0) / 2.0;
        Color::WHITE * (1.0 - a) + Color::new(128, 179, 255) * a
    }
}
