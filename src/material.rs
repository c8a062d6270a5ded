use crate::color::Color;
use crate::vec3::Float;

/// Surface reflectance parameters consumed by the shading engine.
///
/// `reflectivity` and `transparency` are each expected in [0, 1] but their
/// sum is not clamped; configurations summing above 1 flow through the
/// shading formula unmodified.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub diffuse_color: Color,
    pub albedo: Float,
    pub specular_albedo: Float,
    /// Exponent controlling highlight sharpness.
    pub specular_coefficient: Float,
    pub reflectivity: Float,
    pub transparency: Float,
    pub refraction_index: Float,
}

impl Material {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        diffuse_color: Color,
        albedo: Float,
        specular_albedo: Float,
        specular_coefficient: Float,
        reflectivity: Float,
        transparency: Float,
        refraction_index: Float,
    ) -> Self {
        Material {
            diffuse_color,
            albedo,
            specular_albedo,
            specular_coefficient,
            reflectivity,
            transparency,
            refraction_index,
        }
    }

    /// Purely diffuse/specular surface with no secondary rays.
    pub fn opaque(
        diffuse_color: Color,
        albedo: Float,
        specular_albedo: Float,
        specular_coefficient: Float,
    ) -> Self {
        Material::new(
            diffuse_color,
            albedo,
            specular_albedo,
            specular_coefficient,
            0.0,
            0.0,
            0.0,
        )
    }
}
