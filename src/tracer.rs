use crate::color::Color;
use crate::hittable::{Hittable, Primitive};
use crate::intersection::Intersection;
use crate::light::Light;
use crate::ray::Ray;
use crate::skybox::Background;
use crate::vec3::{Float, Point3, Vec3, Vec3Ext};

/// Bounce budget for reflection/refraction rays. Rays at this depth fall
/// through to the background even when they hit geometry.
pub const MAX_RECURSION_DEPTH: usize = 2;

/// Offset applied to secondary-ray origins to keep them from re-intersecting
/// the surface they were spawned on (shadow acne).
pub const BIAS: Float = 0.01;

/// Everything a frame's worth of rays is evaluated against. Built once per
/// frame and never mutated mid-frame.
pub struct RenderContext<'a> {
    pub scene: &'a [Primitive],
    pub light: &'a Light,
    pub background: &'a dyn Background,
}

/// Globally closest positive-distance hit, regardless of scene order.
pub fn nearest_hit(scene: &[Primitive], ray: &Ray) -> Option<(usize, Intersection)> {
    let mut nearest: Option<(usize, Intersection)> = None;
    for (index, primitive) in scene.iter().enumerate() {
        if let Some(hit) = primitive.intersect(ray) {
            if hit.distance > 0.0
                && nearest
                    .as_ref()
                    .map_or(true, |(_, best)| hit.distance < best.distance)
            {
                nearest = Some((index, hit));
            }
        }
    }
    nearest
}

/// Recursive entry point: one color per ray. Falls back to the background on
/// a miss or once the recursion budget is spent.
pub fn cast_ray(ctx: &RenderContext, ray: &Ray, depth: usize) -> Color {
    let Some((hit_index, hit)) = nearest_hit(ctx.scene, ray) else {
        return ctx.background.sample(&ray.direction);
    };
    if depth >= MAX_RECURSION_DEPTH {
        return ctx.background.sample(&ray.direction);
    }
    shade(ctx, ray, &hit, hit_index, depth)
}

/// Local diffuse/specular shading plus recursively gathered reflection and
/// refraction radiance.
pub fn shade(
    ctx: &RenderContext,
    ray: &Ray,
    hit: &Intersection,
    hit_index: usize,
    depth: usize,
) -> Color {
    let material = ctx.scene[hit_index].material();
    let light_dir = (ctx.light.position - hit.point).normalize();
    let view_dir = (ray.origin - hit.point).normalize();

    let shadow_origin = hit.point + light_dir * BIAS;
    let shadow_attenuation = cast_shadow(ctx, &shadow_origin, &light_dir, hit_index);
    let effective_intensity = shadow_attenuation * ctx.light.intensity;

    let diffuse_factor = hit.normal.dot(&light_dir).max(0.0);
    let diffuse =
        material.diffuse_color * (diffuse_factor * material.albedo * effective_intensity);

    // Reflection of the light vector about the normal. Reused below as the
    // mirror-bounce direction as well; see DESIGN.md on this quirk.
    let reflect_dir = (-light_dir).reflect(&hit.normal);
    let specular_factor = view_dir
        .dot(&reflect_dir)
        .max(0.0)
        .powf(material.specular_coefficient);
    let specular = ctx.light.color * (specular_factor * material.specular_albedo);

    let mut reflected = Color::BLACK;
    if material.reflectivity > 0.0 {
        let reflect_ray = Ray::new(hit.point + hit.normal * BIAS, reflect_dir);
        reflected = cast_ray(ctx, &reflect_ray, depth + 1) * material.reflectivity;
    }

    let mut refracted = Color::BLACK;
    if material.transparency > 0.0 {
        let refract_dir = ray.direction.refract(&hit.normal, material.refraction_index);
        // Origin pushed inward, across the surface, unlike the reflection ray
        let refract_ray = Ray::new(hit.point - hit.normal * BIAS, refract_dir);
        refracted = cast_ray(ctx, &refract_ray, depth + 1) * material.transparency;
    }

    // The local coefficient is deliberately not clamped; materials whose
    // reflectivity and transparency sum above 1 zero out the local term.
    let local_weight = 1.0 - material.reflectivity - material.transparency;
    (diffuse + specular) * local_weight + reflected + refracted
}

/// Single-ray shadow test with a distance-ratio intensity heuristic.
/// The first occluder in scene insertion order wins, not the nearest one.
pub fn cast_shadow(
    ctx: &RenderContext,
    shadow_origin: &Point3,
    light_dir: &Vec3,
    exclude_index: usize,
) -> Float {
    let shadow_ray = Ray::new(*shadow_origin, *light_dir);
    for (index, primitive) in ctx.scene.iter().enumerate() {
        if index == exclude_index {
            continue;
        }
        if let Some(hit) = primitive.intersect(&shadow_ray) {
            if hit.distance > 0.0 {
                let light_distance = (ctx.light.position - shadow_origin).norm();
                let shadow_factor = (hit.distance / light_distance).clamp(0.0, 1.0);
                return 1.0 - shadow_factor;
            }
        }
    }
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::{Cube, Scene, Sphere};
    use crate::material::Material;
    use approx::assert_abs_diff_eq;

    /// Constant-color background for deterministic expectations.
    struct FlatSky(Color);

    impl Background for FlatSky {
        fn sample(&self, _direction: &Vec3) -> Color {
            self.0
        }
    }

    fn context<'a>(
        scene: &'a [Primitive],
        light: &'a Light,
        background: &'a FlatSky,
    ) -> RenderContext<'a> {
        RenderContext {
            scene,
            light,
            background,
        }
    }

    fn matte(diffuse: Color) -> Material {
        Material::opaque(diffuse, 1.0, 0.0, 10.0)
    }

    fn mirror() -> Material {
        Material::new(Color::BLACK, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0)
    }

    fn far_light() -> Light {
        Light::new(Point3::new(0.0, 100.0, 0.0), 1.0, Color::WHITE)
    }

    #[test]
    fn empty_scene_returns_background_at_any_depth() {
        let scene: Scene = Vec::new();
        let light = far_light();
        let sky = FlatSky(Color::new(40, 50, 60));
        let ctx = context(&scene, &light, &sky);
        let ray = Ray::new(Point3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        assert_eq!(cast_ray(&ctx, &ray, 0), Color::new(40, 50, 60));
        assert_eq!(cast_ray(&ctx, &ray, 5), Color::new(40, 50, 60));
    }

    #[test]
    fn depth_exhausted_ray_falls_through_to_background() {
        let scene: Scene = vec![Primitive::from(Cube::new(
            Point3::new(-1.0, -1.0, 2.0),
            Point3::new(1.0, 1.0, 4.0),
            matte(Color::new(200, 0, 0)),
        ))];
        let light = far_light();
        let sky = FlatSky(Color::new(7, 8, 9));
        let ctx = context(&scene, &light, &sky);
        let ray = Ray::new(Point3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        // The cube is dead ahead, but the recursion budget is already spent
        assert_eq!(cast_ray(&ctx, &ray, MAX_RECURSION_DEPTH), Color::new(7, 8, 9));
    }

    #[test]
    fn nearest_hit_picks_closest_regardless_of_insertion_order() {
        let scene: Scene = vec![
            Primitive::from(Sphere::new(
                Point3::new(0.0, 0.0, 9.0),
                1.0,
                matte(Color::BLACK),
            )),
            Primitive::from(Sphere::new(
                Point3::new(0.0, 0.0, 3.0),
                1.0,
                matte(Color::BLACK),
            )),
        ];
        let ray = Ray::new(Point3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        let (index, hit) = nearest_hit(&scene, &ray).expect("both spheres are ahead");
        assert_eq!(index, 1);
        assert_abs_diff_eq!(hit.distance, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn lit_surface_gets_scaled_diffuse_color() {
        // Flat cube top, light directly overhead, no occluders
        let scene: Scene = vec![Primitive::from(Cube::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 2.0),
            matte(Color::new(100, 100, 100)),
        ))];
        let light = Light::new(Point3::new(1.0, 10.0, 1.0), 1.5, Color::WHITE);
        let sky = FlatSky(Color::BLACK);
        let ctx = context(&scene, &light, &sky);
        let ray = Ray::new(Point3::new(1.0, 5.0, 1.0), Vec3::new(0.0, -1.0, 0.0));

        // diffuse_factor = 1, albedo = 1, intensity = 1.5
        assert_eq!(cast_ray(&ctx, &ray, 0), Color::new(150, 150, 150));
    }

    #[test]
    fn mutually_reflective_surfaces_terminate_at_recursion_bound() {
        // Two facing mirrors; every bounce stays between them until the
        // budget runs out and the constant background comes back unchanged.
        let scene: Scene = vec![
            Primitive::from(Cube::new(
                Point3::new(-10.0, -10.0, 5.0),
                Point3::new(10.0, 10.0, 6.0),
                mirror(),
            )),
            Primitive::from(Cube::new(
                Point3::new(-10.0, -10.0, -6.0),
                Point3::new(10.0, 10.0, -5.0),
                mirror(),
            )),
        ];
        let light = Light::new(Point3::zeros(), 1.0, Color::WHITE);
        let sky = FlatSky(Color::new(33, 66, 99));
        let ctx = context(&scene, &light, &sky);
        let ray = Ray::new(Point3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0));

        // reflectivity = 1 zeroes the local term, so the result is exactly
        // the background folded through the bounded reflection chain
        assert_eq!(cast_ray(&ctx, &ray, 0), Color::new(33, 66, 99));
    }

    #[test]
    fn shadow_attenuation_matches_distance_ratio() {
        // Occluder halfway to the light: factor 0.5 either way
        let scene: Scene = vec![
            Primitive::from(Sphere::new(
                Point3::new(0.0, 0.0, 6.0),
                1.0,
                matte(Color::BLACK),
            )),
            // Stand-in for the primitive being shaded, far out of the way
            Primitive::from(Sphere::new(
                Point3::new(100.0, 0.0, 0.0),
                1.0,
                matte(Color::BLACK),
            )),
        ];
        let light = Light::new(Point3::new(0.0, 0.0, 10.0), 1.0, Color::WHITE);
        let sky = FlatSky(Color::BLACK);
        let ctx = context(&scene, &light, &sky);

        let attenuation =
            cast_shadow(&ctx, &Point3::zeros(), &Vec3::new(0.0, 0.0, 1.0), 1);
        assert_abs_diff_eq!(attenuation, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn shadow_uses_first_occluder_in_insertion_order() {
        // The farther occluder was inserted first, so its distance decides
        // the attenuation even though a nearer occluder exists.
        let scene: Scene = vec![
            Primitive::from(Cube::new(
                Point3::new(-1.0, -1.0, 7.0),
                Point3::new(1.0, 1.0, 8.0),
                matte(Color::BLACK),
            )),
            Primitive::from(Sphere::new(
                Point3::new(0.0, 0.0, 2.0),
                0.5,
                matte(Color::BLACK),
            )),
        ];
        let light = Light::new(Point3::new(0.0, 0.0, 100.0), 1.0, Color::WHITE);
        let sky = FlatSky(Color::BLACK);
        let ctx = context(&scene, &light, &sky);

        let attenuation =
            cast_shadow(&ctx, &Point3::zeros(), &Vec3::new(0.0, 0.0, 1.0), usize::MAX);
        assert_abs_diff_eq!(attenuation, 1.0 - 7.0 / 100.0, epsilon = 1e-5);
    }

    #[test]
    fn shadow_skips_the_shaded_primitive() {
        let scene: Scene = vec![Primitive::from(Sphere::new(
            Point3::new(0.0, 0.0, 5.0),
            1.0,
            matte(Color::BLACK),
        ))];
        let light = Light::new(Point3::new(0.0, 0.0, 10.0), 1.0, Color::WHITE);
        let sky = FlatSky(Color::BLACK);
        let ctx = context(&scene, &light, &sky);

        let attenuation =
            cast_shadow(&ctx, &Point3::zeros(), &Vec3::new(0.0, 0.0, 1.0), 0);
        assert_abs_diff_eq!(attenuation, 1.0);
    }

    #[test]
    fn over_unity_material_keeps_only_secondary_radiance() {
        // reflectivity + transparency = 1.2: the local coefficient goes
        // negative and the clamped color arithmetic zeroes the local term
        let glassy = Material::new(Color::new(200, 0, 0), 1.0, 0.0, 10.0, 0.6, 0.6, 1.0);
        let scene: Scene = vec![Primitive::from(Sphere::new(
            Point3::new(0.0, 0.0, 5.0),
            1.0,
            glassy,
        ))];
        let light = Light::new(Point3::new(0.0, 0.0, -10.0), 1.0, Color::WHITE);
        let sky = FlatSky(Color::new(100, 100, 100));
        let ctx = context(&scene, &light, &sky);
        let ray = Ray::new(Point3::zeros(), Vec3::new(0.0, 0.0, 1.0));

        // Both secondary rays escape to the flat sky: 100 * 0.6 twice
        assert_eq!(cast_ray(&ctx, &ray, 0), Color::new(120, 120, 120));
    }
}
