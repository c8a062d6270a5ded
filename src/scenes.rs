use crate::camera::Camera;
use crate::color::Color;
use crate::hittable::{Cube, Primitive, Scene, Sphere};
use crate::light::Light;
use crate::material::Material;
use crate::vec3::{Float, Point3};
use itertools::iproduct;

/// Edge length of one landscape block.
const CUBE_SIZE: Float = 2.0;

/// Half-extent of the block grid on the x and z axes.
const LANDSCAPE_SIZE: i32 = 10;

fn stone() -> Material {
    Material::opaque(Color::new(128, 128, 128), 0.6, 0.2, 30.0)
}

fn water() -> Material {
    Material::new(Color::new(28, 107, 160), 0.5, 0.8, 50.0, 0.5, 0.8, 1.33)
}

fn leaves() -> Material {
    Material::new(Color::new(0, 128, 0), 0.8, 0.2, 10.0, 0.0, 0.2, 1.0)
}

fn wood() -> Material {
    Material::opaque(Color::new(83, 53, 10), 0.8, 0.1, 10.0)
}

fn sand() -> Material {
    Material::opaque(Color::new(194, 178, 128), 0.8, 0.1, 10.0)
}

fn glass() -> Material {
    Material::new(Color::WHITE, 0.1, 1.0, 125.0, 0.0, 0.9, 0.1)
}

fn block(x: Float, y: Float, z: Float, material: Material) -> Primitive {
    Primitive::from(Cube::new(
        Point3::new(x, y, z),
        Point3::new(x + CUBE_SIZE, y + CUBE_SIZE, z + CUBE_SIZE),
        material,
    ))
}

/// Blocky mountain landscape with a stepped waterfall, sand base, a handful
/// of trees and one glass sphere. Fully deterministic; the push order below
/// is what the shadow tester's insertion-order scan observes.
pub fn waterfall_scene() -> Scene {
    let mut scene = Scene::new();
    let grid = (-LANDSCAPE_SIZE..=LANDSCAPE_SIZE).step_by(2);

    // Stone hill with a radial falloff
    for (x, z) in iproduct!(grid.clone(), grid.clone()) {
        let height = (8.0 - ((x * x + z * z) as Float).sqrt()).max(0.0);
        let mut y = 0;
        while (y as Float) < height {
            scene.push(block(x as Float, y as Float, z as Float, stone()));
            y += 2;
        }
    }

    // Sand base layer under the whole grid
    for (x, z) in iproduct!(grid.clone(), grid.clone()) {
        scene.push(block(x as Float, -2.0, z as Float, sand()));
    }

    // Water steps descending from the crest, moving outward each step
    let mut z = -4;
    let mut y = 7;
    while y >= 0 {
        scene.push(block(0.0, y as Float, z as Float, water()));
        z -= 2;
        y -= 2;
    }

    // Plunge-pool column where the fall lands
    let mut y = 0;
    while y >= -12 {
        scene.push(block(0.0, y as Float, z as Float, water()));
        y -= 2;
    }

    // Trees: three-block trunk, leaf canopy ringing the trunk top
    let tree_positions = [(-8, 8), (10, -10), (-10, 10), (8, -8), (-6, -6)];
    for (tx, tz) in tree_positions {
        for y in (0..=4).step_by(2) {
            scene.push(block(tx as Float, y as Float, tz as Float, wood()));
        }
        for (x, z) in iproduct!((tx - 2..=tx + 2).step_by(2), (tz - 2..=tz + 2).step_by(2)) {
            if x != tx || z != tz {
                scene.push(block(x as Float, 6.0, z as Float, leaves()));
            }
        }
    }

    scene.push(Primitive::from(Sphere::new(
        Point3::new(-12.0, 8.0, -10.0),
        2.0,
        glass(),
    )));

    scene
}

pub fn default_light() -> Light {
    Light::new(Point3::new(0.0, 14.0, -60.0), 1.5, Color::WHITE)
}

pub fn default_camera() -> Camera {
    Camera::new(Point3::new(-2.0, 14.0, -30.0), Point3::zeros(), 10.0)
}
