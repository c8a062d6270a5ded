pub mod camera;
pub mod color;
pub mod hittable;
pub mod intersection;
pub mod light;
pub mod material;
pub mod ray;
pub mod scenes;
pub mod skybox;
pub mod tracer;
pub mod vec3;
pub mod window;
