use cubescape::scenes;
use cubescape::skybox::{Background, GradientSky, Skybox};
use cubescape::window;
use log::{error, warn};

fn main() {
    env_logger::init();

    let camera = scenes::default_camera();
    let scene = scenes::waterfall_scene();
    let light = scenes::default_light();

    let background: Box<dyn Background> = match Skybox::load("textures/skybox.jpg") {
        Ok(skybox) => Box::new(skybox),
        Err(err) => {
            warn!("no skybox texture, using gradient sky: {err}");
            Box::new(GradientSky)
        }
    };

    if let Err(err) = window::run(camera, scene, light, background) {
        error!("renderer exited with error: {err}");
    }
}
