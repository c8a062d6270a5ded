use crate::camera::Camera;
use crate::hittable::Scene;
use crate::light::Light;
use crate::skybox::Background;
use crate::tracer::{cast_ray, RenderContext};
use log::{error, info};
use pixels::{Error, Pixels, SurfaceTexture};
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

pub const WIDTH: u32 = 600;
pub const HEIGHT: u32 = 400;

/// Fills the RGBA framebuffer with one traced color per pixel. Strictly
/// serial: every pixel's ray tree resolves before the next pixel starts.
fn render_frame(camera: &Camera, ctx: &RenderContext, frame: &mut [u8]) {
    let viewport = camera.viewport(WIDTH, HEIGHT);
    for (i, pixel) in frame.chunks_exact_mut(4).enumerate() {
        let x = i as u32 % WIDTH;
        let y = i as u32 / WIDTH;
        let ray = viewport.primary_ray(x, y);
        let color = cast_ray(ctx, &ray, 0);
        pixel.copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }
}

/// Opens the preview window and re-renders the scene every frame while
/// handling the orbit/zoom keyboard controls.
pub fn run(
    mut camera: Camera,
    scene: Scene,
    light: Light,
    background: Box<dyn Background>,
) -> Result<(), Error> {
    let event_loop = EventLoop::new();
    let size = LogicalSize::new(WIDTH, HEIGHT);
    let window = WindowBuilder::new()
        .with_title("cubescape")
        .with_inner_size(size)
        .with_min_inner_size(size)
        .build(&event_loop)
        .expect("failed to create window");

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(WIDTH, HEIGHT, surface_texture)?
    };

    let mut frame_count = 0u32;
    let mut last_frame = Instant::now();
    let mut elapsed = 0.0f64;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(key),
                                ..
                            },
                        ..
                    },
                ..
            } => match key {
                VirtualKeyCode::Q | VirtualKeyCode::Escape => {
                    *control_flow = ControlFlow::Exit
                }
                VirtualKeyCode::Up => camera.dolly(-1.0),
                VirtualKeyCode::Down => camera.dolly(1.0),
                VirtualKeyCode::A => camera.rotate(-1.0, 0.0),
                VirtualKeyCode::D => camera.rotate(1.0, 0.0),
                VirtualKeyCode::W => camera.rotate(0.0, -1.0),
                VirtualKeyCode::S => camera.rotate(0.0, 1.0),
                _ => {}
            },
            Event::WindowEvent {
                event: WindowEvent::Resized(new_size),
                ..
            } => {
                if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                    error!("failed to resize surface: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => window.request_redraw(),
            Event::RedrawRequested(_) => {
                let ctx = RenderContext {
                    scene: &scene,
                    light: &light,
                    background: background.as_ref(),
                };
                render_frame(&camera, &ctx, pixels.frame_mut());
                if pixels.render().is_err() {
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                frame_count += 1;
                elapsed += last_frame.elapsed().as_secs_f64();
                last_frame = Instant::now();
                if elapsed >= 1.0 {
                    info!("fps: {:.1}", frame_count as f64 / elapsed);
                    frame_count = 0;
                    elapsed = 0.0;
                }
            }
            _ => (),
        }
    });
}
