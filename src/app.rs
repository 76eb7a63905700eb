use crate::core::rasterizer::CullMode;
use crate::io::config::Config;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::passes::{render_frame, resolve_to_buffer};
use crate::pipeline::renderer::Renderer;
use crate::scene::camera::Camera;
use crate::scene::face;
use crate::ui::input::{CameraController, clamp_fov};
use log::{debug, info};
use minifb::{Key, Window, WindowOptions};
use nalgebra::{Point3, Vector3};
use std::time::Instant;

fn cull_mode_from(name: &str) -> CullMode {
    match name {
        "back" => CullMode::Back,
        "front" => CullMode::Front,
        _ => CullMode::None,
    }
}

fn camera_from_config(config: &Config) -> Camera {
    Camera::new(
        Point3::from(config.camera.target),
        config.camera.distance,
        // Config values obey the same range as key input.
        clamp_fov(config.camera.fov),
        config.camera.near,
        config.camera.far,
        config.camera.rot_speed,
        config.camera.zoom_speed,
        config.window.width,
        config.window.height,
    )
}

/// Runs the application in GUI mode with real-time rendering and interactivity.
pub fn run_gui(config: Config) -> Result<(), String> {
    let width = config.window.width;
    let height = config.window.height;

    info!("Starting GUI mode ({width}x{height})...");
    info!("Controls: LeftDrag=Orbit, Scroll=Dolly, F/Shift+F=FOV, Esc=Quit");

    // 1. Build the scene
    let mesh = face::face_mesh()?;
    let model_matrix = face::model_transform();
    let background = Vector3::from(config.render.background);

    // 2. Initialize Window
    let mut window = Window::new(
        &config.window.title,
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| format!("Failed to create window: {e}"))?;

    window.set_target_fps(60);

    let mut camera = camera_from_config(&config);
    let mut controller = CameraController::new();

    let mut renderer = Renderer::new(width, height, config.render.samples);
    renderer
        .rasterizer
        .set_cull_mode(cull_mode_from(&config.render.cull_mode));

    let mut buffer = vec![0u32; width * height];
    let mut current_size = (width, height);

    let mut frame_count = 0u32;
    let mut last_fps_update = Instant::now();
    let mut last_frame_time = Instant::now();

    // 3. Main Loop
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Input ---
        controller.update(&window, &mut camera);

        // --- Resize ---
        let size = window.get_size();
        if size != current_size && size.0 > 0 && size.1 > 0 {
            debug!("Window resized to {}x{}", size.0, size.1);
            renderer = Renderer::new(size.0, size.1, config.render.samples);
            renderer
                .rasterizer
                .set_cull_mode(cull_mode_from(&config.render.cull_mode));
            buffer = vec![0u32; size.0 * size.1];
            current_size = size;
        }

        // --- Render & Display ---
        render_frame(&mut renderer, &mesh, &camera, &model_matrix, background);
        resolve_to_buffer(&renderer.framebuffer, &mut buffer);
        window
            .update_with_buffer(&buffer, current_size.0, current_size.1)
            .map_err(|e| format!("Failed to present frame: {e}"))?;

        window.set_title(&format!(
            "{} - {:.1} FPS - FOV: {:.0}",
            config.window.title,
            1.0 / dt.max(1e-6),
            camera.fov_y_deg
        ));

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            debug!(
                "Average FPS: {:.1}",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32()
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    Ok(())
}

/// Runs the application in headless mode for a single render to PNG.
pub fn run_cli(config: Config) -> Result<(), String> {
    info!("Starting headless mode...");
    let start_time = Instant::now();

    let mesh = face::face_mesh()?;
    let camera = camera_from_config(&config);

    let mut renderer = Renderer::new(
        config.window.width,
        config.window.height,
        config.render.samples,
    );
    renderer
        .rasterizer
        .set_cull_mode(cull_mode_from(&config.render.cull_mode));

    render_frame(
        &mut renderer,
        &mesh,
        &camera,
        &face::model_transform(),
        Vector3::from(config.render.background),
    );

    info!("Render completed in {:.2?}", start_time.elapsed());

    let mut buffer = vec![0u32; config.window.width * config.window.height];
    resolve_to_buffer(&renderer.framebuffer, &mut buffer);
    save_buffer_to_image(
        &buffer,
        config.window.width,
        config.window.height,
        &config.render.output,
    );
    info!("Saved to '{}'", config.render.output);

    Ok(())
}
