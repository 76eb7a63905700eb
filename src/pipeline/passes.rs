use crate::core::color::linear_to_argb;
use crate::core::framebuffer::FrameBuffer;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};

/// Renders one frame of the scene into the renderer's framebuffer.
pub fn render_frame(
    renderer: &mut Renderer,
    mesh: &Mesh,
    camera: &Camera,
    model_matrix: &Matrix4<f32>,
    background: Vector3<f32>,
) {
    renderer.clear(background);

    let shader = PhongShader::new(
        *model_matrix,
        camera.view_matrix(),
        camera.projection_matrix(),
    );

    renderer.draw_mesh(mesh, &shader);
}

/// Resolves the framebuffer into a presentable 0RGB buffer
/// (supersample average -> gamma -> clamp -> pack).
pub fn resolve_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    for y in 0..framebuffer.height {
        for x in 0..framebuffer.width {
            let color = framebuffer.get_pixel(x, y).unwrap_or_else(Vector3::zeros);
            buffer[y * framebuffer.width + x] = linear_to_argb(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::face;
    use nalgebra::Point3;

    #[test]
    fn face_frame_renders_into_the_buffer() {
        let mut renderer = Renderer::new(64, 64, 1);
        let mesh = face::face_mesh().unwrap();
        let camera = Camera::new(
            Point3::origin(),
            1.0,
            30.0,
            0.001,
            500.0,
            0.3,
            0.05,
            64,
            64,
        );

        render_frame(
            &mut renderer,
            &mesh,
            &camera,
            &face::model_transform(),
            Vector3::zeros(),
        );

        let mut buffer = vec![0u32; 64 * 64];
        resolve_to_buffer(&renderer.framebuffer, &mut buffer);

        // The face fills a good part of the default framing; something other
        // than the black background must have been written.
        assert!(buffer.iter().any(|&px| px & 0x00FF_FFFF != 0));
    }
}
