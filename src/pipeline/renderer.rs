use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// Creates a new renderer.
    /// sample_count: 1 for no AA, 2 for 2x2 SSAA, etc.
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    /// Clears the framebuffer to the given background color.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color, f32::INFINITY);
    }

    /// Draws a mesh using the provided shader.
    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, shader: &S) {
        // Vertex processing & primitive assembly: indices in chunks of 3.
        for chunk in mesh.indices.chunks(3) {
            if chunk.len() < 3 {
                break;
            }

            let v0 = &mesh.vertices[chunk[0] as usize];
            let v1 = &mesh.vertices[chunk[1] as usize];
            let v2 = &mesh.vertices[chunk[2] as usize];

            let (pos0, var0) = shader.vertex(v0);
            let (pos1, var1) = shader.vertex(v1);
            let (pos2, var2) = shader.vertex(v2);

            self.rasterizer.rasterize_triangle(
                &mut self.framebuffer,
                shader,
                &[pos0, pos1, pos2],
                &[var0, var1, var2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use crate::pipeline::shaders::phong::PhongShader;
    use nalgebra::{Matrix4, Point3};

    #[test]
    fn test_triangle_shades_the_center_pixel() {
        let mut renderer = Renderer::new(32, 32, 1);
        renderer.clear(Vector3::zeros());

        let mesh = Mesh::create_test_triangle();
        let view = TransformFactory::view(
            &Point3::new(0.0, 0.0, 1.0),
            &Point3::origin(),
            &nalgebra::Vector3::y(),
        );
        let projection = TransformFactory::perspective(1.0, 45.0_f32.to_radians(), 0.1, 100.0);
        let shader = PhongShader::new(Matrix4::identity(), view, projection);

        renderer.draw_mesh(&mesh, &shader);

        // The triangle straddles the view center; its depth and a non-black
        // color must have landed there.
        let center = renderer.framebuffer.get_pixel(16, 16).unwrap();
        assert!(center.norm() > 0.0);
        assert!(renderer.framebuffer.depth_at(16, 16).unwrap() < f32::INFINITY);

        // A corner pixel stays untouched.
        let corner = renderer.framebuffer.get_pixel(0, 0).unwrap();
        assert_eq!(corner, Vector3::zeros());
    }
}
