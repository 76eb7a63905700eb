use crate::core::geometry::Vertex;
use crate::core::pipeline::{Interpolatable, Shader};
use nalgebra::{Matrix4, Point3, Vector3};
use std::ops::{Add, Mul};

/// Data interpolated across the triangle surface, all in eye space.
#[derive(Clone, Copy, Debug)]
pub struct PhongVarying {
    /// Normal vector in eye space.
    pub normal: Vector3<f32>,
    /// Surface position in eye space (the camera sits at the origin).
    pub position: Point3<f32>,
}

// Math operations required for barycentric interpolation. nalgebra's Point3
// doesn't support addition directly, so positions go through coords.
impl Add for PhongVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            position: Point3::from(self.position.coords + other.position.coords),
        }
    }
}

impl Mul<f32> for PhongVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            position: Point3::from(self.position.coords * scalar),
        }
    }
}

impl Interpolatable for PhongVarying {}

/// Phong lighting with a single fixed point light, evaluated in eye space.
///
/// Both dot products are taken unsigned, so back-facing geometry receives
/// diffuse light and highlights — the mesh is an open surface and is meant to
/// read as lit from either side. Intensity is not clamped; highlights are
/// allowed to blow past white until presentation.
pub struct PhongShader {
    // Matrices
    pub model_matrix: Matrix4<f32>,
    pub view_matrix: Matrix4<f32>,
    pub projection_matrix: Matrix4<f32>,

    /// Light position in eye space, just in front of the camera.
    pub light_pos: Point3<f32>,
    /// Ambient floor.
    pub ambient: f32,
    /// Base surface grey.
    pub base_color: Vector3<f32>,
    /// Specular exponent.
    pub shininess: f32,
}

impl PhongShader {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model_matrix: model,
            view_matrix: view,
            projection_matrix: projection,
            light_pos: Point3::new(0.0, 0.0, -1.0),
            ambient: 0.1,
            base_color: Vector3::new(0.35, 0.35, 0.35),
            shininess: 100.0,
        }
    }
}

impl Shader for PhongShader {
    type Varying = PhongVarying;

    fn vertex(&self, vertex: &Vertex) -> (nalgebra::Vector4<f32>, Self::Varying) {
        let modelview = self.view_matrix * self.model_matrix;

        // 1. Position to eye space, then clip space
        let eye_pos_homo = modelview * vertex.position.to_homogeneous();
        let clip_pos = self.projection_matrix * eye_pos_homo;
        let eye_pos = Point3::from(eye_pos_homo.xyz() / eye_pos_homo.w);

        // 2. Normal to eye space
        // TODO: use the inverse transpose here; the fixed vertical stretch is
        // mild enough that the upper-left 3x3 doesn't visibly skew shading.
        let normal_matrix = modelview.fixed_view::<3, 3>(0, 0);
        let eye_normal = normal_matrix * vertex.normal;

        let varying = PhongVarying {
            normal: eye_normal,
            position: eye_pos,
        };

        (clip_pos, varying)
    }

    fn fragment(&self, varying: Self::Varying) -> Vector3<f32> {
        // Degenerate normals (vertices no face touches) shade as ambient only.
        let n = varying
            .normal
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);

        let l = (self.light_pos - varying.position)
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);

        // Diffuse, unsigned
        let d = n.dot(&l).abs();

        // Specular: reflect L about N, compare against the view direction
        let r = n * (2.0 * n.dot(&l)) - l;
        let e = (-varying.position.coords)
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);
        let s = r.dot(&e).abs().powf(self.shininess);

        let intensity = self.ambient + d + s;
        self.base_color * intensity
    }
}
