use crate::core::geometry::Vertex;
use nalgebra::{Vector3, Vector4};
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// Requirements:
/// - Copy + Clone: cheaply duplicable values for per-vertex storage and interpolation.
/// - Add + Mul<f32>: support linear combination (a + b * t) used by barycentric interpolation.
pub trait Interpolatable: Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> {}

/// Shader represents the programmable stages of the pipeline.
///
/// Associated types:
/// - Varying: per-vertex outputs from the vertex stage that will be interpolated
///   for each fragment.
pub trait Shader {
    /// Per-vertex varying data to be interpolated and provided to the fragment shader.
    type Varying: Interpolatable;

    /// Vertex shader stage.
    ///
    /// Transforms the given vertex into homogeneous clip space used by
    /// clipping and perspective divide, and returns the varying data that
    /// will be interpolated across the primitive.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Fragment shader stage.
    ///
    /// Computes the final linear RGB color for the current fragment from the
    /// interpolated varying. Values may exceed 1.0; clamping is deferred to
    /// presentation.
    fn fragment(&self, varying: Self::Varying) -> Vector3<f32>;
}
