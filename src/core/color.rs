use nalgebra::Vector3;

/// Converts linear RGB to sRGB (Gamma Correction).
pub fn linear_to_srgb(color: Vector3<f32>) -> Vector3<f32> {
    let gamma = 1.0 / 2.2;
    Vector3::new(
        color.x.powf(gamma),
        color.y.powf(gamma),
        color.z.powf(gamma),
    )
}

/// Packs a linear color into a 0RGB u32 for presentation.
/// Shading intensity is allowed to exceed 1.0; clamping happens here only.
pub fn linear_to_argb(color: Vector3<f32>) -> u32 {
    let srgb = linear_to_srgb(color);
    let r = (srgb.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (srgb.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (srgb.z.clamp(0.0, 1.0) * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}
