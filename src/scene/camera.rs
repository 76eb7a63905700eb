use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::PI;

/// Pitch stops just short of the poles so the up vector never degenerates.
const PITCH_LIMIT: f32 = PI / 2.0 - 0.01;

/// Dolly range. The mesh fits well inside a unit sphere after scaling.
const MIN_DISTANCE: f32 = 0.05;
const MAX_DISTANCE: f32 = 100.0;

/// Orbit camera around a fixed look-at target.
///
/// Owns every piece of camera state: orbit angles, dolly distance,
/// field-of-view, viewport size, and the transient drag anchor. Input
/// handlers feed it discrete events; the frame loop reads derived matrices.
/// Idle and dragging are distinguished by `drag` being `None` or holding the
/// last cursor position.
#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Point3<f32>,
    pub distance: f32,
    /// Horizontal orbit angle (radians).
    pub yaw: f32,
    /// Vertical orbit angle (radians), clamped short of the poles.
    pub pitch: f32,
    /// Vertical field of view in degrees. The input layer clamps before
    /// calling `set_fov`; the camera stores whatever it is given.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,

    width: usize,
    height: usize,

    /// Orbit speed in degrees per pixel of drag.
    rot_speed: f32,
    /// Dolly units per scroll step.
    zoom_speed: f32,

    drag: Option<(f32, f32)>,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        target: Point3<f32>,
        distance: f32,
        fov_y_deg: f32,
        near: f32,
        far: f32,
        rot_speed: f32,
        zoom_speed: f32,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            target,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            yaw: 0.0,
            pitch: 0.0,
            fov_y_deg,
            near,
            far,
            width,
            height,
            rot_speed,
            zoom_speed,
            drag: None,
        }
    }

    // --- Input events ---

    /// Left button pressed: record the drag anchor.
    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.drag = Some((x, y));
    }

    /// Cursor moved with the button held. Ignored while idle.
    pub fn mouse_drag(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.drag else {
            return;
        };

        let dx = x - last_x;
        let dy = y - last_y;
        let step = self.rot_speed.to_radians();

        self.yaw += dx * step;
        self.pitch = (self.pitch - dy * step).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.drag = Some((x, y));
    }

    /// Left button released: back to idle.
    pub fn mouse_up(&mut self) {
        self.drag = None;
    }

    /// Scroll: positive delta pushes the camera away from the target.
    pub fn mouse_wheel(&mut self, delta: f32) {
        self.distance = (self.distance + delta * self.zoom_speed).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Overwrites the field of view. The caller is responsible for keeping
    /// the value inside the valid range.
    pub fn set_fov(&mut self, fov_y_deg: f32) {
        self.fov_y_deg = fov_y_deg;
    }

    /// Tracks the window size for the projection's aspect ratio.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // --- Derived outputs (recomputed on demand, never cached) ---

    /// Camera position on the orbit sphere around the target.
    pub fn eye_position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        self.target
            + self.distance
                * Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// World-to-eye transform looking at the target.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.eye_position(), &self.target, &Vector3::y())
    }

    /// Perspective projection from the current FOV, aspect, and clip planes.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        TransformFactory::perspective(
            self.aspect(),
            self.fov_y_deg.to_radians(),
            self.near,
            self.far,
        )
    }

    /// Viewport aspect ratio; falls back to 1.0 while either dimension is
    /// zero (mid-resize on some window managers) instead of dividing by zero.
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(
            Point3::origin(),
            1.0,
            30.0,
            0.001,
            500.0,
            0.3,
            0.05,
            800,
            800,
        )
    }

    #[test]
    fn drag_changes_orbit_proportionally_to_deltas() {
        let mut cam = test_camera();
        let step = 0.3_f32.to_radians();

        cam.mouse_down(100.0, 100.0);
        cam.mouse_drag(110.0, 95.0);

        assert!((cam.yaw - 10.0 * step).abs() < 1e-6);
        assert!((cam.pitch - 5.0 * step).abs() < 1e-6);

        // Second drag accumulates from the updated anchor.
        cam.mouse_drag(120.0, 95.0);
        assert!((cam.yaw - 20.0 * step).abs() < 1e-6);
    }

    #[test]
    fn drag_without_button_down_is_ignored() {
        let mut cam = test_camera();
        cam.mouse_drag(50.0, 50.0);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn drag_after_release_is_ignored() {
        let mut cam = test_camera();
        cam.mouse_down(0.0, 0.0);
        cam.mouse_drag(10.0, 0.0);
        let yaw_after_drag = cam.yaw;

        cam.mouse_up();
        cam.mouse_drag(100.0, 100.0);

        assert_eq!(cam.yaw, yaw_after_drag);
        assert_eq!(cam.pitch, 0.0);
        assert!(!cam.is_dragging());
    }

    #[test]
    fn positive_scrolls_strictly_increase_distance() {
        let mut cam = test_camera();
        let mut last = cam.distance;

        for _ in 0..3 {
            cam.mouse_wheel(1.0);
            assert!(cam.distance > last);
            last = cam.distance;
        }
    }

    #[test]
    fn set_fov_stores_boundary_values_untouched() {
        let mut cam = test_camera();
        cam.set_fov(5.0);
        assert_eq!(cam.fov_y_deg, 5.0);
        cam.set_fov(150.0);
        assert_eq!(cam.fov_y_deg, 150.0);
    }

    #[test]
    fn zero_sized_viewport_falls_back_to_square_aspect() {
        let mut cam = test_camera();

        cam.resize(0, 600);
        assert_eq!(cam.aspect(), 1.0);
        let _ = cam.projection_matrix(); // must not divide by zero

        cam.resize(800, 0);
        assert_eq!(cam.aspect(), 1.0);

        cam.resize(800, 600);
        assert!((cam.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_places_target_straight_ahead() {
        let cam = test_camera();
        let view = cam.view_matrix();

        let target_in_view = view * cam.target.to_homogeneous();
        assert!(target_in_view.x.abs() < 1e-5);
        assert!(target_in_view.y.abs() < 1e-5);
        assert!((target_in_view.z + cam.distance).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut cam = test_camera();
        cam.mouse_down(0.0, 0.0);
        cam.mouse_drag(0.0, -100000.0);
        assert!(cam.pitch <= PITCH_LIMIT);

        // The view matrix stays valid at the clamp.
        let view = cam.view_matrix();
        assert!(view.iter().all(|v| v.is_finite()));
    }
}
