use crate::scene::camera::Camera;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

/// Valid field-of-view range in degrees. The boundaries themselves are legal
/// values; anything outside is clamped before it reaches the camera.
pub const FOV_MIN: f32 = 5.0;
pub const FOV_MAX: f32 = 150.0;

/// Degrees per press of the FOV key.
const FOV_STEP: f32 = 5.0;

/// Translates polled window state into discrete camera events.
///
/// Keeps only the previous left-button state for edge detection; all camera
/// state (including the drag anchor) lives in the camera itself.
#[derive(Default)]
pub struct CameraController {
    left_held: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, window: &Window, camera: &mut Camera) {
        // --- 1. Orbit drag (left button, edge-detected) ---
        let left = window.get_mouse_down(MouseButton::Left);
        if left {
            if let Some((x, y)) = window.get_mouse_pos(MouseMode::Pass) {
                if self.left_held {
                    camera.mouse_drag(x, y);
                } else {
                    camera.mouse_down(x, y);
                }
            }
        } else if self.left_held {
            camera.mouse_up();
        }
        self.left_held = left;

        // --- 2. Dolly (scroll wheel, positive pushes away) ---
        if let Some((_, scroll_y)) = window.get_scroll_wheel()
            && scroll_y != 0.0
        {
            camera.mouse_wheel(scroll_y);
        }

        // --- 3. Field of view (F widens, Shift+F narrows) ---
        if window.is_key_pressed(Key::F, KeyRepeat::No) {
            let shift =
                window.is_key_down(Key::LeftShift) || window.is_key_down(Key::RightShift);
            camera.set_fov(step_fov(camera.fov_y_deg, shift));
        }

        // --- 4. Viewport tracking ---
        let (width, height) = window.get_size();
        camera.resize(width, height);
    }
}

/// Steps the FOV by one notch and clamps to the valid range.
pub fn step_fov(current: f32, narrow: bool) -> f32 {
    let step = if narrow { -FOV_STEP } else { FOV_STEP };
    clamp_fov(current + step)
}

/// Clamping lives here, not in the camera: the camera stores whatever the
/// input layer hands it.
pub fn clamp_fov(fov: f32) -> f32 {
    fov.clamp(FOV_MIN, FOV_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_clamp_to_the_boundaries() {
        assert_eq!(clamp_fov(4.0), 5.0);
        assert_eq!(clamp_fov(-20.0), 5.0);
        assert_eq!(clamp_fov(151.0), 150.0);
        assert_eq!(clamp_fov(1000.0), 150.0);
    }

    #[test]
    fn in_range_values_pass_through() {
        assert_eq!(clamp_fov(5.0), 5.0);
        assert_eq!(clamp_fov(150.0), 150.0);
        assert_eq!(clamp_fov(30.0), 30.0);
    }

    #[test]
    fn stepping_stops_at_the_boundaries() {
        assert_eq!(step_fov(30.0, false), 35.0);
        assert_eq!(step_fov(30.0, true), 25.0);
        assert_eq!(step_fov(148.0, false), 150.0);
        assert_eq!(step_fov(7.0, true), 5.0);
    }
}
