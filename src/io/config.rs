use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    /// Orbit target in world space.
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_distance")]
    pub distance: f32,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Orbit speed in degrees per pixel of drag.
    #[serde(default = "default_rot_speed")]
    pub rot_speed: f32,
    /// Dolly units per scroll step.
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.0],
            distance: default_distance(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            rot_speed: default_rot_speed(),
            zoom_speed: default_zoom_speed(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Supersampling factor: 1 for no AA, 2 for 2x2 SSAA, etc.
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_background")]
    pub background: [f32; 3],
    /// Output path for headless mode.
    #[serde(default = "default_output")]
    pub output: String,
    /// "back", "front", or "none".
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            background: default_background(),
            output: default_output(),
            cull_mode: default_cull_mode(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    800
}
fn default_title() -> String {
    "Faceted Shading".to_string()
}
fn default_distance() -> f32 {
    1.0
}
fn default_fov() -> f32 {
    30.0
}
fn default_near() -> f32 {
    0.001
}
fn default_far() -> f32 {
    500.0
}
fn default_rot_speed() -> f32 {
    0.3
}
fn default_zoom_speed() -> f32 {
    0.05
}
fn default_samples() -> usize {
    2
}
fn default_background() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}
fn default_output() -> String {
    "face.png".to_string()
}
fn default_cull_mode() -> String {
    "none".to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.camera.fov, 30.0);
        assert_eq!(config.render.cull_mode, "none");
    }

    #[test]
    fn partial_sections_fill_in() {
        let config: Config = toml::from_str("[camera]\nfov = 45.0\n").unwrap();
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.camera.near, 0.001);
        assert_eq!(config.window.height, 800);
    }
}
