use crate::core::color::Color;
use crate::core::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::core::pipeline::Palette;
use crate::core::rasterizer::RenderMode;
use crate::pipeline::shading::{ShadingParams, ShuttlePalette, UniformPalette};
use crate::scene::camera::{OrbitCamera, Projection};
use crate::scene::light::{DirectionalLight, LightPreset};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub shading: ShadingConfig,
    #[serde(default)]
    pub light: LightConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background")]
    pub background: [u8; 3],

    // --- Pipeline & Debug ---
    #[serde(default = "default_mode")]
    pub mode: String, // "fill", "wireframe"
    #[serde(default)]
    pub flip_y: bool,

    // --- Main loop ---
    #[serde(default = "default_frame_delay")]
    pub frame_delay_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            background: default_background(),
            mode: default_mode(),
            flip_y: false,
            frame_delay_ms: default_frame_delay(),
        }
    }
}

fn default_width() -> usize {
    SCREEN_WIDTH
}
fn default_height() -> usize {
    SCREEN_HEIGHT
}
fn default_output() -> String {
    "frame.png".to_string()
}
fn default_background() -> [u8; 3] {
    [10, 10, 15]
}
fn default_mode() -> String {
    "fill".to_string()
}
fn default_frame_delay() -> u64 {
    16
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            rotation_speed: default_rotation_speed(),
            zoom_speed: default_zoom_speed(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_min_distance() -> f32 {
    0.5
}
fn default_max_distance() -> f32 {
    10.0
}
fn default_rotation_speed() -> f32 {
    0.08
}
fn default_zoom_speed() -> f32 {
    0.15
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_spin_speed")]
    pub spin_speed: f32,
    #[serde(default = "default_palette")]
    pub palette: String, // "shuttle", "uniform"
    #[serde(default = "default_uniform_color")]
    pub uniform_color: [u8; 3],
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            spin_speed: default_spin_speed(),
            palette: default_palette(),
            uniform_color: default_uniform_color(),
        }
    }
}

fn default_model_path() -> String {
    "Modelo3D.obj".to_string()
}
fn default_spin_speed() -> f32 {
    0.1
}
fn default_palette() -> String {
    "shuttle".to_string()
}
fn default_uniform_color() -> [u8; 3] {
    [200, 200, 200]
}

#[derive(Debug, Deserialize)]
pub struct ShadingConfig {
    #[serde(default = "default_ambient")]
    pub ambient: f32,
    #[serde(default = "default_diffuse")]
    pub diffuse: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            ambient: default_ambient(),
            diffuse: default_diffuse(),
        }
    }
}

fn default_ambient() -> f32 {
    0.4
}
fn default_diffuse() -> f32 {
    0.6
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
        }
    }
}

fn default_preset() -> String {
    "front".to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.render.width == 0 || self.render.height == 0 {
            return Err(format!(
                "Invalid resolution {}x{}",
                self.render.width, self.render.height
            ));
        }
        if self.camera.min_distance > self.camera.max_distance {
            return Err("camera.min_distance exceeds camera.max_distance".to_string());
        }
        self.render_mode()?;
        self.light_preset()?;
        self.palette()?;
        Ok(())
    }

    pub fn render_mode(&self) -> Result<RenderMode, String> {
        match self.render.mode.as_str() {
            "fill" => Ok(RenderMode::Fill),
            "wireframe" => Ok(RenderMode::Wireframe),
            other => Err(format!("Unknown render mode '{}'", other)),
        }
    }

    pub fn light_preset(&self) -> Result<LightPreset, String> {
        self.light.preset.parse()
    }

    pub fn palette(&self) -> Result<Box<dyn Palette>, String> {
        match self.model.palette.as_str() {
            "shuttle" => Ok(Box::new(ShuttlePalette)),
            "uniform" => Ok(Box::new(UniformPalette(Color::from_rgb_array(
                self.model.uniform_color,
            )))),
            other => Err(format!("Unknown palette '{}'", other)),
        }
    }

    pub fn background(&self) -> Color {
        Color::from_rgb_array(self.render.background)
    }

    pub fn shading_params(&self) -> ShadingParams {
        ShadingParams {
            ambient: self.shading.ambient,
            diffuse: self.shading.diffuse,
        }
    }

    pub fn build_camera(&self) -> OrbitCamera {
        let projection = Projection::new(
            self.camera.fov.to_radians(),
            self.render.width as f32 / self.render.height as f32,
            self.camera.near,
            self.camera.far,
        );
        OrbitCamera::new(projection)
            .with_distance_range(self.camera.min_distance, self.camera.max_distance)
    }

    pub fn build_light(&self) -> Result<DirectionalLight, String> {
        Ok(DirectionalLight::from_preset(self.light_preset()?))
    }
}
