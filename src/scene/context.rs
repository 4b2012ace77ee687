use crate::scene::camera::OrbitCamera;
use crate::scene::light::{DirectionalLight, LightPreset};
use crate::scene::model::ModelState;
use log::info;

/// A state change requested through the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    OrbitPitch(f32),
    OrbitYaw(f32),
    Zoom(f32),
    Spin(f32),
    /// Camera angles, distance and model spin back to their defaults.
    Reset,
    SelectLight(LightPreset),
}

/// Mutable per-run render state: everything a frame reads besides the mesh.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub camera: OrbitCamera,
    pub model: ModelState,
    pub light: DirectionalLight,
}

impl RenderContext {
    pub fn new(camera: OrbitCamera, light: DirectionalLight) -> Self {
        Self {
            camera,
            model: ModelState::default(),
            light,
        }
    }

    pub fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::OrbitPitch(delta) => self.camera.orbit_pitch(delta),
            ControlCommand::OrbitYaw(delta) => self.camera.orbit_yaw(delta),
            ControlCommand::Zoom(delta) => self.camera.zoom(delta),
            ControlCommand::Spin(delta) => {
                self.model.spin(delta);
                info!("Model rotation: {:.1} deg", self.model.rotation_y.to_degrees());
            }
            ControlCommand::Reset => {
                self.camera.reset();
                self.model.reset();
                info!("Camera and model rotation reset");
            }
            ControlCommand::SelectLight(preset) => {
                self.light.select(preset);
                info!("Light: {}", preset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::{Projection, max_pitch};

    fn context() -> RenderContext {
        RenderContext::new(
            OrbitCamera::new(Projection::for_viewport(800, 600)),
            DirectionalLight::default(),
        )
    }

    #[test]
    fn commands_route_to_state() {
        let mut ctx = context();
        ctx.apply(ControlCommand::OrbitYaw(0.5));
        ctx.apply(ControlCommand::Zoom(1.0));
        ctx.apply(ControlCommand::Spin(-0.1));
        ctx.apply(ControlCommand::SelectLight(LightPreset::Bottom));

        assert_eq!(ctx.camera.yaw, 0.5);
        assert_eq!(ctx.camera.distance, 4.5);
        assert_eq!(ctx.model.rotation_y, -0.1);
        assert_eq!(ctx.light.preset, LightPreset::Bottom);
    }

    #[test]
    fn pitch_command_respects_clamp() {
        let mut ctx = context();
        ctx.apply(ControlCommand::OrbitPitch(10.0));
        assert_eq!(ctx.camera.pitch, max_pitch());
    }

    #[test]
    fn reset_leaves_light_selection() {
        let mut ctx = context();
        ctx.apply(ControlCommand::SelectLight(LightPreset::Top));
        ctx.apply(ControlCommand::Spin(1.0));
        ctx.apply(ControlCommand::Reset);
        assert_eq!(ctx.model.rotation_y, 0.0);
        assert_eq!(ctx.light.preset, LightPreset::Top);
    }
}
