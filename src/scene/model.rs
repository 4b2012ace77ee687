use crate::core::math::transform::TransformFactory;
use nalgebra::Matrix4;

/// User-controlled spin of the model about its vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelState {
    /// Radians.
    pub rotation_y: f32,
}

impl ModelState {
    pub fn spin(&mut self, delta: f32) {
        self.rotation_y += delta;
    }

    pub fn reset(&mut self) {
        self.rotation_y = 0.0;
    }

    /// Fixed reorientation of the raw mesh (180 degrees about Y, then -90
    /// degrees about X) followed by the user spin.
    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::rotation_y(180.0_f32.to_radians())
            * TransformFactory::rotation_x(-90.0_f32.to_radians())
            * TransformFactory::rotation_y(self.rotation_y)
    }
}
