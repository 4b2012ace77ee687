use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

pub const DEFAULT_PITCH: f32 = 0.3;
pub const DEFAULT_YAW: f32 = 0.0;
pub const DEFAULT_DISTANCE: f32 = 3.5;

/// Pitch is kept inside +-89 degrees so the eye never crosses the pole.
pub fn max_pitch() -> f32 {
    89.0_f32.to_radians()
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_y_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_rad,
            aspect_ratio,
            near,
            far,
        }
    }

    /// 45 degree vertical field of view, near 0.1, far 100.
    pub fn for_viewport(width: usize, height: usize) -> Self {
        Self::new(45.0_f32.to_radians(), width as f32 / height as f32, 0.1, 100.0)
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far)
    }
}

/// A camera orbiting the origin on a sphere, always looking at the origin
/// with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Elevation in radians, clamped to +-89 degrees.
    pub pitch: f32,
    /// Azimuth in radians, unbounded.
    pub yaw: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub projection: Projection,
}

impl OrbitCamera {
    pub fn new(projection: Projection) -> Self {
        Self {
            pitch: DEFAULT_PITCH,
            yaw: DEFAULT_YAW,
            distance: DEFAULT_DISTANCE,
            min_distance: 0.5,
            max_distance: 10.0,
            projection,
        }
    }

    pub fn with_distance_range(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.distance = self.distance.clamp(min_distance, max_distance);
        self
    }

    /// Eye position from the spherical coordinates.
    pub fn eye(&self) -> Point3<f32> {
        Point3::new(
            self.distance * self.yaw.sin() * self.pitch.cos(),
            self.distance * self.pitch.sin(),
            self.distance * self.yaw.cos() * self.pitch.cos(),
        )
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.eye(), &Point3::origin(), &Vector3::y())
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix()
    }

    pub fn orbit_pitch(&mut self, delta: f32) {
        let limit = max_pitch();
        self.pitch = (self.pitch + delta).clamp(-limit, limit);
    }

    pub fn orbit_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    /// Positive `delta` moves the eye away from the origin.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(self.min_distance, self.max_distance);
    }

    pub fn reset(&mut self) {
        self.pitch = DEFAULT_PITCH;
        self.yaw = DEFAULT_YAW;
        self.distance = DEFAULT_DISTANCE;
    }
}
