pub mod renderer;
pub mod shading;
pub mod transform;
