use crate::core::color::Color;
use nalgebra::Point3;

/// A triangle ready for rasterization.
///
/// `vertices` are in screen space: x/y in pixels, z the post-divide NDC depth
/// used for depth comparison only.
#[derive(Debug, Clone, Copy)]
pub struct ScreenTriangle {
    pub vertices: [Point3<f32>; 3],
    pub color: Color,
    /// Mean of the three vertex depths, used to order triangles.
    pub avg_depth: f32,
}

impl ScreenTriangle {
    pub fn new(vertices: [Point3<f32>; 3], color: Color) -> Self {
        let avg_depth = (vertices[0].z + vertices[1].z + vertices[2].z) / 3.0;
        Self {
            vertices,
            color,
            avg_depth,
        }
    }
}

/// Orders triangles farthest first (painter's order).
pub fn sort_back_to_front(triangles: &mut [ScreenTriangle]) {
    triangles.sort_by(|a, b| b.avg_depth.total_cmp(&a.avg_depth));
}
