use crate::core::math::transform::{TransformFactory, apply_perspective_division};
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Point3};

/// The matrices of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub viewport: Matrix4<f32>,
    /// `view * model`
    pub model_view: Matrix4<f32>,
    /// `projection * view * model`
    pub mvp: Matrix4<f32>,
}

impl FrameTransforms {
    pub fn new(context: &RenderContext, width: usize, height: usize, flip_y: bool) -> Self {
        let model = context.model.matrix();
        let view = context.camera.view_matrix();
        let projection = context.camera.projection_matrix();
        let viewport = TransformFactory::viewport(width as f32, height as f32, flip_y);

        Self {
            model,
            view,
            projection,
            viewport,
            model_view: view * model,
            mvp: projection * view * model,
        }
    }

    /// View-space position of an already normalized vertex.
    #[inline]
    pub fn to_view(&self, normalized: &Point3<f32>) -> Point3<f32> {
        self.model_view.transform_point(normalized)
    }
}

/// Object space to screen space.
///
/// Normalizes `v` against the mesh bounds, applies `mvp`, divides by w (left
/// undivided when w is zero), then maps x/y through `viewport`. The returned z
/// is the NDC depth, not a pixel quantity.
pub fn transform_vertex(
    v: &Point3<f32>,
    mesh: &Mesh,
    mvp: &Matrix4<f32>,
    viewport: &Matrix4<f32>,
) -> Point3<f32> {
    let centered = mesh.normalize_position(v);
    let clip = mvp * centered.to_homogeneous();
    let ndc = apply_perspective_division(&clip);
    let screen = viewport * ndc;

    Point3::new(screen.x, screen.y, ndc.z)
}
