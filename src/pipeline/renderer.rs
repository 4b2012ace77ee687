use crate::core::color::Color;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{ScreenTriangle, sort_back_to_front};
use crate::core::pipeline::Palette;
use crate::core::rasterizer::Rasterizer;
use crate::pipeline::shading::{ShadingParams, face_normal, is_front_facing, light_intensity, shade};
use crate::pipeline::transform::{FrameTransforms, transform_vertex};
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use log::trace;
use nalgebra::Point3;

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    /// Faces with fewer than three indices or an index past the vertex list.
    pub skipped: usize,
    pub culled: usize,
    pub drawn: usize,
}

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
    pub shading: ShadingParams,
    pub background: Color,
    pub flip_y: bool,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
            shading: ShadingParams::default(),
            background: Color::rgb(10, 10, 15),
            flip_y: false,
        }
    }

    /// Clears the framebuffer.
    pub fn clear(&mut self) {
        self.framebuffer.clear(self.background);
    }

    /// Renders one complete frame of `mesh` into the framebuffer.
    pub fn render_frame<P: Palette>(
        &mut self,
        mesh: &Mesh,
        context: &RenderContext,
        palette: &P,
    ) -> FrameStats {
        self.clear();

        let transforms = FrameTransforms::new(
            context,
            self.framebuffer.width,
            self.framebuffer.height,
            self.flip_y,
        );
        let (mut triangles, mut stats) = self.assemble(mesh, context, palette, &transforms);

        sort_back_to_front(&mut triangles);
        for triangle in &triangles {
            self.rasterizer.draw(&mut self.framebuffer, triangle);
        }

        stats.drawn = triangles.len();
        trace!("Frame: {:?}", stats);
        stats
    }

    /// Transforms, culls and shades every face. Returns the visible triangles
    /// in face order.
    pub fn assemble<P: Palette>(
        &self,
        mesh: &Mesh,
        context: &RenderContext,
        palette: &P,
        transforms: &FrameTransforms,
    ) -> (Vec<ScreenTriangle>, FrameStats) {
        let mut stats = FrameStats {
            faces: mesh.faces.len(),
            ..Default::default()
        };
        let mut triangles = Vec::with_capacity(mesh.faces.len());

        for face in &mesh.faces {
            let Some(object) = mesh.triangle(face) else {
                stats.skipped += 1;
                continue;
            };

            let screen =
                object.map(|v| transform_vertex(&v, mesh, &transforms.mvp, &transforms.viewport));

            let normalized = object.map(|v| mesh.normalize_position(&v));
            let view = normalized.map(|v| transforms.to_view(&v));
            let normal = face_normal(&view[0], &view[1], &view[2]);

            if !is_front_facing(&view, &normal) {
                stats.culled += 1;
                continue;
            }

            let centroid = Point3::from(
                (normalized[0].coords + normalized[1].coords + normalized[2].coords) / 3.0,
            );
            let intensity = light_intensity(&normal, &context.light.direction);
            let color = shade(palette.base_color(&centroid), intensity, &self.shading);

            triangles.push(ScreenTriangle::new(screen, color));
        }

        (triangles, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::framebuffer::DEPTH_CLEAR;
    use crate::pipeline::shading::UniformPalette;
    use crate::scene::camera::{OrbitCamera, Projection};
    use crate::scene::light::DirectionalLight;
    use crate::scene::mesh::Face;

    fn context(width: usize, height: usize) -> RenderContext {
        RenderContext::new(
            OrbitCamera::new(Projection::for_viewport(width, height)),
            DirectionalLight::default(),
        )
    }

    fn drawn_pixels(fb: &FrameBuffer) -> usize {
        fb.depths().iter().filter(|&&d| d != DEPTH_CLEAR).count()
    }

    #[test]
    fn reversed_winding_is_culled() {
        let vertices = vec![
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = Mesh::new(vertices, vec![Face::new(vec![0, 2, 1])]);
        let mut renderer = Renderer::new(160, 120);

        let stats = renderer.render_frame(&mesh, &context(160, 120), &UniformPalette(Color::RED));
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.drawn, 0);
        assert_eq!(drawn_pixels(&renderer.framebuffer), 0);
        assert!(renderer.framebuffer.colors().iter().all(|&c| c == renderer.background));
    }

    #[test]
    fn short_and_invalid_faces_are_skipped() {
        let mut mesh = Mesh::create_test_triangle();
        mesh.faces.push(Face::new(vec![0, 1]));
        mesh.faces.push(Face::new(vec![0, 1, 9]));
        let renderer = Renderer::new(160, 120);
        let ctx = context(160, 120);
        let t = FrameTransforms::new(&ctx, 160, 120, false);

        let (tris, stats) = renderer.assemble(&mesh, &ctx, &UniformPalette(Color::RED), &t);
        assert_eq!(stats.faces, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(tris.len(), 1);
    }

    #[test]
    fn quads_draw_only_their_first_triangle() {
        let vertices = vec![
            Point3::new(-1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(-1.0, 0.0, 1.0),
        ];
        let quad = Mesh::new(vertices.clone(), vec![Face::new(vec![0, 2, 1, 3])]);
        let tri = Mesh::new(vertices, vec![Face::new(vec![0, 2, 1])]);
        let ctx = context(160, 120);
        let palette = UniformPalette(Color::GREEN);

        let mut a = Renderer::new(160, 120);
        let mut b = Renderer::new(160, 120);
        a.render_frame(&quad, &ctx, &palette);
        let stats = b.render_frame(&tri, &ctx, &palette);
        assert_eq!(stats.drawn, 1);
        assert!(drawn_pixels(&b.framebuffer) > 0);
        assert_eq!(a.framebuffer.colors(), b.framebuffer.colors());
    }

    #[test]
    fn lit_side_is_brighter_than_ambient_only() {
        let mesh = Mesh::create_test_triangle();
        let mut ctx = context(160, 120);
        let palette = UniformPalette(Color::WHITE);
        let renderer = Renderer::new(160, 120);

        // the test triangle faces world +Y once reoriented
        ctx.light = DirectionalLight::from_preset(crate::scene::light::LightPreset::Top);
        let t = FrameTransforms::new(&ctx, 160, 120, false);
        let (lit, _) = renderer.assemble(&mesh, &ctx, &palette, &t);

        ctx.light = DirectionalLight::from_preset(crate::scene::light::LightPreset::Bottom);
        let (dark, _) = renderer.assemble(&mesh, &ctx, &palette, &t);

        assert_eq!(dark[0].color, Color::WHITE.scale(0.4));
        assert!(lit[0].color.r > dark[0].color.r);
    }
}
