use crate::core::color::Color;
use nalgebra::Point3;

/// Chooses the unlit color of a triangle.
///
/// `position` is the average of the triangle's vertices after centering and
/// normalization, before the model rotation, so rules can be written against
/// the mesh's own axes in roughly [-1, 1].
pub trait Palette {
    fn base_color(&self, position: &Point3<f32>) -> Color;
}

impl<P: Palette + ?Sized> Palette for &P {
    fn base_color(&self, position: &Point3<f32>) -> Color {
        (**self).base_color(position)
    }
}

impl<P: Palette + ?Sized> Palette for Box<P> {
    fn base_color(&self, position: &Point3<f32>) -> Color {
        (**self).base_color(position)
    }
}
