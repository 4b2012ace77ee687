use crate::core::color::Color;
use crate::core::pipeline::Palette;
use nalgebra::{Point3, Vector3};

/// Normals shorter than this are returned unnormalized.
const NORMAL_EPSILON: f32 = 1e-4;

/// Ambient + diffuse coefficients of the flat lighting model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    pub ambient: f32,
    pub diffuse: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            diffuse: 0.6,
        }
    }
}

/// Cross product of the two edges leaving `v0`, normalized unless the
/// triangle is (nearly) degenerate.
pub fn face_normal(v0: &Point3<f32>, v1: &Point3<f32>, v2: &Point3<f32>) -> Vector3<f32> {
    let normal = (v1 - v0).cross(&(v2 - v0));
    let length = normal.norm();
    if length > NORMAL_EPSILON {
        normal / length
    } else {
        normal
    }
}

/// Backface test in view space, where the eye sits at the origin.
///
/// Keeps the triangle when its normal has a positive component toward the eye
/// as seen from the triangle's centroid.
pub fn is_front_facing(view_vertices: &[Point3<f32>; 3], normal: &Vector3<f32>) -> bool {
    let centroid =
        (view_vertices[0].coords + view_vertices[1].coords + view_vertices[2].coords) / 3.0;
    let toward_eye = (-centroid).normalize();
    normal.dot(&toward_eye) > 0.0
}

/// Cosine term of the directional light. May be negative.
#[inline]
pub fn light_intensity(normal: &Vector3<f32>, light_direction: &Vector3<f32>) -> f32 {
    normal.dot(light_direction)
}

/// Scales `base` by `clamp(ambient + diffuse * max(0, intensity), 0, 1)`.
pub fn shade(base: Color, intensity: f32, params: &ShadingParams) -> Color {
    let factor = (params.ambient + params.diffuse * intensity.max(0.0)).clamp(0.0, 1.0);
    base.scale(factor)
}

//=================================
// Palettes
//=================================

/// Region colors of the shuttle model, banded along the mesh's long (Z) axis.
pub struct ShuttlePalette;

impl ShuttlePalette {
    pub const THRUSTER: Color = Color::rgb(255, 180, 0);
    pub const HULL_RED: Color = Color::rgb(143, 43, 14);
    pub const COCKPIT: Color = Color::rgb(240, 240, 240);
    pub const NOSE: Color = Color::rgb(230, 220, 220);
    pub const BODY: Color = Color::rgb(78, 120, 122);
}

impl Palette for ShuttlePalette {
    /// Rules are checked in order; the first match wins.
    fn base_color(&self, position: &Point3<f32>) -> Color {
        let z = position.z;
        let lateral = position.x.abs();

        if z < -0.5 {
            if z < -0.7 { Self::THRUSTER } else { Self::HULL_RED }
        } else if z > 0.4 && z <= 0.75 && lateral < 0.4 {
            Self::COCKPIT
        } else if z > 0.75 {
            if z > 1.0 { Self::HULL_RED } else { Self::NOSE }
        } else {
            Self::BODY
        }
    }
}

/// Same color everywhere.
pub struct UniformPalette(pub Color);

impl Palette for UniformPalette {
    fn base_color(&self, _position: &Point3<f32>) -> Color {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_follows_winding() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(0.0, 3.0, 0.0);
        assert_relative_eq!(face_normal(&a, &b, &c), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(face_normal(&a, &c, &b), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn degenerate_normal_is_not_normalized() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        let c = Point3::new(2.0, 2.0, 2.0);
        assert_eq!(face_normal(&a, &b, &c), Vector3::zeros());

        let tiny = face_normal(&a, &Point3::new(0.005, 0.0, 0.0), &Point3::new(0.0, 0.005, 0.0));
        assert_relative_eq!(tiny, Vector3::new(0.0, 0.0, 0.000025), epsilon = 1e-9);
    }

    #[test]
    fn culling_depends_on_side_facing_the_eye() {
        // triangle in front of the eye (eye looks down -Z)
        let facing = [
            Point3::new(-1.0, -1.0, -5.0),
            Point3::new(1.0, -1.0, -5.0),
            Point3::new(0.0, 1.0, -5.0),
        ];
        let n = face_normal(&facing[0], &facing[1], &facing[2]);
        assert!(is_front_facing(&facing, &n));

        let away = [facing[0], facing[2], facing[1]];
        let n = face_normal(&away[0], &away[1], &away[2]);
        assert!(!is_front_facing(&away, &n));
    }

    #[test]
    fn edge_on_and_zero_normals_are_culled() {
        let tri = [
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, -3.0),
            Point3::new(0.0, 1.0, -2.0),
        ];
        let n = face_normal(&tri[0], &tri[1], &tri[2]);
        assert!(!is_front_facing(&tri, &n));
        assert!(!is_front_facing(&tri, &Vector3::zeros()));
    }

    #[test]
    fn shading_blends_ambient_and_diffuse() {
        let params = ShadingParams::default();
        let base = Color::rgb(200, 100, 50);
        assert_eq!(shade(base, 1.0, &params), base);
        assert_eq!(shade(base, -0.8, &params), Color::rgb(80, 40, 20));
        let half = shade(base, 0.5, &params);
        assert!((half.r as i32 - 140).abs() <= 1 && (half.b as i32 - 35).abs() <= 1);
        assert_eq!(shade(base, 3.0, &params), base);
    }

    #[test]
    fn light_intensity_is_cosine() {
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light_intensity(&n, &Vector3::new(0.0, 0.0, 1.0)), 1.0);
        assert_relative_eq!(light_intensity(&n, &Vector3::new(0.0, 0.0, -1.0)), -1.0);
    }

    #[test]
    fn shuttle_regions_in_rule_order() {
        let p = ShuttlePalette;
        let at = |x: f32, z: f32| p.base_color(&Point3::new(x, 0.0, z));

        assert_eq!(at(0.0, -0.9), ShuttlePalette::THRUSTER);
        assert_eq!(at(0.0, -0.6), ShuttlePalette::HULL_RED);
        assert_eq!(at(0.0, -0.5), ShuttlePalette::BODY);
        assert_eq!(at(0.1, 0.5), ShuttlePalette::COCKPIT);
        assert_eq!(at(0.1, 0.75), ShuttlePalette::COCKPIT);
        // wide of the cockpit band falls through to the body
        assert_eq!(at(0.6, 0.5), ShuttlePalette::BODY);
        assert_eq!(at(0.6, 0.8), ShuttlePalette::NOSE);
        assert_eq!(at(0.0, 1.2), ShuttlePalette::HULL_RED);
        assert_eq!(at(0.0, 0.0), ShuttlePalette::BODY);
    }

    #[test]
    fn uniform_palette_ignores_position() {
        let p = UniformPalette(Color::MAGENTA);
        assert_eq!(p.base_color(&Point3::new(5.0, -3.0, 0.9)), Color::MAGENTA);
    }
}
