use nalgebra::{Matrix4, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices of the pipeline.
/// Built by hand so the conventions are explicit: right-handed, camera looking
/// down -Z, clip space z in [-w, w].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a View matrix (Look-At, Right-Handed).
    /// Transforms world space coordinates to camera/view space.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        let translation = Self::translation(&-eye.coords);

        rotation * translation
    }

    /// Creates a Perspective Projection matrix (Right-Handed).
    /// Maps the view frustum to NDC [-1, 1] on every axis.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }

    /// Creates the Viewport matrix: NDC x/y in [-1, 1] to pixels in
    /// [0, width] x [0, height]. Z is passed through untouched.
    ///
    /// With `flip_y` the NDC +Y axis points to the top row of the image.
    pub fn viewport(width: f32, height: f32, flip_y: bool) -> Matrix4<f32> {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let sy = if flip_y { -hh } else { hh };

        Matrix4::new(
            hw,  0.0, 0.0, hw,
            0.0, sy,  0.0, hh,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
///
/// A zero `w` leaves the coordinate undivided (and keeps `w = 0`).
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Vector4<f32> {
    if clip.w != 0.0 { clip / clip.w } else { *clip }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotation_y_quarter_turn_maps_x_to_minus_z() {
        let p = TransformFactory::rotation_y(FRAC_PI_2) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p, Vector4::new(0.0, 0.0, -1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn rotation_x_negative_quarter_turn_maps_z_to_y() {
        let p = TransformFactory::rotation_x(-FRAC_PI_2) * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_relative_eq!(p, Vector4::new(0.0, 1.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn view_places_target_on_negative_z() {
        let view = TransformFactory::view(
            &Point3::new(0.0, 0.0, 5.0),
            &Point3::origin(),
            &Vector3::y(),
        );
        let p = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p, Vector4::new(0.0, 0.0, -5.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let proj = TransformFactory::perspective(4.0 / 3.0, 45f32.to_radians(), 0.1, 100.0);
        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, -0.1, 1.0)));
        let far = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, -100.0, 1.0)));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn viewport_maps_ndc_corners_to_pixels() {
        let vp = TransformFactory::viewport(800.0, 600.0, false);
        let lo = vp * Vector4::new(-1.0, -1.0, 0.25, 1.0);
        let hi = vp * Vector4::new(1.0, 1.0, -0.5, 1.0);
        assert_relative_eq!(lo, Vector4::new(0.0, 0.0, 0.25, 1.0));
        assert_relative_eq!(hi, Vector4::new(800.0, 600.0, -0.5, 1.0));

        let flipped =
            TransformFactory::viewport(800.0, 600.0, true) * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(flipped.y, 0.0);
    }

    #[test]
    fn zero_w_skips_division() {
        let clip = Vector4::new(2.0, -3.0, 4.0, 0.0);
        assert_eq!(apply_perspective_division(&clip), clip);
        let divided = apply_perspective_division(&Vector4::new(2.0, -4.0, 6.0, 2.0));
        assert_eq!(divided, Vector4::new(1.0, -2.0, 3.0, 1.0));
    }
}
