use nalgebra::{Point3, Vector3};

/// Below this determinant the triangle is treated as having no area.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Weights returned for a degenerate triangle. Never "inside".
pub const DEGENERATE_BARYCENTRIC: Vector3<f32> = Vector3::new(-1.0, -1.0, -1.0);

/// Calculates the barycentric coordinates (u, v, w) of `p` with respect to
/// triangle (a, b, c), so that `p = u*a + v*b + w*c`. Only x and y are used.
///
/// Solves the 2x2 system built from edge-vector dot products. When the
/// determinant is below epsilon the triangle is degenerate and
/// [`DEGENERATE_BARYCENTRIC`] is returned.
pub fn barycentric(
    a: &Point3<f32>,
    b: &Point3<f32>,
    c: &Point3<f32>,
    p: &Point3<f32>,
) -> Vector3<f32> {
    let v0 = (b - a).xy();
    let v1 = (c - a).xy();
    let v2 = (p - a).xy();

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < DEGENERATE_EPSILON {
        return DEGENERATE_BARYCENTRIC;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    Vector3::new(u, v, w)
}

/// True when all weights are non-negative. Edges count as inside.
#[inline(always)]
pub fn is_inside_triangle(bary: &Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri() -> [Point3<f32>; 3] {
        [
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(110.0, 20.0, 0.5),
            Point3::new(40.0, 90.0, -0.5),
        ]
    }

    #[test]
    fn vertices_get_unit_weights() {
        let [a, b, c] = tri();
        assert_relative_eq!(
            barycentric(&a, &b, &c, &a),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(
            barycentric(&a, &b, &c, &b),
            Vector3::new(0.0, 1.0, 0.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(
            barycentric(&a, &b, &c, &c),
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn weights_sum_to_one_and_reconstruct_point() {
        let [a, b, c] = tri();
        for (x, y) in [(50.0, 40.0), (20.5, 12.5), (70.0, 50.0), (-30.0, 200.0), (200.0, -5.0)] {
            let p = Point3::new(x, y, 0.0);
            let bary = barycentric(&a, &b, &c, &p);
            assert_relative_eq!(bary.sum(), 1.0, epsilon = 1e-5);

            let rebuilt = a.coords * bary.x + b.coords * bary.y + c.coords * bary.z;
            assert_relative_eq!(rebuilt.x, x, epsilon = 1e-3);
            assert_relative_eq!(rebuilt.y, y, epsilon = 1e-3);
        }
    }

    #[test]
    fn inside_test_matches_containment() {
        let [a, b, c] = tri();
        let inside = barycentric(&a, &b, &c, &Point3::new(50.0, 40.0, 0.0));
        let outside = barycentric(&a, &b, &c, &Point3::new(5.0, 80.0, 0.0));
        assert!(is_inside_triangle(&inside));
        assert!(!is_inside_triangle(&outside));

        // midpoint of an edge is on the boundary and counts as inside
        let mid = Point3::from((a.coords + b.coords) * 0.5);
        let on_edge = barycentric(&a, &b, &c, &mid);
        assert!(on_edge.z.abs() < 1e-6);
    }

    #[test]
    fn depth_does_not_affect_weights() {
        let [a, b, c] = tri();
        let p = Point3::new(50.0, 40.0, 0.0);
        let flat = barycentric(
            &Point3::new(a.x, a.y, 0.0),
            &Point3::new(b.x, b.y, 0.0),
            &Point3::new(c.x, c.y, 0.0),
            &p,
        );
        assert_eq!(barycentric(&a, &b, &c, &p), flat);
    }

    #[test]
    fn collinear_triangle_returns_sentinel() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(5.0, 5.0, 0.0);
        let c = Point3::new(10.0, 10.0, 0.0);
        let bary = barycentric(&a, &b, &c, &Point3::new(5.0, 5.0, 0.0));
        assert_eq!(bary, DEGENERATE_BARYCENTRIC);
        assert!(!is_inside_triangle(&bary));

        let point_like = barycentric(&a, &a, &a, &a);
        assert_eq!(point_like, DEGENERATE_BARYCENTRIC);
    }
}
