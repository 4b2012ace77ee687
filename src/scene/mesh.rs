use nalgebra::{Point3, Vector3};

/// A polygon as an ordered list of 0-based vertex indices.
///
/// Only the first three indices are ever rasterized; larger polygons are not
/// fanned into more triangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// The leading triangle, if the face has at least three indices.
    pub fn triangle(&self) -> Option<[usize; 3]> {
        match self.indices.as_slice() {
            [a, b, c, ..] => Some([*a, *b, *c]),
            _ => None,
        }
    }
}

/// Vertex positions and faces of the loaded model, plus the bounding-box
/// normalization derived from them at construction.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
    /// Midpoint of the axis-aligned bounding box.
    pub center: Point3<f32>,
    /// Uniform factor mapping the largest extent to 2.0.
    pub scale: f32,
    extent: Vector3<f32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Self {
        let (center, extent) = compute_bounds(&vertices);
        let max_dimension = extent.x.max(extent.y).max(extent.z);
        let scale = if max_dimension > 0.0 {
            2.0 / max_dimension
        } else {
            1.0
        };

        Self {
            vertices,
            faces,
            center,
            scale,
            extent,
        }
    }

    /// Size of the bounding box along each axis, in object units.
    pub fn extent(&self) -> Vector3<f32> {
        self.extent
    }

    /// Moves `v` to the mesh center and applies the normalization scale.
    #[inline]
    pub fn normalize_position(&self, v: &Point3<f32>) -> Point3<f32> {
        Point3::from((v - self.center) * self.scale)
    }

    /// Object-space positions of a face's leading triangle. `None` for faces
    /// with fewer than three indices or an index past the vertex list.
    pub fn triangle(&self, face: &Face) -> Option<[Point3<f32>; 3]> {
        let [a, b, c] = face.triangle()?;
        Some([
            *self.vertices.get(a)?,
            *self.vertices.get(b)?,
            *self.vertices.get(c)?,
        ])
    }

    /// A single counter-clockwise triangle in the XY plane.
    pub fn create_test_triangle() -> Self {
        let vertices = vec![
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        Self::new(vertices, vec![Face::new(vec![0, 1, 2])])
    }
}

fn compute_bounds(vertices: &[Point3<f32>]) -> (Point3<f32>, Vector3<f32>) {
    let Some(first) = vertices.first() else {
        return (Point3::origin(), Vector3::zeros());
    };

    let mut min_bound = *first;
    let mut max_bound = *first;
    for v in vertices {
        min_bound.x = min_bound.x.min(v.x);
        min_bound.y = min_bound.y.min(v.y);
        min_bound.z = min_bound.z.min(v.z);

        max_bound.x = max_bound.x.max(v.x);
        max_bound.y = max_bound.y.max(v.y);
        max_bound.z = max_bound.z.max(v.z);
    }

    (nalgebra::center(&min_bound, &max_bound), max_bound - min_bound)
}
