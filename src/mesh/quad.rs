//! Indexed quad mesh representation.

use nalgebra::{Point3, Vector3};

/// A 3D point in a quad mesh.
pub type Point = Point3<f64>;

/// A quad face: four vertex indices in cyclic order.
///
/// Corner `i` and corner `(i + 1) % 4` are joined by an edge.
pub type Quad = [usize; 4];

/// An indexed mesh whose faces all have four corners.
///
/// Vertices are referenced by position in `vertices`. Faces are expected to be
/// wound consistently (counter-clockwise seen from outside). A `QuadMesh` is a
/// plain value: subdivision reads it and allocates a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadMesh {
    /// Vertex positions.
    pub vertices: Vec<Point>,
    /// Quad faces as indices into `vertices`.
    pub faces: Vec<Quad>,
}

impl QuadMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with preallocated storage.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            faces: Vec::with_capacity(num_faces),
        }
    }

    /// Wrap vertices and faces without validation.
    ///
    /// Use [`build_from_quads`](super::build_from_quads) for checked construction.
    pub fn from_parts(vertices: Vec<Point>, faces: Vec<Quad>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Position of vertex `v`.
    #[inline]
    pub fn position(&self, v: usize) -> &Point {
        &self.vertices[v]
    }

    /// The four corner positions of face `f`, in winding order.
    pub fn face_corners(&self, f: usize) -> [Point; 4] {
        self.faces[f].map(|v| self.vertices[v])
    }

    /// Average of the four corners of face `f`.
    pub fn face_centroid(&self, f: usize) -> Point {
        let sum: Vector3<f64> = self.faces[f].iter().map(|&v| self.vertices[v].coords).sum();
        Point3::from(sum / 4.0)
    }

    /// Unnormalized normal of face `f` from the cross product of its diagonals.
    ///
    /// Points outward for a counter-clockwise face. Works for non-planar quads.
    pub fn face_normal(&self, f: usize) -> Vector3<f64> {
        let [c0, c1, c2, c3] = self.face_corners(f);
        (c2 - c0).cross(&(c3 - c1))
    }

    /// Axis-aligned bounding box of the vertices, or `None` for no vertices.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        let (min, max) = self.vertices.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        Some((min, max))
    }

    /// Euler characteristic `V - E + F` given the mesh's edge count.
    pub fn euler_characteristic(&self, num_edges: usize) -> i64 {
        self.num_vertices() as i64 - num_edges as i64 + self.num_faces() as i64
    }
}
