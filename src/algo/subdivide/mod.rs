//! Catmull-Clark subdivision of quad meshes.
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! subdivision scheme for quad meshes. Each pass:
//!
//! 1. Indexes the undirected edges and their incident faces ([`EdgeTable`])
//! 2. Creates a face point at each face centroid
//! 3. Creates an edge point from each edge's endpoints and adjacent face points
//! 4. Moves each original vertex to a weighted average of its neighborhood
//! 5. Connects everything into four child quads per parent quad
//!
//! Repeated passes converge to a C² surface (C¹ at extraordinary vertices).
//!
//! # Example
//!
//! ```
//! use catmull::algo::subdivide::{catmull_clark_subdivide, SubdivideOptions};
//! use catmull::mesh::unit_cube;
//!
//! let cube = unit_cube();
//! let options = SubdivideOptions::new(2); // 2 iterations
//! let smooth = catmull_clark_subdivide(&cube, &options).unwrap();
//!
//! assert_eq!(smooth.num_faces(), 6 * 16);
//! ```
//!
//! # Boundaries
//!
//! By default the interior vertex rule is applied everywhere, including at
//! open boundaries, and boundary edge points average their single face point
//! with the endpoints. [`BoundaryRule::Crease`] switches to the classic sharp
//! boundary rules instead.
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod catmull_clark;
pub mod edges;
pub mod points;

pub use catmull_clark::{
    catmull_clark_subdivide, catmull_clark_subdivide_with_progress, subdivide,
    subdivide_with_options,
};
pub use edges::{Edge, EdgeTable};

/// How vertices and edges on an open boundary are refined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryRule {
    /// Apply the interior rules unchanged. Boundary edge points are the
    /// average of the two endpoints and the single adjacent face point.
    ///
    /// A valence-2 corner of a parallelogram face lands exactly on that
    /// face's point, so its child quad repeats a vertex and has a zero
    /// normal. Use [`BoundaryRule::Crease`] when open meshes feed a renderer.
    #[default]
    Uniform,

    /// Keep boundaries sharp: boundary edge points are midpoints, boundary
    /// vertices use `3/4 v + 1/8 (left + right)`, and corners stay put.
    Crease,
}

/// Options for Catmull-Clark subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision iterations.
    pub iterations: usize,

    /// Rule applied on open boundaries.
    pub boundary_rule: BoundaryRule,

    /// Maximum faces allowed in the result.
    pub max_faces: usize,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SubdivideOptions {
    /// Create options with the specified number of iterations.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            boundary_rule: BoundaryRule::default(),
            max_faces: 10_000_000,
            parallel: true,
        }
    }

    /// Set the boundary rule.
    pub fn with_boundary_rule(mut self, rule: BoundaryRule) -> Self {
        self.boundary_rule = rule;
        self
    }

    /// Set the maximum number of faces allowed in the result.
    pub fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Face count after all iterations, or `None` on overflow.
    pub fn expected_faces(&self, current_faces: usize) -> Option<usize> {
        (0..self.iterations).try_fold(current_faces, |faces, _| faces.checked_mul(4))
    }
}
